pub mod metric;
pub mod normalizer;
