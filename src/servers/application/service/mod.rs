pub mod server_directory;
pub mod stats_fetcher;
