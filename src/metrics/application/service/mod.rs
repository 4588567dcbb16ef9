pub mod server_metric_set;
