pub mod api_response;
pub mod credentials;
pub mod metric_value;
pub mod server_descriptor;
pub mod settings;
pub mod stats_payload;
