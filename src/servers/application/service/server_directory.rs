use crate::core::{
    domain::{
        error::{CraftyError, CraftyResult},
        model::{api_response::ApiResponse, server_descriptor::ServerDescriptor},
    },
    infrastructure::api_client::ApiClient,
};

/// Path of the server listing endpoint.
pub const SERVERS_PATH: &str = "/api/v2/servers/";

/// One-shot discovery of the servers managed by Crafty.
pub struct ServerDirectory {
    api_client: ApiClient,
}

impl ServerDirectory {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }

    /// Lists every server the upstream knows about, in upstream order.
    ///
    /// Discovery failure is not fatal: it is logged and yields no servers.
    pub async fn list_servers(&self) -> Vec<ServerDescriptor> {
        match self.try_list_servers().await {
            Ok(servers) => servers,
            Err(error) => {
                tracing::error!(%error, "Error fetching data from Crafty Controller API");
                Vec::new()
            }
        }
    }

    /// Same as [`ServerDirectory::list_servers`] but surfaces the failure.
    ///
    /// # Errors
    /// Returns `CraftyError::Discovery` wrapping the underlying API failure.
    pub async fn try_list_servers(&self) -> CraftyResult<Vec<ServerDescriptor>> {
        let response: ApiResponse<Vec<ServerDescriptor>> = self
            .api_client
            .get(SERVERS_PATH)
            .await
            .map_err(|e| CraftyError::Discovery(e.to_string()))?;
        tracing::debug!(?response, "Raw server list response");
        Ok(response.data.unwrap_or_default())
    }
}
