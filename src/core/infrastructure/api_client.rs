//! Internal HTTP client that attaches the bearer token and decodes JSON.

use crate::core::domain::{
    error::{CraftyError, CraftyResult},
    model::{credentials::Credentials, settings::RateLimitConfig},
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, header::AUTHORIZATION};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Internal HTTP client shared by the server directory and the stats fetcher.
///
/// Every request carries `Authorization: Bearer <token>`. Transport failures,
/// non-2xx statuses and undecodable bodies all surface as `CraftyError::Api`;
/// nothing is retried here. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    credentials: Arc<Credentials>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Errors
    /// Returns `CraftyError::Api` if the HTTP client cannot be built, or
    /// `CraftyError::Config` if the rate limit has zero values.
    pub fn new(credentials: Credentials, rate_limit: Option<RateLimitConfig>) -> CraftyResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(!credentials.verify_tls())
            .build()
            .map_err(|e| CraftyError::Api(format!("Failed to build HTTP client: {}", e)))?;

        let rate_limiter = rate_limit.map(build_rate_limiter).transpose()?;

        Ok(Self {
            http_client,
            credentials: Arc::new(credentials),
            rate_limiter,
        })
    }

    /// Returns the credentials this client authenticates with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Performs an authenticated GET request and decodes the JSON body.
    ///
    /// # Type Parameters
    /// - `T`: The expected response type (must implement `DeserializeOwned`).
    ///
    /// # Errors
    /// Returns `CraftyError::Api` if the request fails, the status is not
    /// 2xx, or the body is not valid JSON for `T`.
    pub async fn get<T>(&self, path: &str) -> CraftyResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = self.credentials.base_url().join(path);
        tracing::debug!(%url, "GET");

        let response = self
            .http_client
            .get(&url)
            .header(AUTHORIZATION, self.credentials.api_token().as_bearer_header())
            .send()
            .await
            .map_err(|e| CraftyError::Api(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(CraftyError::Api(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CraftyError::Api(format!("Failed to read response: {}", e)))?;
        serde_json::from_str::<T>(&body)
            .map_err(|e| CraftyError::Api(format!("Failed to parse response: {}", e)))
    }
}

fn build_rate_limiter(rate_limit: RateLimitConfig) -> CraftyResult<Arc<DefaultDirectRateLimiter>> {
    let per_second = NonZeroU32::new(rate_limit.requests_per_second).ok_or_else(|| {
        CraftyError::Config("rate_limit.requests_per_second must be greater than zero".to_string())
    })?;
    let burst = NonZeroU32::new(rate_limit.burst_size).ok_or_else(|| {
        CraftyError::Config("rate_limit.burst_size must be greater than zero".to_string())
    })?;
    let quota = Quota::per_second(per_second).allow_burst(burst);
    Ok(Arc::new(DefaultDirectRateLimiter::direct(quota)))
}
