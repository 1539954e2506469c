use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::PokemonConfig;
use crate::error::AppError;

// Source of remote JSON documents. The list aggregator and detail resolver
// only talk to the API through this trait.
pub trait Fetch: Send + Sync {
    fn get_json<T>(&self, url: &str) -> impl Future<Output = Result<T, AppError>> + Send
    where
        T: DeserializeOwned + Send;
}

#[derive(Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
}

impl PokeApiClient {
    pub fn new(config: &PokemonConfig) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if config.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout as u64));
        } else {
            tracing::debug!("No request timeout configured");
        }

        let http = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            AppError::ConfigError(format!("HTTP client: {}", e))
        })?;

        Ok(Self { http })
    }
}

impl Fetch for PokeApiClient {
    async fn get_json<T>(&self, url: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned + Send,
    {
        tracing::debug!("Fetching URL: {}", url);

        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to make HTTP request to {}: {}", url, e);
            AppError::from(e)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_msg = format!("API request to {} failed with status: {}", url, status);
            tracing::error!("{}", error_msg);
            return Err(AppError::NetworkError(error_msg));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse JSON response from {}: {}", url, e);
            AppError::ParseError(format!("JSON parsing failed: {}", e))
        })
    }
}
