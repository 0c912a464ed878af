//! HTTP plumbing shared by every backend resource.
//!
//! One call is one attempt: there is no retry here, the user re-triggers
//! the action instead.

use crate::config::BackendSettings;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use service_core::observability::{TracedClientExt, TracedRequest};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Rejected locally; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Network error calling {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend returned {status} for {url}")]
    Server {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl SourceError {
    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(settings: &BackendSettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send and turn transport failures and non-2xx statuses into errors.
    async fn execute(&self, request: TracedRequest, url: &str) -> Result<Response, SourceError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Backend request failed");
            SourceError::Network {
                url: url.to_string(),
                source: e,
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(url = %url, status = status.as_u16(), "Backend returned error status");
        Err(SourceError::Server {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, SourceError> {
        let bytes = response.bytes().await.map_err(|e| SourceError::Network {
            url: url.to_string(),
            source: e,
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(url = %url, error = %e, "Failed to decode backend response");
            SourceError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            }
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = self.url(path);
        let response = self.execute(self.client.traced_get(&url), &url).await?;
        Self::read_json(response, &url).await
    }

    /// GET a plain-text body, trimmed.
    pub async fn get_text(&self, path: &str) -> Result<String, SourceError> {
        let url = self.url(path);
        let request = self.client.traced_get(&url).header("accept", "text/plain");
        let response = self.execute(request, &url).await?;

        let text = response.text().await.map_err(|e| SourceError::Network {
            url: url.clone(),
            source: e,
        })?;
        Ok(text.trim().to_string())
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, SourceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self
            .execute(self.client.traced_post(&url).json(body), &url)
            .await?;
        Self::read_json(response, &url).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, SourceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self
            .execute(self.client.traced_put(&url).json(body), &url)
            .await?;
        Self::read_json(response, &url).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), SourceError> {
        let url = self.url(path);
        self.execute(self.client.traced_delete(&url), &url).await?;
        Ok(())
    }
}
