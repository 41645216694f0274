use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::templates::TemplateKey;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to read response body: {0}")]
    Body(reqwest::Error),
}

/// Fetches a generated résumé PDF for one template.
#[async_trait]
pub trait ResumeFetcher: Send + Sync {
    async fn fetch(&self, template: TemplateKey) -> Result<Bytes, FetchError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// `ResumeFetcher` backed by the HTTP Generation Endpoint.
#[derive(Clone)]
pub struct HttpResumeFetcher {
    client: Client,
    base_url: String,
}

impl HttpResumeFetcher {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn resume_url(&self, template: TemplateKey) -> String {
        format!("{}/resume/{}", self.base_url, template)
    }
}

#[async_trait]
impl ResumeFetcher for HttpResumeFetcher {
    async fn fetch(&self, template: TemplateKey) -> Result<Bytes, FetchError> {
        let url = self.resume_url(template);
        debug!("Fetching {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected response")
                        .to_string()
                });
            warn!("Generation endpoint returned {status}: {message}");
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.bytes().await.map_err(FetchError::Body)
    }
}
