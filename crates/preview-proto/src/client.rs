//! Metadata service client.

use std::future::Future;
use std::time::Duration;

use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::config::ServiceConfig;
use crate::error::{FetchError, FetchResult};

/// Anything that can answer "what does the metadata service say about
/// `address`".  The controller only talks to this seam.
pub trait MetadataSource: Send + Sync + 'static {
    /// Fetch and parse the raw response body for `address`.
    fn fetch(&self, address: &str) -> impl Future<Output = FetchResult<Value>> + Send;
}

/// Build `<base>?q=<address>` with the address percent-encoded.
pub fn metadata_url(base_url: &str, address: &str) -> FetchResult<Url> {
    Url::parse_with_params(base_url, &[("q", address)]).map_err(|e| {
        FetchError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        }
    })
}

/// `MetadataSource` backed by a single GET to the hosted metadata API.
#[derive(Debug, Clone)]
pub struct HttpMetadataClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetadataClient {
    pub fn new(config: &ServiceConfig) -> FetchResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build().map_err(FetchError::Transport)?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl MetadataSource for HttpMetadataClient {
    async fn fetch(&self, address: &str) -> FetchResult<Value> {
        let url = metadata_url(&self.base_url, address)?;
        debug!(%url, "requesting metadata");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;
        Ok(value)
    }
}
