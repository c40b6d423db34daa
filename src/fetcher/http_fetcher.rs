use async_trait::async_trait;
use reqwest::Client;

use crate::app::{BreezeError, Result};
use crate::fetcher::Fetcher;

const USER_AGENT: &str = concat!("awsbreeze/", env!("CARGO_PKG_VERSION"));

/// Plain GET with no retry; timeouts are left at the transport default.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BreezeError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?.to_vec();
        tracing::debug!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
