//! Transport implementation backed by `reqwest`.

use super::{Request, Transport, TransportError};
use crate::config::ClientConfig;

/// Transport performing real HTTP requests
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport using the user agent and timeout of the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, request: &Request) -> Result<Vec<u8>, TransportError> {
        let url = request.url();
        tracing::debug!(url = %url, "Sending request");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !(100..300).contains(&status.as_u16()) {
            tracing::warn!(url = %url, status = %status, "Unexpected response status");
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!(url = %url, bytes = body.len(), "Received response");
        Ok(body.to_vec())
    }
}
