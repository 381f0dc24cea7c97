use std::future::Future;

use futures::StreamExt;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};
use url::Url;

use super::auth::AuthToken;
use super::models::ApiConfig;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Write error: {0}")]
    Write(#[source] std::io::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err)
        } else {
            ApiError::Transport(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// The two calls the file server supports.
///
/// Implemented by [`ApiClient`] over HTTP; callers take it generically so the
/// download and listing flows can be exercised without a network.
pub trait FileTransport {
    /// `GET /getFiles/`, body buffered and returned as text.
    fn fetch_listing(&self, token: &AuthToken) -> impl Future<Output = Result<String>> + Send;

    /// `GET /downloadFile/{filename}`, body streamed into `destination`.
    /// Returns the number of bytes written.
    fn fetch_file<W>(
        &self,
        token: &AuthToken,
        filename: &str,
        destination: &mut W,
    ) -> impl Future<Output = Result<u64>> + Send
    where
        W: AsyncWrite + Unpin + Send;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // A fresh client per call, without an idle pool: one connection per
    // request and nothing kept alive between calls.
    fn http_client(&self) -> Result<Client> {
        let client = Client::builder()
            .timeout(self.config.timeout)
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(client)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.config.base_url, e)))?;

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.config.base_url.clone()))?;
            path.pop_if_empty().extend(segments);
        }

        Ok(url)
    }

    async fn get(&self, url: Url, token: &AuthToken) -> Result<Response> {
        let response = self
            .http_client()?
            .get(url)
            .header(AUTHORIZATION, token.as_str())
            .send()
            .await?;

        // The server answers 200 even for bad credentials; other statuses are
        // not expected, but the body is handled the same way.
        if !response.status().is_success() {
            warn!(status = %response.status(), url = %response.url(), "unexpected response status");
        }

        Ok(response)
    }
}

impl FileTransport for ApiClient {
    async fn fetch_listing(&self, token: &AuthToken) -> Result<String> {
        let url = self.endpoint(&["getFiles", ""])?;
        debug!(%url, "requesting file listing");

        let body = self.get(url, token).await?.text().await?;
        debug!(bytes = body.len(), "listing received");

        Ok(body)
    }

    async fn fetch_file<W>(&self, token: &AuthToken, filename: &str, destination: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let url = self.endpoint(&["downloadFile", filename])?;
        debug!(%url, "requesting file");

        let response = self.get(url, token).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            destination
                .write_all(&chunk)
                .await
                .map_err(ApiError::Write)?;
            written += chunk.len() as u64;
        }

        destination.flush().await.map_err(ApiError::Write)?;
        Ok(written)
    }
}
