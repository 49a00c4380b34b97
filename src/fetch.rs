//! Remote fetching
//!
//! Every network access goes through the [`Fetcher`] trait: one blocking GET,
//! the whole body in memory, no retries. The engine never sees the async
//! runtime that `reqwest::blocking` drives internally.

use std::time::Duration;

use tracing::debug;

use crate::error::{Result, transport};

/// Capability to download a URL's body in one roundtrip
pub trait Fetcher {
    /// Download `url`, blocking until the full body is available.
    ///
    /// A network error, a non-success status and an empty body are all
    /// reported as recoverable transport errors.
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// [`Fetcher`] backed by a blocking `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher. `timeout` of `None` keeps the client's default.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("bundlesync/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| transport::request_failed(url, e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(transport::http_status(url, status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| transport::request_failed(url, e.without_url()))?;
        if body.is_empty() {
            return Err(transport::empty_response(url));
        }

        debug!("Received {} bytes", body.len());
        Ok(body.to_vec())
    }
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        (**self).get(url)
    }
}
