// src/backend/http.rs

//! Default HTTP backend for the crawler.
//!
//! Enforces a per-request deadline, caps the body size, and decodes gzip
//! bodies. Server errors (5xx) are returned as empty pages: the URL
//! exists but yields no outgoing links, so it is neither retried nor
//! treated as a failure.

use std::io::Read;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use flate2::read::GzDecoder;
use reqwest::header::{HeaderMap, HeaderName, CONTENT_ENCODING, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::Result;
use crate::models::BackendConfig;

use super::FetchBackend;

/// HTTP fetch backend backed by a shared reqwest client.
pub struct HttpBackend {
    client: Client,
    max_body_size: usize,
}

impl HttpBackend {
    /// Build a backend from the given configuration.
    ///
    /// Automatic decompression is disabled so the gzip policy below is
    /// driven by the response headers alone.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .no_gzip()
            .build()?;
        Ok(Self {
            client,
            max_body_size: config.max_body_size,
        })
    }

    /// Read the response body, stopping at the configured size cap.
    async fn read_capped(&self, res: &mut reqwest::Response) -> Result<Vec<u8>> {
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = res.chunk().await? {
            if self.max_body_size > 0 {
                let remaining = self.max_body_size - body.len();
                if chunk.len() >= remaining {
                    body.extend_from_slice(&chunk[..remaining]);
                    break;
                }
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait]
impl FetchBackend for HttpBackend {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let start = Instant::now();
        debug!(url = %url, "executing http request");

        let mut res = self.client.get(url.clone()).send().await?;
        let status = res.status();
        let gzipped = header_contains(res.headers(), CONTENT_TYPE, "gzip")
            || header_contains(res.headers(), CONTENT_ENCODING, "gzip");

        debug!(
            url = %url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "completed http request"
        );

        // Server errors are empty pages, not failures.
        if status.is_server_error() {
            return Ok(Vec::new());
        }

        let body = self.read_capped(&mut res).await?;

        if gzipped {
            let mut decoded = Vec::new();
            GzDecoder::new(body.as_slice()).read_to_end(&mut decoded)?;
            return Ok(decoded);
        }
        Ok(body)
    }
}

/// Case-insensitive substring check on a response header.
fn header_contains(headers: &HeaderMap, name: HeaderName, needle: &str) -> bool {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().contains(needle))
        .unwrap_or(false)
}
