// src/backend/mod.rs

//! Fetch backends.
//!
//! Workers consume pages through the [`FetchBackend`] trait so the HTTP
//! layer can be swapped for a stub in tests.

mod http;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

pub use http::HttpBackend;

/// A backend that turns a URL into page bytes.
#[async_trait]
pub trait FetchBackend: Send + Sync {
    /// Fetch the page at `url`, returning its (possibly empty) body.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}
