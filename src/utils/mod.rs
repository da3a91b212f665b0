//! Utility functions and helpers.

use url::Url;

/// Extract the host from a URL string.
pub fn get_host(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()
        .and_then(|u| u.host_str().map(|s| s.to_string()))
}
