// src/models/config.rs

use serde::Deserialize;

/// Crawl behavior settings.
#[derive(Debug, Deserialize, Clone)]
pub struct CrawlConfig {
    /// Seed URL the crawl starts from.
    pub seed: String,
    /// Number of concurrent workers.
    pub parallelism: usize,
    /// Max number of retries for each failed task.
    pub max_retry: usize,
    /// Max depth of the crawl tree (0 = unlimited).
    pub max_depth: usize,
    /// Capacity of the task and result channels.
    pub queue_size: usize,
    /// Restrict the crawl to subdomains of the seed host.
    pub same_host: bool,
    /// Exact-host whitelist entry (empty = disabled).
    pub exact_host: String,
    /// Subdomain-suffix whitelist entry (empty = disabled).
    pub subdomain: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed: "https://google.com".to_string(),
            parallelism: 10,
            max_retry: 3,
            max_depth: 1,
            queue_size: 10_000,
            same_host: true,
            exact_host: String::new(),
            subdomain: String::new(),
        }
    }
}

/// HTTP backend settings.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub user_agent: String,
    /// Total per-request deadline in seconds.
    pub timeout_secs: u64,
    /// Maximum body size per request in bytes (0 = unlimited).
    pub max_body_size: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("crawler/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            max_body_size: 10 * 1024 * 1024,
        }
    }
}
