//! A bounded, parallel web crawler.
//!
//! Starting from a single seed URL, the crawler fetches pages, extracts
//! outbound links and schedules newly discovered links, subject to host
//! filters, a depth limit and per-task retries. It terminates when the
//! reachable frontier is exhausted, on an external stop signal, or when
//! the shutdown cap elapses.
//!
//! # Architecture
//!
//! - `models`: Data structures (Task, TaskResult, configuration)
//! - `backend`: Page fetching (HTTP backend behind the `FetchBackend` seam)
//! - `services`: Scheduling core (Orchestrator, Worker) and link extraction
//! - `pipeline`: High-level crawl wiring for the CLI
//! - `utils`: Shared URL helpers
//! - `error`: Unified error handling

pub mod backend;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

// Re-export commonly used items
pub use error::{AppError, Result};
