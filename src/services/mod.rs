// src/services/mod.rs

//! Scheduling core and page processing services.
//!
//! - `Orchestrator`: owns the frontier and all crawl state
//! - `Worker`: drains the task queue, fetches pages and extracts links
//! - `extract_links`: pure HTML link extraction

mod extractor;
mod orchestrator;
mod worker;

pub use extractor::{extract_links, Extractor};
pub use orchestrator::{Filter, Orchestrator, OrchestratorBuilder};
pub use worker::{PostProcessor, PreProcessor, SharedTaskReceiver, Worker, WorkerChannels};

use std::time::Duration;

/// How long `stop()` waits for a component to acknowledge cancellation
/// before returning anyway.
pub(crate) const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);
