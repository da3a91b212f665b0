// src/pipeline/crawl.rs

//! Crawl pipeline: wires the backend, the worker pool and the
//! orchestrator together and runs a crawl to completion.

use std::sync::Arc;

use tracing::info;

use crate::backend::{FetchBackend, HttpBackend};
use crate::error::Result;
use crate::models::{BackendConfig, CrawlConfig};
use crate::services::{extract_links, Orchestrator, Worker};
use crate::utils::get_host;

/// Run a crawl from the configured seed until the frontier is exhausted
/// or an interrupt arrives, then shut everything down.
///
/// Returns the stopped orchestrator so the caller can read the
/// registries and render output.
pub async fn run_crawl(config: &CrawlConfig, backend_config: &BackendConfig) -> Result<Orchestrator> {
    let backend: Arc<dyn FetchBackend> = Arc::new(HttpBackend::new(backend_config)?);

    let mut builder = Orchestrator::builder(config.queue_size).max_retry(config.max_retry);
    if config.max_depth != 0 {
        builder = builder.max_depth(config.max_depth);
    }
    if config.same_host {
        if let Some(host) = get_host(&config.seed) {
            builder = builder.subdomain_filter(host);
        }
    }
    if !config.exact_host.is_empty() {
        builder = builder.exact_host_filter(config.exact_host.clone());
    }
    if !config.subdomain.is_empty() {
        builder = builder.subdomain_filter(config.subdomain.clone());
    }
    let mut orchestrator = builder.build();

    let mut workers = Vec::with_capacity(config.parallelism);
    for _ in 0..config.parallelism.max(1) {
        let mut worker = Worker::new(
            orchestrator.worker_channels(),
            Arc::clone(&backend),
            extract_links,
        );
        worker.start()?;
        workers.push(worker);
    }

    orchestrator.start(&config.seed)?;
    info!(seed = %config.seed, workers = config.parallelism, "crawl started");

    tokio::select! {
        _ = orchestrator.wait() => info!("crawl finished"),
        _ = tokio::signal::ctrl_c() => info!("interrupt received, stopping"),
    }

    for worker in &mut workers {
        worker.stop().await;
    }
    orchestrator.stop().await;

    Ok(orchestrator)
}
