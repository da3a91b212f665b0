// src/services/worker.rs

//! Worker: stateless consumer that turns a [`Task`] into a [`TaskResult`].
//!
//! N workers share the orchestrator's task queue and report outcomes on
//! the done and error queues. Workers never consult retry policy; routing
//! a result to the error queue is the only failure signal they emit.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::backend::FetchBackend;
use crate::error::{AppError, Result};
use crate::models::{Task, TaskResult};

use super::{Extractor, SHUTDOWN_TIMEOUT};

/// Task queue endpoint shared by all workers of a crawl.
pub type SharedTaskReceiver = Arc<Mutex<mpsc::Receiver<Task>>>;

/// Channel endpoints a worker needs to participate in a crawl.
#[derive(Clone)]
pub struct WorkerChannels {
    pub tasks: SharedTaskReceiver,
    pub done: mpsc::Sender<TaskResult>,
    pub errors: mpsc::Sender<TaskResult>,
}

/// Runs before a task is fetched. Returning `Ok(true)` ignores the task:
/// it completes successfully with no children. An error fails the task.
pub type PreProcessor = Box<dyn Fn(&mut Task) -> Result<bool> + Send + Sync>;

/// Runs over the mutable result after extraction. An error fails the task.
pub type PostProcessor = Box<dyn Fn(&mut TaskResult) -> Result<()> + Send + Sync>;

/// A single member of the worker pool.
pub struct Worker {
    state: Option<WorkerState>,
    shutdown_tx: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

struct WorkerState {
    channels: WorkerChannels,
    backend: Arc<dyn FetchBackend>,
    extractor: Extractor,
    pre_processors: Vec<PreProcessor>,
    post_processors: Vec<PostProcessor>,
}

impl Worker {
    /// Create a worker over the given channels, backend and extractor.
    pub fn new(
        channels: WorkerChannels,
        backend: Arc<dyn FetchBackend>,
        extractor: Extractor,
    ) -> Self {
        Self {
            state: Some(WorkerState {
                channels,
                backend,
                extractor,
                pre_processors: Vec::new(),
                post_processors: Vec::new(),
            }),
            shutdown_tx: None,
            handle: None,
        }
    }

    /// Register a pre-processor. Must be called before `start`.
    pub fn with_pre_processor(
        mut self,
        f: impl Fn(&mut Task) -> Result<bool> + Send + Sync + 'static,
    ) -> Self {
        if let Some(state) = &mut self.state {
            state.pre_processors.push(Box::new(f));
        }
        self
    }

    /// Register a post-processor. Must be called before `start`.
    pub fn with_post_processor(
        mut self,
        f: impl Fn(&mut TaskResult) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        if let Some(state) = &mut self.state {
            state.post_processors.push(Box::new(f));
        }
        self
    }

    /// Launch the processing loop in the background.
    ///
    /// Fails if the worker was already started.
    pub fn start(&mut self) -> Result<()> {
        if self.handle.is_some() {
            return Err(AppError::lifecycle("worker already started"));
        }
        let state = self
            .state
            .take()
            .ok_or_else(|| AppError::lifecycle("worker already started"))?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        self.shutdown_tx = Some(shutdown_tx);
        self.handle = Some(tokio::spawn(run(state, shutdown_rx)));
        Ok(())
    }

    /// Request cancellation and wait for the processing loop to exit,
    /// up to the shutdown cap. Returns unconditionally after the cap.
    pub async fn stop(&mut self) {
        let handle = match self.handle.take() {
            Some(h) => h,
            None => return,
        };
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(true);
        }
        info!("stopping worker");
        if tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await.is_err() {
            warn!("worker did not acknowledge shutdown in time");
        }
    }
}

/// Main execution loop of the worker.
async fn run(state: WorkerState, mut shutdown: watch::Receiver<bool>) {
    info!("worker started");
    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                debug!("worker stopping");
                return;
            }
            task = state.next_task() => {
                let task = match task {
                    Some(task) => task,
                    None => return,
                };
                let result = state.process_task(task).await;
                let routed = if result.error.is_some() {
                    state.channels.errors.send(result).await
                } else {
                    state.channels.done.send(result).await
                };
                if routed.is_err() {
                    // orchestrator is gone, nothing left to report to
                    return;
                }
            }
        }
    }
}

impl WorkerState {
    async fn next_task(&self) -> Option<Task> {
        self.channels.tasks.lock().await.recv().await
    }

    async fn process_task(&self, mut task: Task) -> TaskResult {
        info!(url = %task.url, tries = task.tries, "processing task");

        // tries must reflect the attempt being made
        task.tries += 1;

        for pre in &self.pre_processors {
            match pre(&mut task) {
                Ok(false) => {}
                Ok(true) => {
                    debug!(url = %task.url, "task ignored");
                    return TaskResult::success(task, HashMap::new());
                }
                Err(e) => return TaskResult::failure(task, e),
            }
        }

        let body = match self.backend.fetch(&task.url).await {
            Ok(body) => body,
            Err(e) => return TaskResult::failure(task, e),
        };

        let children = (self.extractor)(&task.url, &body);
        let mut result = TaskResult::success(task, children);

        for post in &self.post_processors {
            if let Err(e) = post(&mut result) {
                result.error = Some(Arc::new(e));
                return result;
            }
        }

        debug!(url = %result.task.url, children = result.children.len(), "task processed");
        result
    }
}
