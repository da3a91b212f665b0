// src/services/orchestrator.rs

//! Orchestrator: owns all mutable crawl state.
//!
//! The orchestrator decides *what* runs, never *how* fetching happens. It
//! owns the task, done and error queues, the processed/failed registries,
//! the filter chain and the depth/retry policy, and runs a single
//! coordination loop that serialises every state mutation. Quiescence
//! (no task in flight) is detected at the top of each loop iteration and
//! published once per crossing on the idle channel.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::{watch, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Task, TaskResult};
use crate::utils::get_host;

use super::{SharedTaskReceiver, WorkerChannels, SHUTDOWN_TIMEOUT};

/// Custom predicate over candidate URLs. Returning `false` rejects.
pub type Filter = Box<dyn Fn(&str) -> bool + Send + Sync>;

type Registry = Arc<Mutex<HashMap<String, TaskResult>>>;

/// Immutable scheduling policy: depth/retry limits and the filter chain.
struct CrawlPolicy {
    max_retry: usize,
    max_depth: usize,
    exact_host_filters: HashSet<String>,
    subdomain_filters: Vec<String>,
    custom_filters: Vec<Filter>,
}

impl CrawlPolicy {
    /// Decide whether a candidate child URL should be crawled.
    fn apply_filters(&self, url: &str) -> bool {
        if !self.apply_host_filters(url) {
            return false;
        }
        self.custom_filters.iter().all(|f| f(url))
    }

    /// Host gates. The exact-host gate is skipped entirely when its set
    /// is empty, and the subdomain list is consulted only when the
    /// exact-host gate did not reject.
    fn apply_host_filters(&self, url: &str) -> bool {
        let host = get_host(url).unwrap_or_default();
        if !self.exact_host_filters.is_empty() && !self.exact_host_filters.contains(&host) {
            return false;
        }
        if !self.subdomain_filters.is_empty() {
            return self.subdomain_filters.iter().any(|d| host.ends_with(d));
        }
        true
    }
}

/// Builder for [`Orchestrator`].
pub struct OrchestratorBuilder {
    size: usize,
    policy: CrawlPolicy,
}

impl OrchestratorBuilder {
    /// Set the max retry count for each failed task.
    pub fn max_retry(mut self, n: usize) -> Self {
        self.policy.max_retry = n;
        self
    }

    /// Set the max depth of the crawl tree (0 = unlimited).
    pub fn max_depth(mut self, n: usize) -> Self {
        self.policy.max_depth = n;
        self
    }

    /// Whitelist an exact host. Once any host is added, only URLs whose
    /// host is a member are admitted.
    pub fn exact_host_filter(mut self, host: impl Into<String>) -> Self {
        self.policy.exact_host_filters.insert(host.into());
        self
    }

    /// Whitelist a host suffix. Once any suffix is added, only URLs
    /// whose host ends with one of them are admitted.
    pub fn subdomain_filter(mut self, host: impl Into<String>) -> Self {
        self.policy.subdomain_filters.push(host.into());
        self
    }

    /// Add a custom filter, evaluated in registration order.
    pub fn custom_filter(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.policy.custom_filters.push(Box::new(f));
        self
    }

    pub fn build(self) -> Orchestrator {
        let size = self.size.max(1);
        let (task_tx, task_rx) = mpsc::channel(size);
        let (done_tx, done_rx) = mpsc::channel(size);
        let (error_tx, error_rx) = mpsc::channel(size);
        let (idle_tx, idle_rx) = mpsc::channel(1);

        Orchestrator {
            policy: Some(self.policy),
            task_tx,
            tasks: Arc::new(Mutex::new(task_rx)),
            done_tx,
            done_rx: Some(done_rx),
            error_tx,
            error_rx: Some(error_rx),
            processed: Arc::new(Mutex::new(HashMap::new())),
            failed: Arc::new(Mutex::new(HashMap::new())),
            idle_tx,
            idle_rx,
            shutdown_tx: None,
            handle: None,
        }
    }
}

/// Manages the crawler state and workload.
pub struct Orchestrator {
    // scheduling policy, moved into the coordination loop on start
    policy: Option<CrawlPolicy>,

    // outbound task channel with tasks to be processed
    task_tx: mpsc::Sender<Task>,
    tasks: SharedTaskReceiver,
    // inbound channel with tasks that were processed
    done_tx: mpsc::Sender<TaskResult>,
    done_rx: Option<mpsc::Receiver<TaskResult>>,
    // inbound channel with tasks that failed to be processed
    error_tx: mpsc::Sender<TaskResult>,
    error_rx: Option<mpsc::Receiver<TaskResult>>,

    // terminal registries, written only by the coordination loop
    processed: Registry,
    failed: Registry,

    // quiescence notifications
    idle_tx: mpsc::Sender<()>,
    idle_rx: mpsc::Receiver<()>,

    // graceful shutdown
    shutdown_tx: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

impl Orchestrator {
    /// Start building an orchestrator whose channels hold `size` entries.
    pub fn builder(size: usize) -> OrchestratorBuilder {
        OrchestratorBuilder {
            size,
            policy: CrawlPolicy {
                max_retry: 3,
                max_depth: 0,
                exact_host_filters: HashSet::new(),
                subdomain_filters: Vec::new(),
                custom_filters: Vec::new(),
            },
        }
    }

    /// Enqueue the seed and launch the coordination loop in the
    /// background. Fails if the orchestrator was already started.
    pub fn start(&mut self, seed: &str) -> Result<()> {
        if self.handle.is_some() {
            return Err(AppError::lifecycle("orchestrator already started"));
        }
        let policy = self
            .policy
            .take()
            .ok_or_else(|| AppError::lifecycle("orchestrator already started"))?;
        let done_rx = self
            .done_rx
            .take()
            .ok_or_else(|| AppError::lifecycle("orchestrator already started"))?;
        let error_rx = self
            .error_rx
            .take()
            .ok_or_else(|| AppError::lifecycle("orchestrator already started"))?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut crawl = CrawlLoop {
            policy,
            task_tx: self.task_tx.clone(),
            done_rx,
            error_rx,
            processed: Arc::clone(&self.processed),
            failed: Arc::clone(&self.failed),
            idle_tx: self.idle_tx.clone(),
            shutdown: shutdown_rx,
            in_flight: 0,
            overflow: VecDeque::new(),
            scheduled: HashSet::new(),
        };

        // the seed enters the frontier before the loop runs, so the
        // quiescence check cannot fire before any work exists
        crawl.queue_url(seed, 0);

        self.shutdown_tx = Some(shutdown_tx);
        self.handle = Some(tokio::spawn(crawl.run()));
        Ok(())
    }

    /// Request cancellation of the coordination loop and wait for it to
    /// exit, up to the shutdown cap. Returns unconditionally after the cap.
    pub async fn stop(&mut self) {
        let handle = match self.handle.take() {
            Some(h) => h,
            None => return,
        };
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(true);
        }
        info!("stopping orchestrator");
        if tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await.is_err() {
            warn!("orchestrator did not acknowledge shutdown in time");
        }
    }

    /// Wait until the crawl reaches quiescence: no task on the queue and
    /// no result pending.
    pub async fn wait(&mut self) {
        let _ = self.idle_rx.recv().await;
    }

    /// Channel endpoints for a worker joining this crawl.
    pub fn worker_channels(&self) -> WorkerChannels {
        WorkerChannels {
            tasks: Arc::clone(&self.tasks),
            done: self.done_tx.clone(),
            errors: self.error_tx.clone(),
        }
    }

    /// Successfully crawled tasks, keyed by URL. Intended to be read
    /// after the crawl has stopped.
    pub async fn processed(&self) -> MutexGuard<'_, HashMap<String, TaskResult>> {
        self.processed.lock().await
    }

    /// Terminally failed tasks, keyed by URL. Intended to be read after
    /// the crawl has stopped.
    pub async fn failed(&self) -> MutexGuard<'_, HashMap<String, TaskResult>> {
        self.failed.lock().await
    }

    /// The crawled pages: each processed URL mapped to its outbound
    /// links and their counts.
    pub async fn hits(&self) -> HashMap<String, HashMap<String, usize>> {
        self.processed
            .lock()
            .await
            .iter()
            .map(|(url, result)| (url.clone(), result.children.clone()))
            .collect()
    }

    /// JSON encoding of [`hits`](Self::hits).
    pub async fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.hits().await)?)
    }
}

/// The coordination loop. Sole owner of the in-flight counter and sole
/// writer of the registries while it runs.
struct CrawlLoop {
    policy: CrawlPolicy,
    task_tx: mpsc::Sender<Task>,
    done_rx: mpsc::Receiver<TaskResult>,
    error_rx: mpsc::Receiver<TaskResult>,
    processed: Registry,
    failed: Registry,
    idle_tx: mpsc::Sender<()>,
    shutdown: watch::Receiver<bool>,

    // tasks published whose outcome has not yet been observed
    in_flight: usize,
    // tasks that did not fit on the task queue, drained as capacity frees
    overflow: VecDeque<Task>,
    // every URL ever scheduled; a page discovered by many parents still
    // gets exactly one task, so it can land in at most one registry
    scheduled: HashSet<String>,
}

impl CrawlLoop {
    async fn run(mut self) {
        info!("orchestrator started");
        loop {
            self.drain_overflow();

            if self.in_flight == 0 {
                // one notification per quiescence crossing; stay
                // responsive to shutdown while the consumer catches up
                tokio::select! {
                    _ = self.shutdown.changed() => {
                        info!("orchestrator stopping");
                        return;
                    }
                    _ = self.idle_tx.send(()) => {}
                }
            }

            tokio::select! {
                _ = self.shutdown.changed() => {
                    info!("orchestrator stopping");
                    return;
                }
                Some(result) = self.done_rx.recv() => self.handle_done(result).await,
                Some(result) = self.error_rx.recv() => self.handle_failed(result).await,
            }
        }
    }

    /// Record a successfully processed task and schedule its children.
    async fn handle_done(&mut self, result: TaskResult) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let url = result.task.url.to_string();
        let depth = result.task.depth;
        debug!(url = %url, "recording processed task");

        let fresh: Vec<String>;
        {
            let mut processed = self.processed.lock().await;
            let children: Vec<String> = result.children.keys().cloned().collect();
            // insertion-only: the first result for a URL wins
            processed.entry(url).or_insert(result);
            fresh = children
                .into_iter()
                .filter(|child| !processed.contains_key(child))
                .collect();
        }

        for child in fresh {
            if self.policy.apply_filters(&child) {
                self.queue_url(&child, depth + 1);
            }
        }
    }

    /// Retry a failed task, or bury it once its tries are exhausted.
    async fn handle_failed(&mut self, result: TaskResult) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if result.task.tries > self.policy.max_retry {
            warn!(url = %result.task.url, tries = result.task.tries, "task failed permanently");
            self.failed
                .lock()
                .await
                .insert(result.task.url.to_string(), result);
            return;
        }

        debug!(url = %result.task.url, tries = result.task.tries, "retrying task");
        // the task keeps its tries so the next attempt counts on top
        self.publish(result.task);
    }

    /// Create a task for a discovered URL and schedule it, unless the
    /// URL was already scheduled by an earlier discovery.
    fn queue_url(&mut self, url: &str, depth: usize) {
        if self.policy.max_depth != 0 && depth > self.policy.max_depth {
            return;
        }
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return,
        };
        if !self.scheduled.insert(parsed.to_string()) {
            return;
        }
        self.publish(Task::new(parsed, depth));
    }

    /// Publish a task and account it as in flight. Never blocks: a full
    /// task queue overflows into the loop-owned buffer.
    fn publish(&mut self, task: Task) {
        match self.task_tx.try_send(task) {
            Ok(()) => self.in_flight += 1,
            Err(TrySendError::Full(task)) => {
                self.overflow.push_back(task);
                self.in_flight += 1;
            }
            Err(TrySendError::Closed(_)) => {}
        }
    }

    /// Move overflowed tasks back onto the task queue while it has room.
    fn drain_overflow(&mut self) {
        while let Some(task) = self.overflow.pop_front() {
            match self.task_tx.try_send(task) {
                Ok(()) => {}
                Err(TrySendError::Full(task)) => {
                    self.overflow.push_front(task);
                    return;
                }
                Err(TrySendError::Closed(_)) => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    /// Receive the next task the way a worker would.
    async fn next_task(channels: &WorkerChannels) -> Task {
        let mut tasks = channels.tasks.lock().await;
        tokio::time::timeout(Duration::from_secs(1), tasks.recv())
            .await
            .expect("task not received")
            .expect("task queue closed")
    }

    async fn no_pending_task(channels: &WorkerChannels) -> bool {
        channels.tasks.lock().await.try_recv().is_err()
    }

    async fn wait_done(o: &mut Orchestrator) {
        tokio::time::timeout(Duration::from_secs(2), o.wait())
            .await
            .expect("crawl did not quiesce");
    }

    /// Play worker: attempt the expected task and report a success with
    /// the given children.
    async fn complete(
        channels: &WorkerChannels,
        expected_url: &str,
        expected_depth: usize,
        children: &[(&str, usize)],
    ) {
        let mut task = next_task(channels).await;
        assert_eq!(task.url, parse(expected_url));
        assert_eq!(task.depth, expected_depth);
        assert_eq!(task.tries, 0);

        task.tries += 1;
        let children = children
            .iter()
            .map(|(url, count)| (url.to_string(), *count))
            .collect();
        channels
            .done
            .send(TaskResult::success(task, children))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_crawl_records_processed_pages() {
        let mut o = Orchestrator::builder(16).build();
        let channels = o.worker_channels();
        o.start("http://google.com").unwrap();

        complete(&channels, "http://google.com", 0, &[("http://google.com/1", 1)]).await;
        // the second page links back to the seed, which is already
        // processed and must not be re-enqueued (children carry the
        // normalized form the extractor produces)
        complete(&channels, "http://google.com/1", 1, &[("http://google.com/", 1)]).await;

        wait_done(&mut o).await;
        assert!(no_pending_task(&channels).await);

        let processed = o.processed().await;
        assert_eq!(processed.len(), 2);
        let seed = &processed["http://google.com/"];
        assert_eq!(seed.task.tries, 1);
        assert_eq!(seed.children.get("http://google.com/1"), Some(&1));
        let page1 = &processed["http://google.com/1"];
        assert_eq!(page1.task.depth, 1);
        drop(processed);

        assert!(o.failed().await.is_empty());
        o.stop().await;
    }

    #[tokio::test]
    async fn test_exact_host_filter_rejects_other_hosts() {
        let mut o = Orchestrator::builder(16)
            .exact_host_filter("google.com")
            .build();
        let channels = o.worker_channels();
        o.start("http://google.com").unwrap();

        complete(&channels, "http://google.com", 0, &[("http://google.com/1", 1)]).await;
        complete(
            &channels,
            "http://google.com/1",
            1,
            &[("http://docs.google.com", 1)],
        )
        .await;

        wait_done(&mut o).await;
        assert!(no_pending_task(&channels).await);
        assert_eq!(o.processed().await.len(), 2);
        o.stop().await;
    }

    #[tokio::test]
    async fn test_exact_host_filter_admits_members() {
        let mut o = Orchestrator::builder(16)
            .exact_host_filter("google.com")
            .exact_host_filter("docs.google.com")
            .build();
        let channels = o.worker_channels();
        o.start("http://google.com").unwrap();

        complete(
            &channels,
            "http://google.com",
            0,
            &[("http://docs.google.com", 1)],
        )
        .await;
        complete(&channels, "http://docs.google.com", 1, &[]).await;

        wait_done(&mut o).await;
        assert_eq!(o.processed().await.len(), 2);
        o.stop().await;
    }

    #[tokio::test]
    async fn test_subdomain_filter() {
        let mut o = Orchestrator::builder(16)
            .subdomain_filter("google.com")
            .build();
        let channels = o.worker_channels();
        o.start("http://google.com").unwrap();

        complete(
            &channels,
            "http://google.com",
            0,
            &[("http://docs.google.com", 1)],
        )
        .await;
        // google.fail.com does not end with the suffix and is rejected
        complete(
            &channels,
            "http://docs.google.com",
            1,
            &[("http://google.fail.com/1", 1)],
        )
        .await;

        wait_done(&mut o).await;
        assert!(no_pending_task(&channels).await);
        assert_eq!(o.processed().await.len(), 2);
        o.stop().await;
    }

    #[tokio::test]
    async fn test_custom_filter_rejects() {
        let mut o = Orchestrator::builder(16)
            .custom_filter(|url| !url.contains("skip"))
            .build();
        let channels = o.worker_channels();
        o.start("http://google.com").unwrap();

        complete(
            &channels,
            "http://google.com",
            0,
            &[("http://google.com/skip", 1), ("http://google.com/keep", 1)],
        )
        .await;
        complete(&channels, "http://google.com/keep", 1, &[]).await;

        wait_done(&mut o).await;
        assert_eq!(o.processed().await.len(), 2);
        o.stop().await;
    }

    #[tokio::test]
    async fn test_depth_cap_drops_deep_children() {
        let mut o = Orchestrator::builder(16).max_depth(1).build();
        let channels = o.worker_channels();
        o.start("http://google.com").unwrap();

        complete(&channels, "http://google.com", 0, &[("http://google.com/1", 1)]).await;
        // children at depth 2 exceed the cap and are dropped at enqueue
        complete(&channels, "http://google.com/1", 1, &[("http://google.com/2", 1)]).await;

        wait_done(&mut o).await;
        assert!(no_pending_task(&channels).await);
        assert_eq!(o.processed().await.len(), 2);
        o.stop().await;
    }

    #[tokio::test]
    async fn test_retry_until_exhaustion() {
        let mut o = Orchestrator::builder(16).max_retry(1).build();
        let channels = o.worker_channels();
        o.start("http://google.com").unwrap();

        complete(&channels, "http://google.com", 0, &[("http://google.com/1", 1)]).await;

        // first attempt fails
        let mut task = next_task(&channels).await;
        assert_eq!(task.tries, 0);
        task.tries += 1;
        channels
            .errors
            .send(TaskResult::failure(task, AppError::processor("boom")))
            .await
            .unwrap();

        // the retry preserves the incremented tries counter
        let mut task = next_task(&channels).await;
        assert_eq!(task.url, parse("http://google.com/1"));
        assert_eq!(task.tries, 1);
        task.tries += 1;
        channels
            .errors
            .send(TaskResult::failure(task, AppError::processor("boom")))
            .await
            .unwrap();

        wait_done(&mut o).await;

        let failed = o.failed().await;
        assert_eq!(failed.len(), 1);
        let buried = &failed["http://google.com/1"];
        assert_eq!(buried.task.tries, 2);
        assert!(buried.error.is_some());
        drop(failed);

        let processed = o.processed().await;
        assert_eq!(processed.len(), 1);
        assert!(processed.contains_key("http://google.com/"));
        drop(processed);
        o.stop().await;
    }

    #[tokio::test]
    async fn test_racing_parents_schedule_shared_child_once() {
        let mut o = Orchestrator::builder(16).max_retry(0).build();
        let channels = o.worker_channels();
        o.start("http://google.com").unwrap();

        complete(
            &channels,
            "http://google.com",
            0,
            &[("http://google.com/a", 1), ("http://google.com/b", 1)],
        )
        .await;

        // both siblings discover the same child, and both results land
        // before the child is attempted
        let mut first = next_task(&channels).await;
        let mut second = next_task(&channels).await;
        first.tries += 1;
        second.tries += 1;
        let shared: HashMap<String, usize> =
            [("http://google.com/shared".to_string(), 1)].into();
        channels
            .done
            .send(TaskResult::success(first, shared.clone()))
            .await
            .unwrap();
        channels
            .done
            .send(TaskResult::success(second, shared))
            .await
            .unwrap();

        // exactly one task is published for the shared child; fail it
        let mut task = next_task(&channels).await;
        assert_eq!(task.url, parse("http://google.com/shared"));
        task.tries += 1;
        channels
            .errors
            .send(TaskResult::failure(task, AppError::processor("boom")))
            .await
            .unwrap();

        wait_done(&mut o).await;
        assert!(no_pending_task(&channels).await);

        // the shared child lands in exactly one registry
        let processed = o.processed().await;
        let failed = o.failed().await;
        assert!(failed.contains_key("http://google.com/shared"));
        assert!(!processed.contains_key("http://google.com/shared"));
        assert_eq!(failed.len(), 1);
        assert_eq!(processed.len(), 3);
        drop(processed);
        drop(failed);
        o.stop().await;
    }

    #[tokio::test]
    async fn test_overflow_keeps_the_loop_unblocked() {
        // a single-slot task queue forces every burst of children
        // through the overflow buffer
        let mut o = Orchestrator::builder(1).build();
        let channels = o.worker_channels();
        o.start("http://google.com").unwrap();

        complete(
            &channels,
            "http://google.com",
            0,
            &[
                ("http://google.com/1", 1),
                ("http://google.com/2", 1),
                ("http://google.com/3", 1),
            ],
        )
        .await;

        for _ in 0..3 {
            let mut task = next_task(&channels).await;
            assert_eq!(task.depth, 1);
            task.tries += 1;
            channels
                .done
                .send(TaskResult::success(task, HashMap::new()))
                .await
                .unwrap();
        }

        wait_done(&mut o).await;
        assert_eq!(o.processed().await.len(), 4);
        o.stop().await;
    }

    #[tokio::test]
    async fn test_unparseable_seed_quiesces_immediately() {
        let mut o = Orchestrator::builder(16).build();
        o.start("not a url").unwrap();

        wait_done(&mut o).await;
        assert!(o.processed().await.is_empty());
        o.stop().await;
    }

    #[tokio::test]
    async fn test_double_start_fails() {
        let mut o = Orchestrator::builder(16).build();
        o.start("http://google.com").unwrap();
        assert!(matches!(
            o.start("http://google.com"),
            Err(AppError::Lifecycle(_))
        ));
        o.stop().await;
    }

    #[tokio::test]
    async fn test_stop_without_start_returns() {
        let mut o = Orchestrator::builder(16).build();
        o.stop().await;
    }

    #[tokio::test]
    async fn test_to_json_round_trips() {
        let mut o = Orchestrator::builder(16).build();
        let channels = o.worker_channels();
        o.start("http://google.com").unwrap();

        complete(&channels, "http://google.com", 0, &[]).await;
        wait_done(&mut o).await;
        o.stop().await;

        let json = o.to_json().await.unwrap();
        let hits: HashMap<String, HashMap<String, usize>> =
            serde_json::from_str(&json).unwrap();
        assert!(hits.contains_key("http://google.com/"));
    }

    fn policy(
        exact: &[&str],
        subdomains: &[&str],
        custom: Vec<Filter>,
    ) -> CrawlPolicy {
        CrawlPolicy {
            max_retry: 3,
            max_depth: 0,
            exact_host_filters: exact.iter().map(|s| s.to_string()).collect(),
            subdomain_filters: subdomains.iter().map(|s| s.to_string()).collect(),
            custom_filters: custom,
        }
    }

    #[test]
    fn test_filters_empty_configuration_admits_all() {
        let p = policy(&[], &[], Vec::new());
        assert!(p.apply_filters("http://anything.example/x"));
    }

    #[test]
    fn test_filters_exact_host_gate() {
        let p = policy(&["google.com"], &[], Vec::new());
        assert!(p.apply_filters("http://google.com/1"));
        assert!(!p.apply_filters("http://docs.google.com/1"));
    }

    #[test]
    fn test_filters_subdomain_suffix_gate() {
        let p = policy(&[], &["google.com"], Vec::new());
        assert!(p.apply_filters("http://docs.google.com/1"));
        assert!(!p.apply_filters("http://google.fail.com/1"));
    }

    #[test]
    fn test_filters_exact_rejection_shadows_subdomains() {
        // a non-empty exact-host set that rejects is final: the
        // subdomain list is never consulted
        let p = policy(&["a.com"], &["b.com"], Vec::new());
        assert!(!p.apply_filters("http://b.com/1"));
        assert!(!p.apply_filters("http://a.com/1"));
    }

    #[test]
    fn test_filters_custom_run_in_order() {
        let p = policy(
            &[],
            &[],
            vec![
                Box::new(|u: &str| u.starts_with("http")),
                Box::new(|u: &str| !u.contains("admin")),
            ],
        );
        assert!(p.apply_filters("http://google.com/1"));
        assert!(!p.apply_filters("http://google.com/admin"));
        assert!(!p.apply_filters("ftp://google.com/1"));
    }
}
