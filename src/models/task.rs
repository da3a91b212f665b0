// src/models/task.rs

use std::collections::HashMap;
use std::sync::Arc;

use url::Url;

use crate::error::AppError;

/// A unit of crawl work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Absolute URL to fetch.
    pub url: Url,
    /// Distance in hops from the seed (seed = 0).
    pub depth: usize,
    /// Fetch attempts already performed on this task.
    pub tries: usize,
}

impl Task {
    /// Create a fresh task with no attempts recorded.
    pub fn new(url: Url, depth: usize) -> Self {
        Self {
            url,
            depth,
            tries: 0,
        }
    }
}

/// The outcome of attempting a task.
///
/// `task` is the task as it stood after the attempt, so `tries` reflects
/// the attempt that just ran.
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub task: Task,
    /// Outbound links found on the page, keyed by absolute URL string,
    /// with their occurrence counts. Empty on failure.
    pub children: HashMap<String, usize>,
    /// Present iff the attempt failed.
    pub error: Option<Arc<AppError>>,
}

impl TaskResult {
    /// A successful result carrying the extracted children.
    pub fn success(task: Task, children: HashMap<String, usize>) -> Self {
        Self {
            task,
            children,
            error: None,
        }
    }

    /// A failed result with no children.
    pub fn failure(task: Task, error: AppError) -> Self {
        Self {
            task,
            children: HashMap::new(),
            error: Some(Arc::new(error)),
        }
    }
}
