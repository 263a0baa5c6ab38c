//! Bounded parallel task runner: fans independent generation tasks out across
//! a fixed-size worker pool and collects one result per task in completion
//! order. Owns the concurrency bound and failure isolation; what a task
//! actually does stays behind the `TaskInvoker` seam.

use crate::error::GenerateError;
use crate::provider::AspectRatio;
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// One unit of work: generate one asset. Immutable once built; the runner
/// never mutates or deduplicates descriptors, so (zone, item_id) must be
/// unique within a run unless overwriting is acceptable.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    /// Zone slug, the grouping key
    pub zone: String,
    /// Identifier unique within the zone; also the output filename stem
    pub item_id: String,
    pub prompt: String,
    pub aspect: AspectRatio,
    /// Reference image for style transfer, if any
    pub reference: Option<PathBuf>,
    /// Directory the asset is written into; created if absent
    pub destination: PathBuf,
}

/// Outcome of one task. Failure is a value here, not an exception: the error
/// text travels to the summary and never aborts sibling tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success { output_path: PathBuf },
    Failure { error: String },
}

/// One result per task, correlated by the (zone, item_id) pair. Completion
/// order, not submission order.
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub zone: String,
    pub item_id: String,
    pub outcome: TaskOutcome,
}

impl TaskResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, TaskOutcome::Success { .. })
    }
}

/// Capability that turns one task into one written asset.
#[async_trait]
pub trait TaskInvoker: Send + Sync + 'static {
    async fn invoke(&self, task: &TaskSpec) -> Result<PathBuf, GenerateError>;
}

/// Observer notified as results arrive, so the CLI can print inline markers
/// while the run proceeds. Default implementation ignores everything.
pub trait RunObserver: Send + Sync {
    fn task_finished(&self, _result: &TaskResult) {}
}

struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Executes a set of tasks with at most `max_concurrency` invocations in
/// flight. Produces exactly one result per input task.
pub struct TaskRunner {
    max_concurrency: usize,
    observer: Arc<dyn RunObserver>,
}

impl TaskRunner {
    pub const DEFAULT_CONCURRENCY: usize = 5;

    pub fn new(max_concurrency: usize) -> Self {
        Self::with_observer(max_concurrency, Arc::new(NoopObserver))
    }

    pub fn with_observer(max_concurrency: usize, observer: Arc<dyn RunObserver>) -> Self {
        Self {
            // a zero bound would deadlock the semaphore
            max_concurrency: max_concurrency.max(1),
            observer,
        }
    }

    /// Run every task to completion and return one result per task, in
    /// completion order. Invoker errors and panics become Failure results;
    /// nothing a single task does can abort the run.
    pub async fn run<I: TaskInvoker>(&self, invoker: Arc<I>, tasks: Vec<TaskSpec>) -> Vec<TaskResult> {
        let total = tasks.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut in_flight = FuturesUnordered::new();

        for task in tasks {
            let semaphore = Arc::clone(&semaphore);
            let invoker = Arc::clone(&invoker);
            in_flight.push(async move {
                let zone = task.zone.clone();
                let item_id = task.item_id.clone();

                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        tracing::debug!(zone = %zone, item = %item_id, "task started");
                        // spawn so a panicking invoker surfaces as a JoinError
                        // instead of tearing down the whole run
                        let handle = tokio::spawn(async move { invoker.invoke(&task).await });
                        match handle.await {
                            Ok(Ok(output_path)) => TaskOutcome::Success { output_path },
                            Ok(Err(err)) => TaskOutcome::Failure {
                                error: err.to_string(),
                            },
                            Err(join_err) => TaskOutcome::Failure {
                                error: format!("invoker panicked: {}", join_err),
                            },
                        }
                    }
                    // the semaphore is never closed while the run is alive
                    Err(_) => TaskOutcome::Failure {
                        error: "worker pool closed before task could start".to_string(),
                    },
                };

                TaskResult {
                    zone,
                    item_id,
                    outcome,
                }
            });
        }

        let mut results = Vec::with_capacity(total);
        while let Some(result) = in_flight.next().await {
            match &result.outcome {
                TaskOutcome::Success { output_path } => {
                    tracing::info!(zone = %result.zone, item = %result.item_id, path = %output_path.display(), "task succeeded");
                }
                TaskOutcome::Failure { error } => {
                    tracing::warn!(zone = %result.zone, item = %result.item_id, error = %error, "task failed");
                }
            }
            self.observer.task_finished(&result);
            results.push(result);
        }
        results
    }
}
