//! Scheduler: fan out all source tasks, collect every outcome.
//!
//! [`run_all`] launches the full task list at once and lets the shared
//! [`AdmissionGate`] — not the stream — decide how many make network
//! progress simultaneously. Tasks contain their own failures (see
//! [`SourceTask::run`](crate::scrapers::SourceTask::run)), so the batch
//! always completes: a source that failed contributes zero records, which is
//! indistinguishable from a source that legitimately had no matches.
//!
//! The context bundle holds the only process-wide mutable state of a run:
//! the transport's connection pool, the rate limiter's last-turn timestamp,
//! and the gate's permit counter.

use crate::gate::AdmissionGate;
use crate::limiter::RateLimiter;
use crate::models::Book;
use crate::scrapers::SourceTask;
use crate::transport::Fetch;
use futures::stream::{self, StreamExt};
use tracing::{info, instrument};

/// Shared infrastructure handed to every task of one run.
#[derive(Debug)]
pub struct ScrapeContext<F> {
    /// Pooled network client, shared by all tasks.
    pub transport: F,
    /// Global inter-request pacing.
    pub limiter: RateLimiter,
    /// Concurrency cap on in-flight tasks.
    pub gate: AdmissionGate,
}

/// Run every task concurrently and concatenate their records.
///
/// Completion order between tasks is unspecified, but each task's own
/// emission order is preserved and cross-task results are concatenated as
/// tasks finish. No task failure aborts the batch.
#[instrument(level = "info", skip_all, fields(task_count = tasks.len()))]
pub async fn run_all<F: Fetch>(tasks: Vec<SourceTask>, ctx: &ScrapeContext<F>) -> Vec<Book> {
    let launch_width = tasks.len().max(1);

    let books: Vec<Book> = stream::iter(tasks)
        .map(|task| async move { task.run(ctx).await })
        .buffer_unordered(launch_width)
        .collect::<Vec<Vec<Book>>>()
        .await
        .into_iter()
        .flatten()
        .collect();

    info!(count = books.len(), "All tasks complete");
    books
}
