//! Bounded fan-out/fan-in task groups.
//!
//! Each concurrency tier (domains, providers, MXToolbox tools) runs its work
//! through [`run_bounded`]: one spawned task per item, at most `limit` running
//! at once, results returned in input order once every task has finished.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinError;

use crate::initialization::init_semaphore;

/// Runs `task` for every item with at most `limit` tasks in flight.
///
/// A task that panics yields `Err(JoinError)` in its slot without affecting
/// its siblings. The returned vector is aligned with `items`.
pub async fn run_bounded<I, F, Fut, T>(
    items: Vec<I>,
    limit: usize,
    task: F,
) -> Vec<Result<T, JoinError>>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let semaphore = init_semaphore(limit.max(1));

    let handles: Vec<_> = items
        .into_iter()
        .map(|item| {
            let semaphore = Arc::clone(&semaphore);
            let work = task(item);
            tokio::spawn(async move {
                // The semaphore is never closed, so acquisition only waits.
                let _permit = semaphore.acquire_owned().await.ok();
                work.await
            })
        })
        .collect();

    futures::future::join_all(handles).await
}

/// Human-readable description of a task that did not complete.
pub fn describe_join_error(error: &JoinError) -> String {
    if error.is_cancelled() {
        return "task was cancelled".to_string();
    }
    format!("task panicked: {error}")
}
