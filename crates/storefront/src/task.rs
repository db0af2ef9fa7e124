//! Background tasks tied to the lifetime of their owner.

use std::future::Future;

use tokio::task::JoinHandle;

/// A spawned task that is aborted when the guard is dropped.
///
/// Owners (a chat session, a carousel on screen) hold the guard; once the
/// owner goes away the task stops at its next await point and never touches
/// shared state again.
#[derive(Debug)]
pub struct TaskGuard {
    handle: Option<JoinHandle<()>>,
}

impl TaskGuard {
    /// Spawn `future` on the current runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(future)),
        }
    }

    /// Whether the task has run to completion (or was aborted).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the task to finish.
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
            && e.is_panic()
        {
            tracing::error!(error = %e, "Background task panicked");
        }
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_join_runs_to_completion() {
        let done = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&done);
        let guard = TaskGuard::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            flag.store(true, Ordering::SeqCst);
        });
        assert!(!guard.is_finished());
        guard.join().await;
        assert!(done.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts() {
        let done = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&done);
        let guard = TaskGuard::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            flag.store(true, Ordering::SeqCst);
        });
        drop(guard);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!done.load(Ordering::SeqCst));
    }
}
