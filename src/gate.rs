//! Admission gate: a counting semaphore capping in-flight fetches.
//!
//! Every source task acquires a permit before doing any network work and
//! holds it until its records are produced. The permit is an RAII guard, so
//! release happens on every exit path — success, fetch error, or parse
//! failure — with no explicit bookkeeping at the call sites.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Bounds the number of concurrently in-flight source tasks.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    permits: Arc<Semaphore>,
}

impl AdmissionGate {
    /// Create a gate admitting at most `max_concurrent` holders at a time.
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Acquire a slot, suspending until one is free.
    ///
    /// The returned permit releases the slot when dropped. Acquisition never
    /// fails: the semaphore is owned by the gate and is never closed.
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        self.permits
            .clone()
            .acquire_owned()
            .await
            .expect("admission gate semaphore is never closed")
    }

    /// Number of currently free slots.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_permit_released_on_drop() {
        let gate = AdmissionGate::new(2);
        assert_eq!(gate.available(), 2);
        {
            let _permit = gate.acquire().await;
            assert_eq!(gate.available(), 1);
        }
        assert_eq!(gate.available(), 2);
    }

    #[tokio::test]
    async fn test_never_more_than_cap_holders() {
        let gate = AdmissionGate::new(3);
        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..12 {
            let gate = gate.clone();
            let current = Arc::clone(&current);
            let peak = Arc::clone(&peak);
            handles.push(tokio::spawn(async move {
                let _permit = gate.acquire().await;
                let held = current.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(held, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                current.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(gate.available(), 3);
    }
}
