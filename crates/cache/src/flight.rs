//! Single-flight request coalescing
//!
//! Guarantees that for any key at most one load is in flight within the
//! process. Every caller that arrives while a load is executing suspends on
//! the in-flight call record and receives the same result, success or
//! failure, as the caller that started it. Records are removed as soon as
//! the load completes, so a later call always runs the loader fresh and
//! failures are never cached.

use meshcache_core::Result;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Notify;

/// One in-flight (or just-completed) load.
struct Call<T> {
    outcome: OnceCell<Result<T>>,
    done: Notify,
}

impl<T: Clone> Call<T> {
    fn new() -> Self {
        Self {
            outcome: OnceCell::new(),
            done: Notify::new(),
        }
    }

    /// Publish the result, then wake every waiter. The store happens
    /// before the wake, so a woken waiter always observes the outcome.
    fn complete(&self, outcome: Result<T>) {
        self.outcome.set(outcome).ok();
        self.done.notify_waiters();
    }

    async fn wait(&self) -> Result<T> {
        loop {
            let notified = self.done.notified();
            tokio::pin!(notified);
            // register for the wakeup before checking, so a completion
            // racing this check cannot be missed
            notified.as_mut().enable();
            if let Some(outcome) = self.outcome.get() {
                return outcome.clone();
            }
            notified.await;
        }
    }
}

/// Deduplicates concurrent loads per key.
///
/// Memory is proportional to the number of distinct keys currently being
/// loaded, not to the number of waiters.
pub struct FlightGroup<T> {
    pending: Mutex<HashMap<String, Arc<Call<T>>>>,
}

impl<T: Clone> FlightGroup<T> {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Run `load` for `key`, or join a load already in flight.
    ///
    /// The pending-map lock is only held to admit or register the caller;
    /// the load itself runs outside it, so loads for different keys never
    /// serialize on each other.
    pub async fn run<F, Fut>(&self, key: &str, load: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let (call, leader) = {
            let mut pending = self.pending.lock();
            match pending.get(key) {
                Some(existing) => (Arc::clone(existing), false),
                None => {
                    let call = Arc::new(Call::new());
                    pending.insert(key.to_owned(), Arc::clone(&call));
                    (call, true)
                }
            }
        };

        if !leader {
            return call.wait().await;
        }

        let outcome = load().await;
        call.complete(outcome.clone());
        self.pending.lock().remove(key);
        outcome
    }

    /// Number of keys with a load currently in flight
    pub fn in_flight(&self) -> usize {
        self.pending.lock().len()
    }
}

impl<T: Clone> Default for FlightGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}
