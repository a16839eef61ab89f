#![forbid(unsafe_code)]

//! Disposable subscriptions and the scope that owns them.
//!
//! # Design
//!
//! A [`Subscription`] holds a one-shot teardown closure. Disposing it (either
//! explicitly via [`Subscription::dispose`] or implicitly on drop) runs the
//! teardown exactly once; later calls are no-ops.
//!
//! A [`SubscriptionScope`] owns every subscription belonging to one binding.
//! [`SubscriptionScope::reset`] empties it in one step so a control never
//! holds subscriptions from two different bindings at once.
//!
//! # Failure Modes
//!
//! - **Panicking teardown**: the teardown is taken out of the guard before it
//!   runs, so a panic leaves the subscription marked disposed.
//! - **Add after dispose**: adding to a disposed scope disposes the incoming
//!   subscription immediately rather than leaking it.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

type Teardown = Box<dyn FnOnce() + Send>;

/// RAII guard for a live subscription.
///
/// Dropping the guard disposes it.
pub struct Subscription {
    teardown: Mutex<Option<Teardown>>,
}

impl Subscription {
    /// Create a subscription that runs `teardown` when disposed.
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            teardown: Mutex::new(Some(Box::new(teardown))),
        }
    }

    /// A subscription with nothing to tear down. Reports as disposed.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            teardown: Mutex::new(None),
        }
    }

    /// Run the teardown if it has not run yet.
    pub fn dispose(&self) {
        let teardown = self
            .teardown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    /// Whether the teardown has already run (or there never was one).
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.teardown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

struct ScopeInner {
    live: Vec<Subscription>,
    generation: u64,
    disposed: bool,
}

/// Owning container for all subscriptions of one binding.
///
/// # Invariants
///
/// 1. After [`reset`](Self::reset) returns, every subscription added before
///    the call has been disposed and the scope is empty.
/// 2. `generation` increments by exactly 1 per `reset`.
/// 3. Subscriptions are disposed in insertion order.
/// 4. `reset` and `dispose` are idempotent on an empty scope.
pub struct SubscriptionScope {
    inner: Mutex<ScopeInner>,
}

impl Default for SubscriptionScope {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionScope {
    /// Create an empty, live scope at generation 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ScopeInner {
                live: Vec::new(),
                generation: 0,
                disposed: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ScopeInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take ownership of `subscription`.
    ///
    /// If the scope has been disposed, the subscription is disposed at once.
    pub fn add(&self, subscription: Subscription) {
        let rejected = {
            let mut inner = self.lock();
            if inner.disposed {
                Some(subscription)
            } else {
                inner.live.push(subscription);
                None
            }
        };
        if let Some(subscription) = rejected {
            subscription.dispose();
        }
    }

    /// Dispose every held subscription and start a new generation.
    ///
    /// The scope stays usable afterwards.
    pub fn reset(&self) {
        let drained = {
            let mut inner = self.lock();
            inner.generation += 1;
            std::mem::take(&mut inner.live)
        };
        // Teardowns run outside the lock so they may touch the scope.
        for subscription in &drained {
            subscription.dispose();
        }
    }

    /// Dispose every held subscription and reject future ones.
    pub fn dispose(&self) {
        let drained = {
            let mut inner = self.lock();
            inner.disposed = true;
            std::mem::take(&mut inner.live)
        };
        for subscription in &drained {
            subscription.dispose();
        }
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }

    /// Number of resets so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }
}

impl Drop for SubscriptionScope {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for SubscriptionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("SubscriptionScope")
            .field("len", &inner.live.len())
            .field("generation", &inner.generation)
            .field("disposed", &inner.disposed)
            .finish()
    }
}
