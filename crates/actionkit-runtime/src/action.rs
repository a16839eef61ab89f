#![forbid(unsafe_code)]

//! The action abstraction controls bind to.
//!
//! An [`Action`] is a triggerable operation plus a live enabled/disabled
//! stream. Controls never own an action's lifetime: they hold a
//! [`SharedAction`] handle for as long as the action stays assigned, and the
//! action never holds the control.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use actionkit_core::StreamError;
use actionkit_core::logging::ACTION_TARGET;
use tracing::debug;

use crate::reactive::{BehaviorSubject, Observable};

/// A triggerable operation with an observable enabled state.
pub trait Action: Send + Sync {
    /// Stream of enabled/disabled states.
    fn enabled(&self) -> &dyn Observable<bool>;

    /// Trigger the operation.
    fn execute(&self);
}

/// Shared handle to an action, as stored by controls.
pub type SharedAction = Arc<dyn Action>;

type Work = Box<dyn Fn() + Send + Sync>;

/// An [`Action`] backed by a closure and a [`BehaviorSubject`] enabled state.
///
/// `execute` runs the closure only while the action is enabled.
pub struct ClosureAction {
    enabled: BehaviorSubject<bool>,
    work: Work,
    executions: AtomicU64,
}

impl ClosureAction {
    /// Create an enabled action running `work` on each execution.
    pub fn new(work: impl Fn() + Send + Sync + 'static) -> Self {
        Self::with_enabled(true, work)
    }

    /// Create an action with an explicit initial enabled state.
    pub fn with_enabled(enabled: bool, work: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            enabled: BehaviorSubject::new(enabled),
            work: Box::new(work),
            executions: AtomicU64::new(0),
        }
    }

    /// An enabled action that does nothing when executed.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Push a new enabled state to every bound control.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.next(enabled);
    }

    /// Latest enabled state.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.value()
    }

    /// Terminate the enabled stream with a failure.
    pub fn fail_enabled(&self, error: StreamError) {
        self.enabled.error(error);
    }

    /// Terminate the enabled stream normally.
    pub fn complete_enabled(&self) {
        self.enabled.complete();
    }

    /// The underlying enabled subject.
    #[must_use]
    pub fn enabled_subject(&self) -> &BehaviorSubject<bool> {
        &self.enabled
    }

    /// How many times the work closure has run.
    #[must_use]
    pub fn execution_count(&self) -> u64 {
        self.executions.load(Ordering::SeqCst)
    }

    /// Convert into the handle type controls store.
    #[must_use]
    pub fn into_shared(self) -> SharedAction {
        Arc::new(self)
    }
}

impl Action for ClosureAction {
    fn enabled(&self) -> &dyn Observable<bool> {
        &self.enabled
    }

    fn execute(&self) {
        if !self.is_enabled() {
            debug!(target: ACTION_TARGET, "execute skipped: action disabled");
            return;
        }
        self.executions.fetch_add(1, Ordering::SeqCst);
        (self.work)();
    }
}

impl fmt::Debug for ClosureAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureAction")
            .field("enabled", &self.is_enabled())
            .field("executions", &self.execution_count())
            .finish_non_exhaustive()
    }
}
