#![forbid(unsafe_code)]

//! Action slot and binder.
//!
//! [`ActionBinding`] is the per-control storage for the bound action plus the
//! [`SubscriptionScope`] holding that action's subscriptions. Every call to
//! [`ActionBinding::set`] runs the same rebind sequence under the slot lock:
//!
//! ```text
//! set(Some(b))                         set(None)
//! ┌──────────────────────────────┐     ┌──────────────────────────────┐
//! │ slot  = b                    │     │ slot  = none                 │
//! │ scope.reset()  (disposes a)  │     │ scope.reset()  (disposes b)  │
//! │ scope.add(b.enabled ⟶ sink)  │     │                              │
//! └──────────────────────────────┘     └──────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. The scope only ever holds subscriptions for the action in the slot.
//! 2. The previous action's subscriptions are disposed before the new
//!    action's enabled stream is subscribed to.
//! 3. There is no equality short-circuit: re-assigning the same action
//!    rebinds it.
//! 4. Nothing escapes `set`: stream failures are routed to the sink.
//!
//! # Synchronous emission during subscribe
//!
//! Streams that replay their current value (such as a behavior subject)
//! deliver it to the sink while `subscribe` is still running, before the
//! resulting subscription is added to the scope. That value is applied. The
//! old action's subscriptions are already gone by then, and the slot lock
//! keeps any concurrent `set` out, so it cannot interleave with a rebind.
//! If applying it panics under the fatal policy, the new subscription is
//! dropped while unwinding and the scope stays empty.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use actionkit_core::logging::BINDING_TARGET;
use actionkit_runtime::{SharedAction, SubscriptionScope};
use tracing::{debug, debug_span};

use crate::sink::EnabledSink;

/// Storage for a control's current action and its subscriptions.
pub struct ActionBinding {
    label: Arc<str>,
    slot: Mutex<Option<SharedAction>>,
    scope: SubscriptionScope,
    sink: EnabledSink,
}

impl ActionBinding {
    pub(crate) fn new(label: Arc<str>, sink: EnabledSink) -> Self {
        Self {
            label,
            slot: Mutex::new(None),
            scope: SubscriptionScope::new(),
            sink,
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<SharedAction>> {
        // A fatal policy may panic mid-rebind. The slot holds a valid value
        // at every step, so a poisoned lock is still usable.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The currently bound action.
    #[must_use]
    pub fn get(&self) -> Option<SharedAction> {
        self.lock_slot().clone()
    }

    /// Whether an action is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.lock_slot().is_some()
    }

    /// Replace the bound action and rebuild its subscriptions.
    pub fn set(&self, action: Option<SharedAction>) {
        let _span =
            debug_span!(target: BINDING_TARGET, "set_action", control = %self.label).entered();
        let mut slot = self.lock_slot();
        let previous = std::mem::replace(&mut *slot, action);

        self.scope.reset();

        if let Some(action) = slot.as_ref() {
            let subscription = action.enabled().subscribe(self.sink.observer());
            self.scope.add(subscription);
        }

        debug!(
            target: BINDING_TARGET,
            control = %self.label,
            bound = slot.is_some(),
            replaced = previous.is_some(),
            generation = self.scope.generation(),
            "action rebound"
        );
        drop(slot);
        // The previous action may be the last handle; release it unlocked.
        drop(previous);
    }

    /// The subscriptions belonging to the current action.
    #[must_use]
    pub fn scope(&self) -> &SubscriptionScope {
        &self.scope
    }

    /// The control's enabled sink.
    #[must_use]
    pub fn sink(&self) -> &EnabledSink {
        &self.sink
    }
}

impl fmt::Debug for ActionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionBinding")
            .field("bound", &self.is_bound())
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BindingConfig;
    use crate::control::Control;
    use actionkit_core::{ExecutionContext, stream_error};
    use actionkit_runtime::ClosureAction;

    fn control(config: BindingConfig) -> Control {
        Control::with_config("binding", ExecutionContext::current(), config)
    }

    #[test]
    fn set_stores_and_subscribes() {
        let control = control(BindingConfig::fatal());
        let action = Arc::new(ClosureAction::with_enabled(false, || {}));
        control.binding().set(Some(action.clone()));

        assert!(control.binding().is_bound());
        assert_eq!(control.binding().scope().len(), 1);
        assert_eq!(action.enabled_subject().observer_count(), 1);
        // Replayed synchronously during subscribe.
        assert!(!control.is_enabled());

        action.set_enabled(true);
        assert!(control.is_enabled());
    }

    #[test]
    fn get_returns_same_handle() {
        let control = control(BindingConfig::fatal());
        let action: SharedAction = ClosureAction::noop().into_shared();
        control.binding().set(Some(Arc::clone(&action)));
        let got = control.binding().get().unwrap();
        assert!(Arc::ptr_eq(&got, &action));
    }

    #[test]
    fn set_none_on_unbound_is_noop() {
        let control = control(BindingConfig::fatal());
        control.binding().set(None);
        control.binding().set(None);
        assert!(!control.binding().is_bound());
        assert!(control.binding().scope().is_empty());
    }

    #[test]
    fn same_action_rebinds() {
        let control = control(BindingConfig::fatal());
        let action = Arc::new(ClosureAction::noop());
        control.binding().set(Some(action.clone()));
        control.binding().set(Some(action.clone()));
        assert_eq!(control.binding().scope().generation(), 2);
        assert_eq!(control.binding().scope().len(), 1);
        assert_eq!(action.enabled_subject().observer_count(), 1);
    }

    #[test]
    fn terminated_stream_routes_error_to_sink() {
        let control = control(BindingConfig::logging());
        let action = Arc::new(ClosureAction::noop());
        action.fail_enabled(stream_error("dead on arrival"));
        control.binding().set(Some(action.clone()));
        assert!(control.binding().is_bound());
        // The terminated stream hands back an already-disposed subscription.
        assert_eq!(control.binding().scope().len(), 1);
        assert_eq!(action.enabled_subject().observer_count(), 0);
        assert!(control.is_enabled());
    }

    #[test]
    fn rebind_to_failed_action_disposes_previous() {
        let control = control(BindingConfig::logging());
        let live = Arc::new(ClosureAction::with_enabled(false, || {}));
        let failed = Arc::new(ClosureAction::noop());
        failed.fail_enabled(stream_error("dead on arrival"));

        control.binding().set(Some(live.clone()));
        assert_eq!(live.enabled_subject().observer_count(), 1);
        control.binding().set(Some(failed.clone()));

        assert_eq!(live.enabled_subject().observer_count(), 0);
        assert_eq!(control.binding().scope().len(), 1);
        assert_eq!(control.binding().scope().generation(), 2);
        // The flag keeps the last value the live action delivered.
        live.set_enabled(true);
        assert!(!control.is_enabled());
    }

    #[test]
    fn fatal_replay_off_context_leaves_no_observer() {
        let control = control(BindingConfig::fatal());
        let action = Arc::new(ClosureAction::noop());
        let outcome = std::thread::scope(|s| {
            s.spawn(|| control.binding().set(Some(action.clone() as SharedAction)))
                .join()
        });
        assert!(outcome.is_err());
        assert_eq!(action.enabled_subject().observer_count(), 0);

        control.binding().set(None);
        action.set_enabled(false);
        assert!(!control.binding().is_bound());
        assert!(control.is_enabled());
    }

    #[test]
    fn slot_recovers_after_fatal_rebind() {
        let control = control(BindingConfig::fatal());
        let action = Arc::new(ClosureAction::noop());
        action.fail_enabled(stream_error("boom"));
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            control.binding().set(Some(action.clone()));
        }));
        assert!(outcome.is_err());

        control.binding().set(None);
        assert!(!control.binding().is_bound());
        assert!(control.binding().scope().is_empty());
    }

    #[test]
    fn previous_action_released() {
        let control = control(BindingConfig::fatal());
        let action = Arc::new(ClosureAction::noop());
        control.binding().set(Some(action.clone()));
        assert_eq!(Arc::strong_count(&action), 2);
        control.binding().set(None);
        assert_eq!(Arc::strong_count(&action), 1);
    }
}
