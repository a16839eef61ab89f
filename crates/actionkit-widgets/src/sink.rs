#![forbid(unsafe_code)]

//! The observer that writes a bound action's enabled state into a control.
//!
//! # Contract
//!
//! | Notification | Behavior                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | `Next(v)`    | On the designated context: set the enabled flag to `v`.         |
//! |              | Off context: panic (fatal policy) or warn and drop (log policy).|
//! |              | Control already dropped: silently ignored.                      |
//! | `Error(e)`   | Panic with `Binding error to UI: e` (fatal) or log it (log).    |
//! |              | The enabled flag keeps its last value either way.               |
//! | `Completed`  | Nothing. The binding stays in place until reassignment.         |
//!
//! # Where a fatal panic stops
//!
//! The fatal policy panics on the emitting thread. With `panic = "abort"`
//! (the workspace release profile) that ends the process. Under unwinding it
//! ends only the emitting thread: on a worker thread the panic surfaces as an
//! `Err` from that thread's `join`, and the main thread keeps running.
//! Callers that need the process to stop under unwinding must propagate the
//! join error themselves. The panicking subscription is unregistered either
//! way, so a control that survives the panic can be rebound normally.
//!
//! The sink never keeps its control alive: it holds only a `Weak` to the
//! control's shared state.

use std::fmt;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Weak};

use actionkit_core::logging::BINDING_TARGET;
use actionkit_core::{BindingError, ExecutionContext, StreamError};
use actionkit_runtime::{AnyObserver, Event, Observer};
use tracing::{error, trace, warn};

use crate::config::{BindingConfig, ErrorPolicy};
use crate::control::ControlCore;

/// Write target for a control's enabled flag.
///
/// Cloning shares the same target. Usable by any observer-style caller, not
/// only the control's own action binding.
#[derive(Clone)]
pub struct EnabledSink {
    control: Weak<ControlCore>,
    label: Arc<str>,
    context: ExecutionContext,
    config: BindingConfig,
}

impl EnabledSink {
    pub(crate) fn new(
        control: &Arc<ControlCore>,
        context: ExecutionContext,
        config: BindingConfig,
    ) -> Self {
        Self {
            control: Arc::downgrade(control),
            label: Arc::clone(&control.label),
            context,
            config,
        }
    }

    /// Type-erased observer, ready to subscribe to a stream.
    #[must_use]
    pub fn observer(&self) -> AnyObserver<bool> {
        AnyObserver::from_observer(self.clone())
    }

    /// Whether the target control is still alive.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.control.strong_count() > 0
    }

    /// The policy this sink was built with.
    #[must_use]
    pub fn config(&self) -> BindingConfig {
        self.config
    }

    fn apply(&self, enabled: bool) {
        if let Err(violation) = self.context.check() {
            self.violate(self.config.off_context_policy, violation);
            return;
        }
        let Some(core) = self.control.upgrade() else {
            trace!(
                target: BINDING_TARGET,
                control = %self.label,
                enabled,
                "enabled update dropped: control gone"
            );
            return;
        };
        core.enabled.store(enabled, Ordering::Release);
    }

    fn fail(&self, error: StreamError) {
        self.violate(self.config.error_policy, BindingError::Upstream(error));
    }

    fn violate(&self, policy: ErrorPolicy, violation: BindingError) {
        match (policy, &violation) {
            (ErrorPolicy::Fatal, _) => panic!("{violation}"),
            (ErrorPolicy::Log, BindingError::OffContext { .. }) => {
                warn!(
                    target: BINDING_TARGET,
                    control = %self.label,
                    "{violation}; value dropped"
                );
            }
            (ErrorPolicy::Log, BindingError::Upstream(_)) => {
                error!(target: BINDING_TARGET, control = %self.label, "{violation}");
            }
        }
    }
}

impl Observer<bool> for EnabledSink {
    fn on(&self, event: Event<bool>) {
        match event {
            Event::Next(enabled) => self.apply(enabled),
            Event::Error(error) => self.fail(error),
            Event::Completed => {}
        }
    }
}

impl fmt::Debug for EnabledSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnabledSink")
            .field("control", &self.label)
            .field("attached", &self.is_attached())
            .field("context", &self.context)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Control;
    use actionkit_core::stream_error;
    use std::thread;

    fn control(config: BindingConfig) -> Control {
        Control::with_config("sink", ExecutionContext::current(), config)
    }

    #[test]
    fn next_on_context_sets_flag() {
        let control = control(BindingConfig::fatal());
        let sink = control.binding().sink().clone();
        sink.on_next(false);
        assert!(!control.is_enabled());
        sink.on_next(true);
        assert!(control.is_enabled());
    }

    #[test]
    fn completed_is_noop() {
        let control = control(BindingConfig::fatal());
        let sink = control.binding().sink().clone();
        sink.on_next(false);
        sink.on_completed();
        assert!(!control.is_enabled());
    }

    #[test]
    #[should_panic(expected = "Binding error to UI: boom")]
    fn error_is_fatal_under_fatal_policy() {
        let control = control(BindingConfig::fatal());
        control.binding().sink().on_error(stream_error("boom"));
    }

    #[test]
    fn error_is_swallowed_under_log_policy() {
        let control = control(BindingConfig::logging());
        let sink = control.binding().sink().clone();
        sink.on_next(true);
        sink.on_error(stream_error("boom"));
        assert!(control.is_enabled());
    }

    #[test]
    fn off_context_panics_under_fatal_policy() {
        let control = control(BindingConfig::fatal());
        let sink = control.binding().sink().clone();
        let outcome = thread::spawn(move || sink.on_next(false)).join();
        assert!(outcome.is_err());
        assert!(control.is_enabled());
    }

    #[test]
    fn off_context_dropped_under_log_policy() {
        let control = control(BindingConfig::logging());
        let sink = control.binding().sink().clone();
        let outcome = thread::spawn(move || sink.on_next(false)).join();
        assert!(outcome.is_ok());
        assert!(control.is_enabled());
    }

    #[test]
    fn policies_are_independent() {
        let config = BindingConfig::logging().with_error_policy(ErrorPolicy::Fatal);
        let control = control(config);
        let sink = control.binding().sink().clone();
        assert!(thread::spawn(move || sink.on_next(false)).join().is_ok());
        assert_eq!(control.binding().sink().config(), config);
    }

    #[test]
    fn dropped_control_ignores_updates() {
        let control = control(BindingConfig::fatal());
        let sink = control.binding().sink().clone();
        drop(control);
        sink.on_next(false);
        sink.on_completed();
        assert!(!sink.is_attached());
    }

    #[test]
    fn observer_wraps_same_target() {
        let control = control(BindingConfig::fatal());
        let observer = control.binding().sink().observer();
        observer.on_next(false);
        assert!(!control.is_enabled());
    }

    #[test]
    fn debug_format() {
        let control = control(BindingConfig::logging());
        let dbg = format!("{:?}", control.binding().sink());
        assert!(dbg.contains("EnabledSink"));
        assert!(dbg.contains("attached: true"));
    }
}
