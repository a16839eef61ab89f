#![forbid(unsafe_code)]

//! The control state every bindable element is built on.
//!
//! A [`Control`] owns two things: the shared core the enabled sink writes to
//! (held by the sink only weakly), and the [`ActionBinding`] holding the
//! current action and its subscriptions. Dropping the control drops the
//! binding, which disposes every live subscription.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actionkit_core::ExecutionContext;

use crate::binding::ActionBinding;
use crate::config::BindingConfig;
use crate::sink::EnabledSink;

/// State shared between a control and its enabled sink.
pub(crate) struct ControlCore {
    pub(crate) label: Arc<str>,
    pub(crate) enabled: AtomicBool,
}

/// A UI element with an enabled flag and an action slot.
///
/// Controls start enabled and unbound. The designated execution context and
/// the binding config are fixed at construction.
pub struct Control {
    core: Arc<ControlCore>,
    context: ExecutionContext,
    binding: ActionBinding,
}

impl Control {
    /// Create a control on the calling thread, configured from the
    /// environment.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_config(label, ExecutionContext::current(), BindingConfig::from_env())
    }

    /// Create a control with an explicit context and config.
    pub fn with_config(
        label: impl Into<String>,
        context: ExecutionContext,
        config: BindingConfig,
    ) -> Self {
        let label: Arc<str> = Arc::from(label.into());
        let core = Arc::new(ControlCore {
            label: Arc::clone(&label),
            enabled: AtomicBool::new(true),
        });
        let sink = EnabledSink::new(&core, context, config);
        Self {
            core,
            context,
            binding: ActionBinding::new(label, sink),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.core.label
    }

    /// Current enabled flag.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.core.enabled.load(Ordering::Acquire)
    }

    /// Set the enabled flag directly, bypassing any bound action.
    ///
    /// A bound action overwrites this on its next emission.
    pub fn set_enabled(&self, enabled: bool) {
        self.core.enabled.store(enabled, Ordering::Release);
    }

    /// The designated execution context.
    #[must_use]
    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// The action slot and its subscriptions.
    #[must_use]
    pub fn binding(&self) -> &ActionBinding {
        &self.binding
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("label", &self.label())
            .field("enabled", &self.is_enabled())
            .field("context", &self.context)
            .field("binding", &self.binding)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control() -> Control {
        Control::with_config("ok", ExecutionContext::current(), BindingConfig::fatal())
    }

    #[test]
    fn starts_enabled_and_unbound() {
        let control = control();
        assert!(control.is_enabled());
        assert!(control.binding().get().is_none());
        assert!(control.binding().scope().is_empty());
        assert_eq!(control.label(), "ok");
    }

    #[test]
    fn set_enabled_direct() {
        let control = control();
        control.set_enabled(false);
        assert!(!control.is_enabled());
    }

    #[test]
    fn context_is_fixed_at_construction() {
        let control = control();
        assert!(control.context().is_current());
    }

    #[test]
    fn new_uses_calling_thread() {
        let control = Control::new("env");
        assert!(control.context().is_current());
    }

    #[test]
    fn sink_reports_detached_after_drop() {
        let control = control();
        let sink = control.binding().sink().clone();
        assert!(sink.is_attached());
        drop(control);
        assert!(!sink.is_attached());
    }

    #[test]
    fn debug_format() {
        let dbg = format!("{:?}", control());
        assert!(dbg.contains("Control"));
        assert!(dbg.contains("\"ok\""));
    }
}
