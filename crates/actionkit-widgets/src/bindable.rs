#![forbid(unsafe_code)]

//! Action property shared by every control type.

use actionkit_runtime::SharedAction;

use crate::control::Control;
use crate::sink::EnabledSink;

/// An element whose enabled state and activation follow a bound action.
///
/// Implementors only provide [`control`](Bindable::control); the action
/// property comes for free.
///
/// Assigning an action binds its enabled stream to the control and keeps the
/// subscription in a private scope. Assign `None` or another action to
/// cancel it.
pub trait Bindable {
    /// The underlying control state.
    fn control(&self) -> &Control;

    /// The currently bound action.
    fn action(&self) -> Option<SharedAction> {
        self.control().binding().get()
    }

    /// Bind `action` (or unbind with `None`), tearing down the previous
    /// binding first. Never fails.
    fn set_action(&self, action: Option<SharedAction>) {
        self.control().binding().set(action);
    }

    /// Observer writing into this control's enabled flag.
    fn enabled_sink(&self) -> EnabledSink {
        self.control().binding().sink().clone()
    }

    fn is_enabled(&self) -> bool {
        self.control().is_enabled()
    }
}

impl Bindable for Control {
    fn control(&self) -> &Control {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BindingConfig;
    use actionkit_core::ExecutionContext;
    use actionkit_runtime::{ClosureAction, Observer};
    use std::sync::Arc;

    #[test]
    fn property_round_trip() {
        let control = Control::with_config("c", ExecutionContext::current(), BindingConfig::fatal());
        assert!(control.action().is_none());

        let action: SharedAction = ClosureAction::with_enabled(false, || {}).into_shared();
        control.set_action(Some(Arc::clone(&action)));
        assert!(Arc::ptr_eq(&control.action().unwrap(), &action));
        assert!(!Bindable::is_enabled(&control));

        control.set_action(None);
        assert!(control.action().is_none());
    }

    #[test]
    fn enabled_sink_writes_to_control() {
        let control = Control::with_config("c", ExecutionContext::current(), BindingConfig::fatal());
        control.enabled_sink().on_next(false);
        assert!(!control.is_enabled());
    }
}
