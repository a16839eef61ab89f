#![forbid(unsafe_code)]

//! Alert buttons bound to actions.
//!
//! An [`AlertAction`] is one button of an alert or action sheet. The host
//! calls [`AlertAction::trigger`] when the user selects it, which runs the
//! element's handler. [`AlertAction::bound`] builds an element whose handler
//! executes whichever action is bound at that moment.

use std::fmt;

use actionkit_core::ExecutionContext;
use actionkit_core::logging::ACTION_TARGET;
use tracing::trace;

use crate::bindable::Bindable;
use crate::config::BindingConfig;
use crate::control::Control;

/// Visual role of an alert button. Rendering is up to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlertActionStyle {
    #[default]
    Default,
    Cancel,
    Destructive,
}

type Handler = Box<dyn Fn(&AlertAction) + Send + Sync>;

/// A selectable alert button.
pub struct AlertAction {
    title: Option<String>,
    style: AlertActionStyle,
    handler: Handler,
    control: Control,
}

impl AlertAction {
    /// Create an element whose selection runs `handler`.
    pub fn with_handler(
        title: Option<String>,
        style: AlertActionStyle,
        handler: impl Fn(&AlertAction) + Send + Sync + 'static,
    ) -> Self {
        let control = Control::new(label_for(title.as_deref()));
        Self::build(title, style, Box::new(handler), control)
    }

    /// Create an element whose selection executes the bound action.
    ///
    /// Selecting it while nothing is bound does nothing.
    pub fn bound(title: Option<String>, style: AlertActionStyle) -> Self {
        let control = Control::new(label_for(title.as_deref()));
        Self::build(title, style, Box::new(execute_bound), control)
    }

    /// [`bound`](Self::bound) with an explicit context and config.
    pub fn bound_with_config(
        title: Option<String>,
        style: AlertActionStyle,
        context: ExecutionContext,
        config: BindingConfig,
    ) -> Self {
        let control = Control::with_config(label_for(title.as_deref()), context, config);
        Self::build(title, style, Box::new(execute_bound), control)
    }

    fn build(
        title: Option<String>,
        style: AlertActionStyle,
        handler: Handler,
        control: Control,
    ) -> Self {
        Self {
            title,
            style,
            handler,
            control,
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn style(&self) -> AlertActionStyle {
        self.style
    }

    /// Select this element.
    ///
    /// Disabled elements cannot be selected. Returns whether the handler ran.
    pub fn trigger(&self) -> bool {
        if !self.control.is_enabled() {
            trace!(target: ACTION_TARGET, alert = self.control.label(), "trigger ignored: disabled");
            return false;
        }
        (self.handler)(self);
        true
    }
}

fn execute_bound(alert: &AlertAction) {
    if let Some(action) = alert.action() {
        action.execute();
    }
}

fn label_for(title: Option<&str>) -> String {
    title.unwrap_or("alert action").to_string()
}

impl Bindable for AlertAction {
    fn control(&self) -> &Control {
        &self.control
    }
}

impl fmt::Debug for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertAction")
            .field("title", &self.title)
            .field("style", &self.style)
            .field("control", &self.control)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actionkit_runtime::ClosureAction;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn bound(title: &str) -> AlertAction {
        AlertAction::bound_with_config(
            Some(title.to_string()),
            AlertActionStyle::Destructive,
            ExecutionContext::current(),
            BindingConfig::fatal(),
        )
    }

    #[test]
    fn accessors() {
        let alert = bound("Delete");
        assert_eq!(alert.title(), Some("Delete"));
        assert_eq!(alert.style(), AlertActionStyle::Destructive);
        assert_eq!(alert.control().label(), "Delete");
        assert_eq!(AlertActionStyle::default(), AlertActionStyle::Default);
    }

    #[test]
    fn bound_trigger_executes_current_action() {
        let alert = bound("OK");
        let first = Arc::new(ClosureAction::noop());
        let second = Arc::new(ClosureAction::noop());

        alert.set_action(Some(first.clone()));
        assert!(alert.trigger());
        alert.set_action(Some(second.clone()));
        assert!(alert.trigger());

        assert_eq!(first.execution_count(), 1);
        assert_eq!(second.execution_count(), 1);
    }

    #[test]
    fn bound_trigger_without_action_is_noop() {
        let alert = bound("OK");
        assert!(alert.trigger());
        assert!(alert.action().is_none());
    }

    #[test]
    fn disabled_alert_cannot_be_triggered() {
        let alert = bound("OK");
        let action = Arc::new(ClosureAction::with_enabled(false, || {}));
        alert.set_action(Some(action.clone()));
        assert!(!alert.is_enabled());
        assert!(!alert.trigger());
        assert_eq!(action.execution_count(), 0);
    }

    #[test]
    fn custom_handler_receives_element() {
        let hits = Arc::new(AtomicU32::new(0));
        let h = Arc::clone(&hits);
        let alert = AlertAction::with_handler(None, AlertActionStyle::Cancel, move |a| {
            assert_eq!(a.style(), AlertActionStyle::Cancel);
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert!(alert.trigger());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(alert.control().label(), "alert action");
    }
}
