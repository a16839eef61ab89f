#![forbid(unsafe_code)]

//! Push button bound to an action.

use std::fmt;

use actionkit_core::ExecutionContext;
use actionkit_core::logging::ACTION_TARGET;
use tracing::trace;

use crate::bindable::Bindable;
use crate::config::BindingConfig;
use crate::control::Control;

/// A button that executes its bound action when pressed.
///
/// Gesture recognition belongs to the host; it calls [`Button::press`] once
/// a press is recognized.
pub struct Button {
    control: Control,
}

impl Button {
    /// Create a button on the calling thread, configured from the
    /// environment.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            control: Control::new(label),
        }
    }

    /// Create a button with an explicit context and config.
    pub fn with_config(
        label: impl Into<String>,
        context: ExecutionContext,
        config: BindingConfig,
    ) -> Self {
        Self {
            control: Control::with_config(label, context, config),
        }
    }

    /// Activate the button.
    ///
    /// Executes the bound action if the button is enabled and bound. Returns
    /// whether an action was executed.
    pub fn press(&self) -> bool {
        if !self.control.is_enabled() {
            trace!(target: ACTION_TARGET, button = self.control.label(), "press ignored: disabled");
            return false;
        }
        match self.action() {
            Some(action) => {
                action.execute();
                true
            }
            None => false,
        }
    }
}

impl Bindable for Button {
    fn control(&self) -> &Control {
        &self.control
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button").field("control", &self.control).finish()
    }
}
