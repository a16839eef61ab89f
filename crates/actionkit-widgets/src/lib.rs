#![forbid(unsafe_code)]

//! Controls driven by bound actions.
//!
//! # Role in actionkit
//! `actionkit-widgets` owns the binding lifecycle between one control and one
//! action: where the action reference lives, how its subscriptions are torn
//! down on reassignment, and what happens when enabled-state updates arrive
//! on the wrong thread or the stream fails.
//!
//! # Primary responsibilities
//! - **Control**: enabled flag, designated execution context, action slot.
//! - **ActionBinding**: slot storage plus the reset-then-subscribe binder.
//! - **EnabledSink**: the observer that applies enabled values.
//! - **BindingConfig**: fatal-vs-logged failure policy.
//! - **Button** / **AlertAction**: host elements whose activation executes
//!   the bound action.
//!
//! # Example
//!
//! ```
//! use actionkit_runtime::ClosureAction;
//! use actionkit_widgets::{Bindable, Button};
//! use std::sync::Arc;
//!
//! let button = Button::new("Save");
//! let save = Arc::new(ClosureAction::noop());
//! button.set_action(Some(save.clone()));
//!
//! save.set_enabled(false);
//! assert!(!button.is_enabled());
//!
//! save.set_enabled(true);
//! assert!(button.press());
//! assert_eq!(save.execution_count(), 1);
//! ```

pub mod alert_action;
pub mod bindable;
pub mod binding;
pub mod button;
pub mod config;
pub mod control;
pub mod sink;

pub use alert_action::{AlertAction, AlertActionStyle};
pub use bindable::Bindable;
pub use binding::ActionBinding;
pub use button::Button;
pub use config::{BindingConfig, ErrorPolicy};
pub use control::Control;
pub use sink::EnabledSink;
