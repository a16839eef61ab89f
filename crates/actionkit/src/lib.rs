#![forbid(unsafe_code)]

//! actionkit: bind reactive actions to UI controls.
//!
//! This crate re-exports the public surface of the workspace crates:
//!
//! - [`actionkit_core`]: execution contexts, binding errors, logging.
//! - [`actionkit_runtime`]: reactive streams, subscriptions, actions.
//! - [`actionkit_widgets`]: controls, the action binding, the enabled sink.
//!
//! Most code only needs the [`prelude`].
//!
//! ```
//! use actionkit::prelude::*;
//! use std::sync::Arc;
//!
//! let delete = AlertAction::bound(Some("Delete".into()), AlertActionStyle::Destructive);
//! let action = Arc::new(ClosureAction::noop());
//! delete.set_action(Some(action.clone()));
//!
//! assert!(delete.trigger());
//! assert_eq!(action.execution_count(), 1);
//! ```

pub use actionkit_core;
pub use actionkit_runtime;
pub use actionkit_widgets;

pub mod prelude {
    //! Common imports.

    pub use actionkit_core::{BindingError, ExecutionContext, StreamError, stream_error};
    pub use actionkit_runtime::{
        Action, AnyObserver, BehaviorSubject, ClosureAction, Event, Observable, Observer,
        PublishSubject, SharedAction, Subscription, SubscriptionScope,
    };
    pub use actionkit_widgets::{
        AlertAction, AlertActionStyle, Bindable, BindingConfig, Button, Control, EnabledSink,
        ErrorPolicy,
    };
}
