#![forbid(unsafe_code)]

//! Runtime: reactive streams, subscriptions, and the action abstraction.
//!
//! # Role in actionkit
//! `actionkit-runtime` sits between the core (contexts, errors, logging) and
//! the controls. It knows nothing about UI state; it only moves notifications
//! from sources to observers and tears subscriptions down on demand.
//!
//! # Primary responsibilities
//! - **reactive**: notifications, observers, subjects, subscriptions.
//! - **action**: the [`Action`] trait controls bind to, plus
//!   [`ClosureAction`], a ready-made implementation.

pub mod action;
pub mod reactive;

pub use action::{Action, ClosureAction, SharedAction};
pub use reactive::{
    AnyObserver, BehaviorSubject, Event, Observable, Observer, PublishSubject, Subscription,
    SubscriptionScope,
};
