#![forbid(unsafe_code)]

//! Reactive streams for action bindings.
//!
//! This module provides the small set of push-based primitives a control
//! binding needs:
//!
//! - [`Event`]: one notification (`Next`, `Error`, or `Completed`).
//! - [`Observer`] / [`AnyObserver`]: receivers of notifications.
//! - [`Observable`]: the object-safe subscription seam.
//! - [`BehaviorSubject`] / [`PublishSubject`]: thread-safe sources.
//! - [`Subscription`] / [`SubscriptionScope`]: RAII teardown and the owning
//!   group a binding resets on every reassignment.
//!
//! # Architecture
//!
//! Sources may emit from any thread, so everything here is `Send + Sync` and
//! built on `Arc<Mutex<..>>`. Locks are never held while an observer runs.
//!
//! # Invariants
//!
//! 1. Observers are notified in registration order.
//! 2. A disposed subscription delivers nothing further.
//! 3. Disposal runs each teardown exactly once.
//! 4. A terminated source delivers its terminal notification to late
//!    subscribers instead of failing the subscribe call.

pub mod event;
pub mod subject;
pub mod subscription;

pub use event::{AnyObserver, Event, Observable, Observer};
pub use subject::{BehaviorSubject, PublishSubject};
pub use subscription::{Subscription, SubscriptionScope};
