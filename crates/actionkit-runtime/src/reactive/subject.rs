#![forbid(unsafe_code)]

//! Thread-safe subjects: observables you can push notifications into.
//!
//! # Design
//!
//! [`BehaviorSubject<T>`] and [`PublishSubject<T>`] share one core: an
//! `Arc<Mutex<..>>` holding the current value, the terminal notification (if
//! any), and the list of live observers. Emission snapshots the observer list,
//! releases the lock, then delivers, so observers may subscribe, dispose, or
//! emit again from inside a callback.
//!
//! # Invariants
//!
//! 1. Observers are notified in registration order.
//! 2. After an `Error` or `Completed`, the subject is terminated: further
//!    notifications are ignored and late subscribers receive the terminal
//!    notification immediately.
//! 3. A disposed observer receives nothing further, even if it was part of
//!    an emission snapshot taken before the disposal.
//! 4. `version` increments by exactly 1 per accepted `Next`.
//! 5. A new subscriber receives the replayed value before any value emitted
//!    after it registered, even when the emission happens on another thread.
//!    A panic during replay unregisters the subscriber.
//!
//! # Failure Modes
//!
//! - **Concurrent emitters**: two threads emitting at once deliver in an
//!   unspecified relative order. Each observer still sees every value.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use actionkit_core::StreamError;
use actionkit_core::logging::SUBJECT_TARGET;
use tracing::trace;

use super::event::{AnyObserver, Event, Observable, Observer};
use super::subscription::Subscription;

struct ObserverSlot<T> {
    id: u64,
    active: AtomicBool,
    gate: Mutex<Gate<T>>,
    observer: AnyObserver<T>,
}

/// Holds back live notifications while a new subscriber is still receiving
/// its replayed value.
struct Gate<T> {
    replaying: bool,
    queued: VecDeque<Event<T>>,
}

impl<T> ObserverSlot<T> {
    fn new(id: u64, observer: AnyObserver<T>, replaying: bool) -> Self {
        Self {
            id,
            active: AtomicBool::new(true),
            gate: Mutex::new(Gate {
                replaying,
                queued: VecDeque::new(),
            }),
            observer,
        }
    }

    fn gate(&self) -> MutexGuard<'_, Gate<T>> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn deliver(&self, event: Event<T>) {
        if !self.active.load(Ordering::Acquire) {
            return;
        }
        {
            let mut gate = self.gate();
            if gate.replaying {
                gate.queued.push_back(event);
                return;
            }
        }
        self.observer.on(event);
    }

    /// Deliver the replayed value, then whatever was emitted meanwhile.
    fn replay(&self, value: T) {
        let mut pending = Some(Event::Next(value));
        loop {
            if let Some(event) = pending.take() {
                if self.active.load(Ordering::Acquire) {
                    self.observer.on(event);
                }
            }
            let mut gate = self.gate();
            match gate.queued.pop_front() {
                Some(event) => pending = Some(event),
                None => {
                    gate.replaying = false;
                    return;
                }
            }
        }
    }
}

struct SubjectState<T> {
    value: Option<T>,
    terminal: Option<Event<T>>,
    observers: Vec<Arc<ObserverSlot<T>>>,
    next_id: u64,
    version: u64,
}

type Shared<T> = Arc<Mutex<SubjectState<T>>>;

fn lock<T>(state: &Mutex<SubjectState<T>>) -> MutexGuard<'_, SubjectState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

struct SubjectCore<T> {
    state: Shared<T>,
    replay: bool,
}

impl<T: Clone + Send + 'static> SubjectCore<T> {
    fn new(value: Option<T>, replay: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                value,
                terminal: None,
                observers: Vec::new(),
                next_id: 0,
                version: 0,
            })),
            replay,
        }
    }

    fn emit(&self, event: Event<T>) {
        let targets = {
            let mut state = lock(&self.state);
            if state.terminal.is_some() {
                return;
            }
            match &event {
                Event::Next(value) => {
                    state.value = Some(value.clone());
                    state.version += 1;
                }
                terminal => {
                    state.terminal = Some(terminal.clone());
                    trace!(
                        target: SUBJECT_TARGET,
                        observers = state.observers.len(),
                        errored = matches!(terminal, Event::Error(_)),
                        "subject terminated"
                    );
                }
            }
            if event.is_terminal() {
                std::mem::take(&mut state.observers)
            } else {
                state.observers.clone()
            }
        };
        for slot in &targets {
            slot.deliver(event.clone());
        }
    }

    fn subscribe(&self, observer: AnyObserver<T>) -> Subscription {
        let (slot, replayed) = {
            let mut state = lock(&self.state);
            let terminal = state.terminal.clone();
            if let Some(terminal) = terminal {
                drop(state);
                observer.on(terminal);
                return Subscription::empty();
            }
            let id = state.next_id;
            state.next_id += 1;
            let replayed = if self.replay {
                state.value.clone()
            } else {
                None
            };
            let slot = Arc::new(ObserverSlot::new(id, observer, replayed.is_some()));
            state.observers.push(Arc::clone(&slot));
            (slot, replayed)
        };

        // Built before the replay so a panicking observer still unregisters.
        let registered = Arc::clone(&slot);
        let weak: Weak<Mutex<SubjectState<T>>> = Arc::downgrade(&self.state);
        let subscription = Subscription::new(move || {
            registered.active.store(false, Ordering::Release);
            if let Some(state) = weak.upgrade() {
                lock(&state).observers.retain(|s| s.id != registered.id);
            }
        });

        // Replay outside the lock. Emissions that race it are queued on the
        // slot and delivered after it, in order.
        if let Some(value) = replayed {
            slot.replay(value);
        }
        subscription
    }
}

impl<T> Clone for SubjectCore<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            replay: self.replay,
        }
    }
}

/// A subject that remembers its latest value and replays it to every new
/// subscriber.
///
/// Cloning creates a new handle to the **same** subject.
pub struct BehaviorSubject<T> {
    core: SubjectCore<T>,
}

impl<T: Clone + Send + 'static> BehaviorSubject<T> {
    /// Create a subject holding `value` at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            core: SubjectCore::new(Some(value), true),
        }
    }

    /// Latest value.
    #[must_use]
    pub fn value(&self) -> T {
        let state = lock(&self.core.state);
        match &state.value {
            Some(value) => value.clone(),
            // Constructed with a value and never cleared.
            None => unreachable!("behavior subject without a value"),
        }
    }

    /// Push a new value. Ignored once terminated.
    pub fn next(&self, value: T) {
        self.core.emit(Event::Next(value));
    }

    /// Terminate with a failure.
    pub fn error(&self, error: StreamError) {
        self.core.emit(Event::Error(error));
    }

    /// Terminate normally.
    pub fn complete(&self) {
        self.core.emit(Event::Completed);
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        lock(&self.core.state).version
    }

    /// Number of live observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        lock(&self.core.state).observers.len()
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        lock(&self.core.state).terminal.is_some()
    }
}

impl<T: Clone + Send + 'static> Observable<T> for BehaviorSubject<T> {
    fn subscribe(&self, observer: AnyObserver<T>) -> Subscription {
        self.core.subscribe(observer)
    }
}

impl<T: Clone + Send + 'static> Observer<T> for BehaviorSubject<T> {
    fn on(&self, event: Event<T>) {
        self.core.emit(event);
    }
}

impl<T> Clone for BehaviorSubject<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BehaviorSubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.core.state);
        f.debug_struct("BehaviorSubject")
            .field("value", &state.value)
            .field("version", &state.version)
            .field("observer_count", &state.observers.len())
            .field("terminated", &state.terminal.is_some())
            .finish()
    }
}

/// A subject that forwards notifications to current subscribers only.
pub struct PublishSubject<T> {
    core: SubjectCore<T>,
}

impl<T: Clone + Send + 'static> Default for PublishSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> PublishSubject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: SubjectCore::new(None, false),
        }
    }

    pub fn next(&self, value: T) {
        self.core.emit(Event::Next(value));
    }

    pub fn error(&self, error: StreamError) {
        self.core.emit(Event::Error(error));
    }

    pub fn complete(&self) {
        self.core.emit(Event::Completed);
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        lock(&self.core.state).observers.len()
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        lock(&self.core.state).terminal.is_some()
    }
}

impl<T: Clone + Send + 'static> Observable<T> for PublishSubject<T> {
    fn subscribe(&self, observer: AnyObserver<T>) -> Subscription {
        self.core.subscribe(observer)
    }
}

impl<T: Clone + Send + 'static> Observer<T> for PublishSubject<T> {
    fn on(&self, event: Event<T>) {
        self.core.emit(event);
    }
}

impl<T> Clone for PublishSubject<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T> fmt::Debug for PublishSubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.core.state);
        f.debug_struct("PublishSubject")
            .field("observer_count", &state.observers.len())
            .field("terminated", &state.terminal.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
