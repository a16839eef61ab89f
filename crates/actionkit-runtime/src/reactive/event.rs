#![forbid(unsafe_code)]

//! Notifications, observers, and the observable seam.

use std::fmt;
use std::sync::Arc;

use actionkit_core::StreamError;

use super::subscription::Subscription;

/// A single stream notification.
///
/// A well-formed stream emits any number of `Next` values followed by at most
/// one terminal `Error` or `Completed`.
#[derive(Debug, Clone)]
pub enum Event<T> {
    Next(T),
    Error(StreamError),
    Completed,
}

impl<T> Event<T> {
    /// Whether this notification ends the stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next(_))
    }

    /// The carried value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Next(value) => Some(value),
            _ => None,
        }
    }
}

/// Receiver of stream notifications.
///
/// Observers may be invoked from any thread, hence `Send + Sync`.
pub trait Observer<T>: Send + Sync {
    /// Handle one notification.
    fn on(&self, event: Event<T>);

    fn on_next(&self, value: T) {
        self.on(Event::Next(value));
    }

    fn on_error(&self, error: StreamError) {
        self.on(Event::Error(error));
    }

    fn on_completed(&self) {
        self.on(Event::Completed);
    }
}

/// Type-erased, cloneable observer.
///
/// Cloning shares the same handler.
pub struct AnyObserver<T> {
    handler: Arc<dyn Fn(Event<T>) + Send + Sync>,
}

impl<T> AnyObserver<T> {
    /// Build an observer from a notification handler.
    pub fn new(handler: impl Fn(Event<T>) + Send + Sync + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Wrap any concrete observer.
    pub fn from_observer<O>(observer: O) -> Self
    where
        O: Observer<T> + 'static,
        T: 'static,
    {
        Self::new(move |event| observer.on(event))
    }
}

impl<T> Observer<T> for AnyObserver<T> {
    fn on(&self, event: Event<T>) {
        (self.handler)(event);
    }
}

// Manual Clone: shares the same handler without requiring `T: Clone`.
impl<T> Clone for AnyObserver<T> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T> fmt::Debug for AnyObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyObserver").finish_non_exhaustive()
    }
}

/// A source of notifications that observers can subscribe to.
///
/// Object-safe so actions can expose `&dyn Observable<bool>`.
pub trait Observable<T>: Send + Sync {
    /// Start delivering notifications to `observer`.
    ///
    /// Failures never surface here: a source that cannot be subscribed to
    /// delivers an `Error` notification instead. The returned guard stops
    /// delivery when disposed or dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    fn subscribe(&self, observer: AnyObserver<T>) -> Subscription;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actionkit_core::stream_error;
    use std::sync::Mutex;

    #[test]
    fn terminal_classification() {
        assert!(!Event::Next(1).is_terminal());
        assert!(Event::<i32>::Completed.is_terminal());
        assert!(Event::<i32>::Error(stream_error("x")).is_terminal());
    }

    #[test]
    fn value_accessor() {
        assert_eq!(Event::Next(7).value(), Some(&7));
        assert_eq!(Event::<i32>::Completed.value(), None);
    }

    #[test]
    fn convenience_methods_route_through_on() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let observer = AnyObserver::new(move |event: Event<bool>| {
            let tag = match event {
                Event::Next(v) => format!("next({v})"),
                Event::Error(e) => format!("error({e})"),
                Event::Completed => "completed".to_string(),
            };
            sink.lock().unwrap().push(tag);
        });

        observer.on_next(true);
        observer.on_error(stream_error("bad"));
        observer.on_completed();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["next(true)", "error(bad)", "completed"]
        );
    }

    #[test]
    fn clones_share_handler() {
        let count = Arc::new(Mutex::new(0));
        let c = Arc::clone(&count);
        let a = AnyObserver::new(move |_: Event<u8>| *c.lock().unwrap() += 1);
        let b = a.clone();
        a.on_next(1);
        b.on_next(2);
        assert_eq!(*count.lock().unwrap(), 2);
    }

    struct Recorder(Mutex<Vec<i32>>);

    impl Observer<i32> for Recorder {
        fn on(&self, event: Event<i32>) {
            if let Event::Next(v) = event {
                self.0.lock().unwrap().push(v);
            }
        }
    }

    #[test]
    fn from_observer_wraps_concrete_type() {
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let shared = Arc::clone(&recorder);
        let observer = AnyObserver::new(move |event| shared.on(event));
        observer.on_next(3);
        let boxed = AnyObserver::from_observer(Recorder(Mutex::new(Vec::new())));
        boxed.on_next(4);
        assert_eq!(*recorder.0.lock().unwrap(), vec![3]);
    }
}
