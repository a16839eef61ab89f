#![forbid(unsafe_code)]

//! Error types shared across the workspace.
//!
//! | Type            | Raised when                                              |
//! |-----------------|----------------------------------------------------------|
//! | [`StreamError`] | an upstream stream terminates with a failure             |
//! | [`BindingError`]| a control binding observes a contract violation          |
//!
//! Neither type ever escapes an action assignment. The enabled sink either
//! panics with a [`BindingError`] message or logs it, depending on policy.

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::thread::ThreadId;

/// Failure carried by a stream's error notification.
///
/// Cloneable so a single failure can be delivered to every subscriber.
#[derive(Clone)]
pub struct StreamError {
    inner: Arc<dyn Error + Send + Sync>,
}

impl StreamError {
    /// Wrap an arbitrary error.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
        }
    }

    /// Borrow the wrapped error.
    #[must_use]
    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }
}

/// Build a [`StreamError`] from a plain message.
pub fn stream_error(message: impl Into<String>) -> StreamError {
    StreamError::new(MessageError(message.into()))
}

#[derive(Debug)]
struct MessageError(String);

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for MessageError {}

impl fmt::Debug for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StreamError").field(&self.inner).finish()
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Error for StreamError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// Contract violation observed by a control binding.
#[derive(Debug, Clone)]
pub enum BindingError {
    /// An enabled-state value arrived on a thread other than the control's
    /// designated execution context.
    OffContext {
        /// The designated thread.
        expected: ThreadId,
        /// The thread the value arrived on.
        actual: ThreadId,
    },
    /// The bound action's enabled stream failed.
    Upstream(StreamError),
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffContext { expected, actual } => write!(
                f,
                "Binding error to UI: enabled state delivered on {actual:?}, \
                 expected designated context {expected:?}"
            ),
            Self::Upstream(err) => write!(f, "Binding error to UI: {err}"),
        }
    }
}

impl Error for BindingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::OffContext { .. } => None,
            Self::Upstream(err) => Some(err),
        }
    }
}
