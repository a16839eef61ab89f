#![forbid(unsafe_code)]

//! Designated execution contexts.
//!
//! A control may only have its state mutated on one thread: the host
//! framework's UI thread. [`ExecutionContext`] captures that thread's identity
//! so that deliveries arriving from elsewhere can be detected.
//!
//! # Invariants
//!
//! 1. A context is bound to exactly one thread for its whole lifetime.
//! 2. [`ExecutionContext::check`] is `Ok` only on that thread.
//! 3. Contexts are cheap to copy around and compare by thread identity.

use std::fmt;
use std::thread::{self, ThreadId};

use crate::error::BindingError;

/// Identity of the single thread allowed to mutate a control.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecutionContext {
    thread: ThreadId,
}

impl ExecutionContext {
    /// Designate the calling thread.
    #[must_use]
    pub fn current() -> Self {
        Self {
            thread: thread::current().id(),
        }
    }

    /// Designate an explicit thread.
    #[must_use]
    pub const fn for_thread(thread: ThreadId) -> Self {
        Self { thread }
    }

    /// The designated thread.
    #[must_use]
    pub const fn thread_id(&self) -> ThreadId {
        self.thread
    }

    /// Whether the calling thread is the designated one.
    #[inline]
    #[must_use]
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.thread
    }

    /// Verify the calling thread is the designated one.
    pub fn check(&self) -> Result<(), BindingError> {
        let actual = thread::current().id();
        if actual == self.thread {
            Ok(())
        } else {
            Err(BindingError::OffContext {
                expected: self.thread,
                actual,
            })
        }
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("thread", &self.thread)
            .field("is_current", &self.is_current())
            .finish()
    }
}
