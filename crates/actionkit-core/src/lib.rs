#![forbid(unsafe_code)]

//! Core: execution contexts, binding errors, and logging.
//!
//! # Role in actionkit
//! `actionkit-core` is the bottom layer. It defines where UI state is allowed
//! to change ([`ExecutionContext`]), how binding failures are described
//! ([`BindingError`]), and the logging facade every other crate reports
//! through.
//!
//! # How it fits in the system
//! The reactive primitives (`actionkit-runtime`) carry [`StreamError`] values
//! through their error notifications. The controls (`actionkit-widgets`)
//! check every enabled-state delivery against an [`ExecutionContext`] and
//! turn violations into [`BindingError`]s.

pub mod context;
pub mod error;
pub mod logging;

pub use context::ExecutionContext;
pub use error::{BindingError, StreamError, stream_error};

// Re-export tracing macros at crate root for ergonomic use.
pub use logging::{debug, error, trace, warn};
