#![forbid(unsafe_code)]

//! Logging facade.
//!
//! All crates in the workspace log through `tracing`. Nothing here installs a
//! subscriber unless asked to: libraries emit events, binaries decide where
//! they go.
//!
//! # Targets
//!
//! | Target                | Emitted by                          |
//! |-----------------------|-------------------------------------|
//! | `actionkit::binding`  | action slot rebinds, enabled sink   |
//! | `actionkit::action`   | action execution                    |
//! | `actionkit::subject`  | subject termination                 |

pub use tracing::{debug, error, trace, warn};

/// Target used for binding lifecycle events.
pub const BINDING_TARGET: &str = "actionkit::binding";

/// Target used for action execution events.
pub const ACTION_TARGET: &str = "actionkit::action";

/// Target used for subject lifecycle events.
pub const SUBJECT_TARGET: &str = "actionkit::subject";

/// Install a global JSON subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_share_prefix() {
        for target in [BINDING_TARGET, ACTION_TARGET, SUBJECT_TARGET] {
            assert!(target.starts_with("actionkit::"), "{target}");
        }
    }

    #[test]
    fn reexported_macros_accept_targets() {
        trace!(target: SUBJECT_TARGET, "trace");
        debug!(target: BINDING_TARGET, bound = true, "debug");
        warn!(target: BINDING_TARGET, "warn");
        error!(target: ACTION_TARGET, "error");
    }

    #[cfg(feature = "tracing-json")]
    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init_json_logging();
        assert!(!init_json_logging());
    }
}
