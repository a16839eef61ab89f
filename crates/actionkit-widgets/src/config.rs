#![forbid(unsafe_code)]

//! Failure policy for control bindings.
//!
//! Two things can go wrong once an action is bound: its enabled stream can
//! fail, or a value can arrive off the control's designated execution
//! context. Both are programming errors. While developing we want them to
//! stop the process; in production we want the UI to keep running.
//!
//! [`BindingConfig`] makes that split an explicit value instead of a
//! compile-time branch, so both paths can be exercised in tests. It is read
//! once, when a control (and its enabled sink) is constructed.
//!
//! # Environment
//!
//! | Variable                        | Values                    | Affects                 |
//! |---------------------------------|---------------------------|-------------------------|
//! | `ACTIONKIT_BINDING_POLICY`      | `fatal`/`panic`, `log`/`swallow` | both policies    |
//! | `ACTIONKIT_OFF_CONTEXT_POLICY`  | same                      | off-context deliveries  |
//!
//! Unrecognized values are ignored and the build default applies.

/// Environment variable selecting the policy for all binding failures.
pub const POLICY_ENV: &str = "ACTIONKIT_BINDING_POLICY";

/// Environment variable overriding the policy for off-context deliveries.
pub const OFF_CONTEXT_POLICY_ENV: &str = "ACTIONKIT_OFF_CONTEXT_POLICY";

/// What the enabled sink does when it observes a contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorPolicy {
    /// Panic with a message identifying a UI-binding error.
    Fatal,
    /// Log the violation and carry on.
    Log,
}

impl ErrorPolicy {
    /// `Fatal` in debug builds, `Log` in release builds.
    #[must_use]
    pub const fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Fatal
        } else {
            Self::Log
        }
    }

    /// Parse a policy name, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fatal" | "panic" => Some(Self::Fatal),
            "log" | "swallow" => Some(Self::Log),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Fatal)
    }
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self::for_build()
    }
}

/// Configuration for a control's enabled sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingConfig {
    /// Policy when the bound action's enabled stream fails.
    pub error_policy: ErrorPolicy,
    /// Policy when a value arrives off the designated execution context.
    pub off_context_policy: ErrorPolicy,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self::for_build()
    }
}

impl BindingConfig {
    /// Same policy for every failure.
    #[must_use]
    pub const fn new(policy: ErrorPolicy) -> Self {
        Self {
            error_policy: policy,
            off_context_policy: policy,
        }
    }

    /// Build-dependent defaults: fatal while debugging, logged in release.
    #[must_use]
    pub const fn for_build() -> Self {
        Self::new(ErrorPolicy::for_build())
    }

    /// Every failure panics.
    #[must_use]
    pub const fn fatal() -> Self {
        Self::new(ErrorPolicy::Fatal)
    }

    /// Every failure is logged and swallowed.
    #[must_use]
    pub const fn logging() -> Self {
        Self::new(ErrorPolicy::Log)
    }

    /// Set the upstream failure policy.
    #[must_use]
    pub const fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Set the off-context delivery policy.
    #[must_use]
    pub const fn with_off_context_policy(mut self, policy: ErrorPolicy) -> Self {
        self.off_context_policy = policy;
        self
    }

    /// Build defaults overridden by a custom environment lookup.
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::for_build();
        if let Some(policy) = get_env(POLICY_ENV).as_deref().and_then(ErrorPolicy::parse) {
            config = Self::new(policy);
        }
        if let Some(policy) = get_env(OFF_CONTEXT_POLICY_ENV)
            .as_deref()
            .and_then(ErrorPolicy::parse)
        {
            config.off_context_policy = policy;
        }
        config
    }

    /// Build defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }
}
