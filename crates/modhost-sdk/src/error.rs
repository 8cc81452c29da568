//! Error type returned by hook implementations.

use thiserror::Error;

/// Failure raised by a mod inside a hook.
///
/// The host logs the error with the mod's name and keeps going; it never
/// propagates past the dispatch loop.
#[derive(Debug, Error)]
pub enum HookError {
    /// The hook ran but could not complete.
    #[error("{0}")]
    Failed(String),

    /// The hook was given a payload it cannot interpret.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl HookError {
    /// Convenience constructor for the common free-form failure case.
    pub fn failed(reason: impl Into<String>) -> Self {
        HookError::Failed(reason.into())
    }
}

/// Result type for hook implementations.
pub type HookResult<T> = Result<T, HookError>;
