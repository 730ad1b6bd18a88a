//! Classifier service error types.

use std::time::Duration;

use po_classifier_core::Error as CoreError;
use thiserror::Error;

/// Errors from building, sending or configuring a classification.
///
/// A response that fails to parse is not an error; see
/// [`ValidationOutcome::Malformed`](po_classifier_core::ValidationOutcome).
#[derive(Debug, Error)]
pub enum AiError {
    /// Blank description; no backend call was made.
    #[error("PO description must not be empty")]
    EmptyInput,

    /// Missing API key for a provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// Provider id not present in the catalog.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// The model backend failed (connection, status, rate limit).
    #[error("Backend error: {0}")]
    Backend(String),

    /// The backend did not answer within the caller's timeout.
    #[error("Backend timed out after {0:?}")]
    Timeout(Duration),

    /// Core error other than empty input.
    #[error("Core error: {0}")]
    Core(CoreError),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for AiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyInput => AiError::EmptyInput,
            other => AiError::Core(other),
        }
    }
}

impl AiError {
    /// Create a new backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for failures at the model service boundary. Callers may retry
    /// these; the classifier never does.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            AiError::Backend(_) | AiError::Timeout(_) | AiError::MissingApiKey(_)
        )
    }
}

/// Error code for programmatic handling.
impl AiError {
    pub fn code(&self) -> &'static str {
        match self {
            AiError::EmptyInput => "EMPTY_INPUT",
            AiError::MissingApiKey(_) => "MISSING_API_KEY",
            AiError::UnknownProvider(_) => "UNKNOWN_PROVIDER",
            AiError::Backend(_) => "BACKEND_FAILURE",
            AiError::Timeout(_) => "BACKEND_TIMEOUT",
            AiError::Core(_) => "CORE_ERROR",
            AiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_maps_from_core() {
        let err: AiError = CoreError::EmptyInput.into();
        assert!(matches!(err, AiError::EmptyInput));
        assert_eq!(err.code(), "EMPTY_INPUT");
        assert!(!err.is_backend_failure());
    }

    #[test]
    fn backend_failures_are_flagged() {
        assert!(AiError::backend("503").is_backend_failure());
        assert!(AiError::Timeout(Duration::from_secs(1)).is_backend_failure());
        assert!(!AiError::internal("oops").is_backend_failure());
    }
}
