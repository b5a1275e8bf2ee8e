//! Result and error types for Pinpoint.

use thiserror::Error;

/// Result type for Pinpoint operations
pub type PinpointResult<T> = Result<T, PinpointError>;

/// Errors that can occur in Pinpoint
///
/// A strategy that cannot produce a candidate is not an error; it simply
/// abstains (`None`). These variants cover caller contract violations and
/// malformed collaborator input only.
#[derive(Debug, Error)]
pub enum PinpointError {
    /// Caller passed something the engine cannot describe (empty tag, non-element node)
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Rendering requested for a dialect the emitters do not implement
    #[error("Unsupported dialect '{name}' (supported: playwright, cypress, testing-library)")]
    UnsupportedDialect {
        /// Requested dialect name
        name: String,
    },

    /// Snapshot could not be indexed or the requested element does not exist
    #[error("Snapshot error: {message}")]
    Snapshot {
        /// Error message
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PinpointError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an unsupported dialect error
    #[must_use]
    pub fn unsupported_dialect(name: impl Into<String>) -> Self {
        Self::UnsupportedDialect { name: name.into() }
    }

    /// Create a snapshot error
    #[must_use]
    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::Snapshot {
            message: message.into(),
        }
    }

    /// Whether this error is a caller contract violation
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Whether callers should fall back to the abstract candidate list
    #[must_use]
    pub const fn is_unsupported_dialect(&self) -> bool {
        matches!(self, Self::UnsupportedDialect { .. })
    }
}
