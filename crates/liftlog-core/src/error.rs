//! Error types for the LiftLog engine.

use crate::session::MutationError;
use thiserror::Error;

/// A shared error type for the entire LiftLog engine.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LiftlogError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (journal/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// The baseline routine could not be loaded.
    ///
    /// The message is meant to be shown to the user as-is.
    #[error("Failed to load routine: {message}")]
    LoadFailed { message: String },

    /// The routine service answered with a failure for a write request
    #[error("Routine service error: {0}")]
    Remote(String),

    /// An edit was rejected and the session left unchanged
    #[error("Edit rejected: {0}")]
    Mutation(MutationError),

    /// The requested action does not apply to the session in its current state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl LiftlogError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a LoadFailed error
    pub fn load_failed(message: impl Into<String>) -> Self {
        Self::LoadFailed {
            message: message.into(),
        }
    }

    /// Creates a Remote error
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// Creates an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a load failure (blocking "failed to load" state)
    pub fn is_load_failed(&self) -> bool {
        matches!(self, Self::LoadFailed { .. })
    }

    /// Check if this is a rejected edit
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Mutation(_))
    }

    /// Check if this is an action refused for the current session state
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }

    /// Returns the rejected edit, if this error is one.
    pub fn as_mutation(&self) -> Option<&MutationError> {
        match self {
            Self::Mutation(err) => Some(err),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LiftlogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LiftlogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<MutationError> for LiftlogError {
    fn from(err: MutationError) -> Self {
        Self::Mutation(err)
    }
}

/// A type alias for `Result<T, LiftlogError>`.
pub type Result<T> = std::result::Result<T, LiftlogError>;
