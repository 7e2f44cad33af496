//! Error types for the TutorIA core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire TutorIA workspace.
///
/// Provider failures are deliberately absent: they are modelled by
/// [`crate::provider::ProviderError`] and never escape the orchestrator.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TutorError {
    /// Malformed request or profile input, rejected before generation starts
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// A caller broke a programming contract (e.g. a zero-sized exercise batch)
    #[error("Contract violation: {0}")]
    Contract(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Multiple errors
    #[error("Multiple errors occurred ({} total): {}", .0.len(), join_messages(.0))]
    Multiple(Vec<TutorError>),
}

fn join_messages(errors: &[TutorError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl TutorError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error for the given input field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a Contract error
    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Collapses a list of errors: `Ok` when empty, the error itself when
    /// there is exactly one, `Multiple` otherwise.
    pub fn from_many(mut errors: Vec<TutorError>) -> Result<()> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(Self::Multiple(errors)),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a validation error (or a collection of them)
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation { .. } => true,
            Self::Multiple(errors) => errors.iter().all(Self::is_validation),
            _ => false,
        }
    }

    /// Check if this is a contract violation
    pub fn is_contract(&self) -> bool {
        matches!(self, Self::Contract(_))
    }

    /// Returns every field name mentioned by validation errors.
    pub fn invalid_fields(&self) -> Vec<&str> {
        match self {
            Self::Validation { field, .. } => vec![field.as_str()],
            Self::Multiple(errors) => errors.iter().flat_map(Self::invalid_fields).collect(),
            _ => Vec::new(),
        }
    }
}

/// A type alias for `Result<T, TutorError>`.
pub type Result<T> = std::result::Result<T, TutorError>;
