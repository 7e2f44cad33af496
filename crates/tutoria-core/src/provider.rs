//! Provider adapter seam.
//!
//! A provider adapter turns [`GenerationParameters`] into raw content by
//! calling an external model. Adapters are injected into the orchestrator
//! in priority order; nothing in the core knows which concrete backends
//! exist.

use std::time::Duration;
use thiserror::Error;

use crate::generation::{ExerciseSlot, GeneratedExercise, GenerationParameters};

/// Why a provider tier failed. Never surfaced to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// No credential configured for the provider
    #[error("{0} is not configured")]
    NotConfigured(String),

    /// Transport or HTTP-level failure
    #[error("request failed{}: {message}", status_suffix(.status_code))]
    Request {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        /// Server-provided back-off hint (`Retry-After`)
        retry_after: Option<Duration>,
    },

    /// The provider answered with no usable text
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// The provider answered, but the content failed structural validation
    #[error("malformed provider output: {0}")]
    MalformedOutput(String),

    /// The call did not finish within the configured bound
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),
}

fn status_suffix(status_code: &Option<u16>) -> String {
    status_code
        .map(|code| format!(" (status {code})"))
        .unwrap_or_default()
}

impl ProviderError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            status_code: None,
            message: message.into(),
            is_retryable: false,
            retry_after: None,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedOutput(message.into())
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request { is_retryable, .. } => *is_retryable,
            Self::Timeout(_) => true,
            _ => false,
        }
    }
}

/// An external content provider (one tier).
#[async_trait::async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Stable identity used in provenance and logs (e.g. "groq").
    fn id(&self) -> &str;

    /// Model name reported in provenance.
    fn model(&self) -> &str;

    /// Cheap synchronous capability check, e.g. "is a credential configured".
    fn is_available(&self) -> bool;

    /// Generates an explanation as free text.
    async fn generate_explanation(
        &self,
        params: &GenerationParameters,
    ) -> Result<String, ProviderError>;

    /// Generates one multiple-choice exercise for the given batch slot.
    async fn generate_exercise(
        &self,
        params: &GenerationParameters,
        slot: ExerciseSlot,
    ) -> Result<GeneratedExercise, ProviderError>;
}
