//! Shared error taxonomy for the Reelcraft composer.
//!
//! This crate provides the foundational types used across all other Reelcraft
//! crates:
//! - `ReelcraftError` — unified error taxonomy
//! - `Result` — convenience alias
//!
//! Two error classes matter to the pipeline: retryable failures of a
//! generative call (schema-invalid output, timeouts, rate limits) and fatal
//! failures that abort the whole run with no partial result.

// ---------------------------------------------------------------------------
// ReelcraftError
// ---------------------------------------------------------------------------

/// Unified error type for all Reelcraft subsystems.
#[derive(Debug, thiserror::Error)]
pub enum ReelcraftError {
    // === Generative call errors ===
    #[error("Stage '{stage}' returned schema-invalid output: {message}")]
    SchemaError { stage: String, message: String },

    #[error("Stage '{stage}' timed out after {timeout_ms}ms")]
    RequestTimeout { stage: String, timeout_ms: u64 },

    #[error("Rate limited by {provider}, retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: u64,
    },

    #[error("Provider {provider} returned HTTP {status}: {message}")]
    ProviderError {
        provider: String,
        status: u16,
        message: String,
        retryable: bool,
    },

    #[error("Authentication failed for provider {provider}")]
    AuthError { provider: String },

    #[error("Max retries exhausted for stage '{stage}' after {attempts} attempts")]
    RetriesExhausted { stage: String, attempts: usize },

    // === Orchestration errors ===
    #[error("Invalid timeline state transition: {from} -> {to}")]
    InvalidState { from: String, to: String },

    #[error("Invalid run input: {0}")]
    InvalidInput(String),

    // === Generic ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ReelcraftError {
    /// Returns `true` if the error is transient and the generative call may
    /// succeed when reissued with identical input.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReelcraftError::SchemaError { .. }
                | ReelcraftError::RequestTimeout { .. }
                | ReelcraftError::RateLimited { .. }
                | ReelcraftError::ProviderError {
                    retryable: true,
                    ..
                }
        )
    }

    /// Returns `true` if the error aborts the run. Fatal errors never yield a
    /// partial timeline.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ReelcraftError::AuthError { .. }
                | ReelcraftError::RetriesExhausted { .. }
                | ReelcraftError::InvalidState { .. }
                | ReelcraftError::InvalidInput(_)
        )
    }
}

/// A convenience alias for `Result<T, ReelcraftError>`.
pub type Result<T> = std::result::Result<T, ReelcraftError>;
