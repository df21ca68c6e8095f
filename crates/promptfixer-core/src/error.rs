//! Error types.
//!
//! `BackendError` lives here rather than in `promptfixer-providers` so the
//! session controller can downcast and report backend failures without
//! string matching.

use thiserror::Error;

use crate::session::Action;

/// Errors that can occur when talking to the prompt backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (missing or invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The endpoint does not exist on the configured backend.
    #[error("endpoint not found: {0}")]
    EndpointNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl BackendError {
    /// Returns `true` if retrying the same request cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            BackendError::AuthenticationFailed(_) | BackendError::EndpointNotFound(_)
        )
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            BackendError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}

/// Errors surfaced by [`crate::session::PromptSession`] actions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// There is no prompt text to act on.
    #[error("{}", .0.empty_prompt_message())]
    EmptyPrompt(Action),

    /// The prompt exceeds the configured length limit.
    #[error("prompt is {len} characters, the limit is {max}")]
    PromptTooLong { len: usize, max: usize },

    /// The backend failed and demo fallback is disabled.
    #[error("failed to {action} prompt: {cause:#}")]
    Backend { action: Action, cause: anyhow::Error },
}
