use std::time::Duration;
use thiserror::Error;

pub type DetectResult<T> = std::result::Result<T, DetectError>;

/// Every failure the pipeline can report. Stages classify their own failures
/// into one of these; the raw cause travels in the payload for logging only.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("no url, text or headline provided")]
    InvalidInput,

    #[error("invalid url {url:?}: {detail}")]
    InvalidUrl { url: String, detail: String },

    #[error("fetch timed out after {:.1}s", .0.as_secs_f32())]
    FetchTimeout(Duration),

    #[error("fetch failed (status={status:?}): {detail}")]
    FetchError { status: Option<u16>, detail: String },

    #[error("malformed classifier response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DetectError {
    /// Fixed user-facing message. Never includes the raw cause.
    pub fn user_message(&self) -> &'static str {
        match self {
            DetectError::InvalidInput => "Please provide URL, text, or headline",
            DetectError::InvalidUrl { .. } => "Invalid URL format",
            DetectError::FetchTimeout(_) => "Request timeout - the website took too long to respond",
            DetectError::FetchError { status: Some(_), .. } => "Failed to fetch content from URL",
            DetectError::FetchError { status: None, .. } => "Failed to fetch or parse URL content",
            DetectError::MalformedUpstreamResponse(_) => "Invalid response from AI",
            DetectError::Internal(_) => "Internal server error",
        }
    }

    /// HTTP-equivalent status.
    pub fn status(&self) -> u16 {
        match self {
            DetectError::InvalidInput
            | DetectError::InvalidUrl { .. }
            | DetectError::FetchTimeout(_)
            | DetectError::FetchError { .. } => 400,
            DetectError::MalformedUpstreamResponse(_) | DetectError::Internal(_) => 500,
        }
    }
}
