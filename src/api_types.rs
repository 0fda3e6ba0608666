use serde::{Deserialize, Serialize};

use crate::error::DetectError;
use crate::models::{RawInput, Verdict};

/// Request accepted at the boundary. All fields are optional; at least one
/// must be non-blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// One JSON line of batch input. A line that does not deserialize is an
/// unexpected request body, not a missing-content request.
pub fn parse_batch_line(line: &str) -> Result<DetectRequest, DetectError> {
    serde_json::from_str(line).map_err(|e| DetectError::Internal(format!("unparsable request line: {e}")))
}

impl From<DetectRequest> for RawInput {
    fn from(r: DetectRequest) -> Self {
        RawInput {
            headline: r.headline,
            body_text: r.text,
            url: r.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectResponse {
    pub verdict: String,
    pub confidence: u8,
    pub reasons: Vec<String>,
    pub color: &'static str,
    pub bg_color: &'static str,
    pub border_color: &'static str,
}

impl From<&Verdict> for DetectResponse {
    fn from(v: &Verdict) -> Self {
        DetectResponse {
            verdict: v.category.label().to_string(),
            confidence: v.confidence,
            reasons: v.reasons.clone(),
            color: v.colors.color,
            bg_color: v.colors.bg_color,
            border_color: v.colors.border_color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl From<&DetectError> for ErrorBody {
    fn from(e: &DetectError) -> Self {
        ErrorBody {
            error: e.user_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetectReply {
    Verdict(DetectResponse),
    Error(ErrorBody),
}

/// One output line of batch mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRecord {
    pub line: usize,
    pub status: u16,
    #[serde(flatten)]
    pub reply: DetectReply,
}

impl BatchRecord {
    pub fn new(line: usize, outcome: &Result<Verdict, DetectError>) -> Self {
        match outcome {
            Ok(v) => BatchRecord {
                line,
                status: 200,
                reply: DetectReply::Verdict(v.into()),
            },
            Err(e) => BatchRecord {
                line,
                status: e.status(),
                reply: DetectReply::Error(e.into()),
            },
        }
    }
}
