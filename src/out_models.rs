use serde::Deserialize;

/* Remote classifier payload */

/// Exactly what the model is told to answer. Unknown fields are rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierPayload {
    pub verdict: String,    // "Likely Fake" | "Likely Real" | "Uncertain"
    pub confidence: f64,    // [60, 95]
    pub reasons: Vec<String>, // 2..=4
}

pub const MIN_REMOTE_CONFIDENCE: f64 = 60.0;
pub const MAX_REMOTE_CONFIDENCE: f64 = 95.0;
pub const MIN_REMOTE_REASONS: usize = 2;
pub const MAX_REMOTE_REASONS: usize = 4;
