use serde::{Deserialize, Serialize};

/// What the caller handed us. Any subset of the fields may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    pub headline: Option<String>,
    pub body_text: Option<String>,
    pub url: Option<String>,
}

impl RawInput {
    /// True when every field is absent or blank.
    pub fn is_empty(&self) -> bool {
        [&self.headline, &self.body_text, &self.url]
            .iter()
            .all(|f| f.as_deref().map_or(true, |s| s.trim().is_empty()))
    }

    pub fn url(&self) -> Option<&str> {
        non_blank(&self.url)
    }

    /// Headline wins over body text when both are given.
    pub fn manual_text(&self) -> Option<&str> {
        non_blank(&self.headline).or_else(|| non_blank(&self.body_text))
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedContent {
    pub source_domain: Option<String>, // only for URL input
    pub title: Option<String>,
    pub description: Option<String>,
    pub body_text: String, // ≤ BODY_CHAR_BUDGET chars
    pub analyzable_text: String,
}

/* Feature signals */

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SensationalSignal {
    pub count: u32,
    pub score: i32, // [0, 30]
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmotionalSignal {
    pub emotional_word_count: u32,
    pub excessive_caps: u32,
    pub excessive_exclamation: u32,
    pub score: i32, // [0, 25]
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceCitationSignal {
    pub source_mentions: u32,
    pub score: i32, // [0, 30], subtracted in aggregation
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WritingQualitySignal {
    pub avg_words_per_sentence: f64,
    pub short_sentences: u32,
    pub long_sentences: u32,
    pub grammar_issues: u32,
    pub score: i32, // [0, 20]
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FactCheckSignal {
    pub fact_check_count: u32,
    pub warning_count: u32,
    pub score: i32, // ≥ 0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClickbaitSignal {
    pub numbers: u32,
    pub questions: u32,
    pub superlatives: u32,
    pub urgency_words: u32,
    pub score: i32, // [0, 20]
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureSet {
    pub sensational: SensationalSignal,
    pub emotional: EmotionalSignal,
    pub source_citation: SourceCitationSignal,
    pub writing_quality: WritingQualitySignal,
    pub fact_check: FactCheckSignal,
    pub clickbait: ClickbaitSignal,
}

/* Verdict */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictCategory {
    LikelyFake,
    LikelyReal,
    Uncertain,
    InvalidInput,
}

impl VerdictCategory {
    pub fn label(self) -> &'static str {
        match self {
            VerdictCategory::LikelyFake => "Likely Fake",
            VerdictCategory::LikelyReal => "Likely Real",
            VerdictCategory::Uncertain => "Uncertain",
            VerdictCategory::InvalidInput => "Invalid Input",
        }
    }

    /// Only the three score-based categories are accepted from the outside.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Likely Fake" => Some(VerdictCategory::LikelyFake),
            "Likely Real" => Some(VerdictCategory::LikelyReal),
            "Uncertain" => Some(VerdictCategory::Uncertain),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayColors {
    pub color: &'static str,
    pub bg_color: &'static str,
    pub border_color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub category: VerdictCategory,
    pub confidence: u8, // [0, 100]
    pub reasons: Vec<String>,
    pub colors: DisplayColors,
}
