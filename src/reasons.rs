use crate::models::{FeatureSet, VerdictCategory};

pub const MAX_HEURISTIC_REASONS: usize = 3;

struct Rule {
    applies: fn(&FeatureSet) -> bool,
    message: &'static str,
}

static FAKE_RULES: &[Rule] = &[
    Rule {
        applies: |f| f.sensational.count > 2,
        message: "Contains excessive sensational language",
    },
    Rule {
        applies: |f| f.emotional.score > 15,
        message: "Uses highly emotional and manipulative language",
    },
    Rule {
        applies: |f| f.clickbait.score > 10,
        message: "Shows strong clickbait characteristics",
    },
    Rule {
        applies: |f| f.writing_quality.score < 10,
        message: "Poor writing quality and structure",
    },
    Rule {
        applies: |f| f.fact_check.warning_count > 0,
        message: "Contains unverified claims and speculation",
    },
];

static REAL_RULES: &[Rule] = &[
    Rule {
        applies: |f| f.source_citation.source_mentions > 0,
        message: "Cites credible sources and references",
    },
    Rule {
        applies: |f| f.writing_quality.score > 15,
        message: "Professional writing quality and structure",
    },
    Rule {
        applies: |f| f.fact_check.fact_check_count > 0,
        message: "Contains fact-checking indicators",
    },
    Rule {
        applies: |f| f.sensational.count == 0,
        message: "Uses neutral, professional language",
    },
];

static UNCERTAIN_RULES: &[Rule] = &[
    Rule {
        applies: |f| f.sensational.count > 0 && f.source_citation.source_mentions > 0,
        message: "Mixed signals: sensational language with sources",
    },
    Rule {
        applies: |f| (10..=15).contains(&f.writing_quality.score),
        message: "Average writing quality, needs more analysis",
    },
    Rule {
        applies: |f| f.emotional.score > 0 && f.emotional.score < 15,
        message: "Some emotional language but not excessive",
    },
];

static FAKE_FALLBACK: &[&str] = &["Multiple fake news indicators detected"];
static REAL_FALLBACK: &[&str] = &["Shows characteristics of legitimate journalism"];
static UNCERTAIN_FALLBACK: &[&str] = &[
    "Insufficient evidence for clear classification",
    "Requires human fact-checking",
    "Mixed credibility indicators",
];
static INVALID_REASONS: &[&str] = &["No content provided for analysis"];

/// Ordered, capped justifications for `category`. Never empty.
pub fn generate_reasons(category: VerdictCategory, features: &FeatureSet) -> Vec<String> {
    let (rules, fallback) = match category {
        VerdictCategory::LikelyFake => (FAKE_RULES, FAKE_FALLBACK),
        VerdictCategory::LikelyReal => (REAL_RULES, REAL_FALLBACK),
        VerdictCategory::Uncertain => (UNCERTAIN_RULES, UNCERTAIN_FALLBACK),
        VerdictCategory::InvalidInput => (&[][..], INVALID_REASONS),
    };

    let matched: Vec<String> = rules
        .iter()
        .filter(|r| (r.applies)(features))
        .take(MAX_HEURISTIC_REASONS)
        .map(|r| r.message.to_string())
        .collect();

    if matched.is_empty() {
        fallback.iter().map(|s| s.to_string()).collect()
    } else {
        matched
    }
}
