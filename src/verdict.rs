use tracing::debug;

use crate::features::extract_features;
use crate::models::{DisplayColors, FeatureSet, Verdict, VerdictCategory};
use crate::reasons::generate_reasons;

pub const FAKE_THRESHOLD: i32 = 40;
pub const REAL_THRESHOLD: i32 = -20;

const CONFIDENCE_BASE: i32 = 60;
const CONFIDENCE_CEILING: i32 = 95;
const UNCERTAIN_PENALTY: i32 = 20;
const UNCERTAIN_FLOOR: i32 = 50;

pub const INVALID_INPUT_REASON: &str = "No content provided for analysis";

const FAKE_COLORS: DisplayColors = DisplayColors {
    color: "text-red-600",
    bg_color: "bg-red-50",
    border_color: "border-red-200",
};
const REAL_COLORS: DisplayColors = DisplayColors {
    color: "text-green-600",
    bg_color: "bg-green-50",
    border_color: "border-green-200",
};
const UNCERTAIN_COLORS: DisplayColors = DisplayColors {
    color: "text-yellow-600",
    bg_color: "bg-yellow-50",
    border_color: "border-yellow-200",
};
const INVALID_COLORS: DisplayColors = DisplayColors {
    color: "text-gray-600",
    bg_color: "bg-gray-50",
    border_color: "border-gray-200",
};

impl DisplayColors {
    pub fn for_category(category: VerdictCategory) -> Self {
        match category {
            VerdictCategory::LikelyFake => FAKE_COLORS,
            VerdictCategory::LikelyReal => REAL_COLORS,
            VerdictCategory::Uncertain => UNCERTAIN_COLORS,
            VerdictCategory::InvalidInput => INVALID_COLORS,
        }
    }

    /// Lookup by display label; anything unrecognized gets the Uncertain triple.
    pub fn for_label(label: &str) -> Self {
        VerdictCategory::from_label(label)
            .map(Self::for_category)
            .unwrap_or(UNCERTAIN_COLORS)
    }
}

impl Verdict {
    pub fn new(category: VerdictCategory, confidence: u8, reasons: Vec<String>) -> Self {
        Self {
            category,
            confidence,
            reasons,
            colors: DisplayColors::for_category(category),
        }
    }

    pub fn invalid_input() -> Self {
        Self::new(VerdictCategory::InvalidInput, 0, vec![INVALID_INPUT_REASON.to_string()])
    }
}

/// Source citations pull the total towards "real"; everything else pushes
/// towards "fake".
pub fn total_score(f: &FeatureSet) -> i32 {
    f.sensational.score + f.emotional.score + f.writing_quality.score + f.fact_check.score
        - f.source_citation.score
        + f.clickbait.score
}

pub fn categorize(total: i32) -> (VerdictCategory, u8) {
    let confidence = (total.abs().saturating_add(CONFIDENCE_BASE)).min(CONFIDENCE_CEILING);
    let (category, confidence) = if total > FAKE_THRESHOLD {
        (VerdictCategory::LikelyFake, confidence)
    } else if total < REAL_THRESHOLD {
        (VerdictCategory::LikelyReal, confidence)
    } else {
        (
            VerdictCategory::Uncertain,
            (confidence - UNCERTAIN_PENALTY).max(UNCERTAIN_FLOOR),
        )
    };
    // confidence is within [50, 95] here
    (category, confidence as u8)
}

pub fn aggregate(features: &FeatureSet) -> Verdict {
    let total = total_score(features);
    let (category, confidence) = categorize(total);
    debug!(
        "Aggregated features - total={}, category={}, confidence={}",
        total,
        category.label(),
        confidence
    );
    Verdict::new(category, confidence, generate_reasons(category, features))
}

/// Heuristic classification of an analyzable text.
pub fn analyze_text(text: &str) -> Verdict {
    if text.trim().is_empty() {
        return Verdict::invalid_input();
    }
    aggregate(&extract_features(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClickbaitSignal, SensationalSignal, SourceCitationSignal};
    use proptest::prelude::*;

    #[test]
    fn blank_text_is_invalid_input() {
        let v = analyze_text("  \n ");
        assert_eq!(v.category, VerdictCategory::InvalidInput);
        assert_eq!(v.confidence, 0);
        assert_eq!(v.reasons, vec!["No content provided for analysis".to_string()]);
        assert_eq!(v.colors.color, "text-gray-600");
    }

    #[test]
    fn all_zero_features_are_uncertain() {
        let f = FeatureSet::default();
        assert_eq!(total_score(&f), 0);
        let v = aggregate(&f);
        assert_eq!(v.category, VerdictCategory::Uncertain);
        assert_eq!(v.confidence, 50);
    }

    #[test]
    fn shocking_headline_is_likely_fake() {
        let text = "SHOCKING: You won't believe what happened next!!!";
        let f = extract_features(text);
        assert_eq!(f.sensational.score, 20);
        assert_eq!(f.emotional.score, 18);
        assert_eq!(f.writing_quality.score, 20);
        assert_eq!(total_score(&f), 58);

        let v = analyze_text(text);
        assert_eq!(v.category, VerdictCategory::LikelyFake);
        assert_eq!(v.confidence, 95);
        assert_eq!(v.colors, DisplayColors::for_category(VerdictCategory::LikelyFake));
        assert_eq!(v.reasons, vec!["Uses highly emotional and manipulative language".to_string()]);
    }

    #[test]
    fn confirmations_count_towards_the_fake_side() {
        // Citations subtract, but confirmatory phrases add and writing is clean.
        let text = "According to a study published by researchers, data confirmed the findings were verified by independent experts.";
        let f = extract_features(text);
        assert_eq!(f.source_citation.score, 30);
        assert_eq!(f.fact_check.score, 20);
        assert_eq!(f.writing_quality.score, 20);
        assert_eq!(total_score(&f), 10);
        assert_eq!(analyze_text(text).category, VerdictCategory::Uncertain);
    }

    #[test]
    fn heavily_cited_terse_report_is_likely_real() {
        let text = "According to officials. Experts say so. Data reveals more. Study shows this. Official report filed. Statistics indicate trends.";
        let f = extract_features(text);
        assert_eq!(f.source_citation.score, 30);
        assert_eq!(f.writing_quality.score, 8);
        assert_eq!(total_score(&f), -22);

        let v = analyze_text(text);
        assert_eq!(v.category, VerdictCategory::LikelyReal);
        assert_eq!(v.confidence, 82);
        assert_eq!(
            v.reasons,
            vec![
                "Cites credible sources and references".to_string(),
                "Uses neutral, professional language".to_string(),
            ]
        );
    }

    #[test]
    fn neutral_text_loses_twenty_confidence() {
        let text = "The city council met on Tuesday to discuss the annual budget for public parks.";
        let f = extract_features(text);
        assert_eq!(total_score(&f), 20);
        let v = analyze_text(text);
        assert_eq!(v.category, VerdictCategory::Uncertain);
        assert_eq!(v.confidence, 60);
        assert_eq!(v.reasons.len(), 3);
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(categorize(40).0, VerdictCategory::Uncertain);
        assert_eq!(categorize(41), (VerdictCategory::LikelyFake, 95));
        assert_eq!(categorize(-20).0, VerdictCategory::Uncertain);
        assert_eq!(categorize(-21), (VerdictCategory::LikelyReal, 81));
        assert_eq!(categorize(-20).1, 60);
        assert_eq!(categorize(5).1, 50);
    }

    #[test]
    fn unknown_labels_fall_back_to_uncertain_colors() {
        assert_eq!(DisplayColors::for_label("Likely Real").color, "text-green-600");
        assert_eq!(DisplayColors::for_label("Satire"), UNCERTAIN_COLORS);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let f = FeatureSet {
            sensational: SensationalSignal { count: 3, score: 30 },
            source_citation: SourceCitationSignal { source_mentions: 1, score: 15 },
            clickbait: ClickbaitSignal { numbers: 2, score: 4, ..Default::default() },
            ..Default::default()
        };
        assert_eq!(aggregate(&f), aggregate(&f.clone()));
    }

    proptest! {
        #[test]
        fn categories_partition_the_score_line(total in -200i32..200) {
            let (category, confidence) = categorize(total);
            let expected = if total > 40 {
                VerdictCategory::LikelyFake
            } else if total < -20 {
                VerdictCategory::LikelyReal
            } else {
                VerdictCategory::Uncertain
            };
            prop_assert_eq!(category, expected);
            prop_assert!((50..=95).contains(&confidence));
        }

        #[test]
        fn any_text_yields_bounded_verdict(text in ".{0,400}") {
            let v = analyze_text(&text);
            if v.category == VerdictCategory::InvalidInput {
                prop_assert_eq!(v.confidence, 0);
            } else {
                prop_assert!((50..=95).contains(&v.confidence));
            }
            prop_assert!((1..=4).contains(&v.reasons.len()));
        }

        #[test]
        fn sub_scores_stay_in_range(text in "[A-Za-z!?. 0-9]{0,300}") {
            let f = extract_features(&text);
            prop_assert!((0..=30).contains(&f.sensational.score));
            prop_assert!((0..=25).contains(&f.emotional.score));
            prop_assert!((0..=30).contains(&f.source_citation.score));
            prop_assert!((0..=20).contains(&f.writing_quality.score));
            prop_assert!(f.fact_check.score >= 0);
            prop_assert!((0..=20).contains(&f.clickbait.score));
        }
    }
}
