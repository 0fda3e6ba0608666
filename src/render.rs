// src/render.rs
use crate::models::{FeatureSet, Verdict};
use crate::verdict::total_score;

pub fn render_verdict_text(v: &Verdict) -> String {
    let mut out = String::new();
    out.push_str(&format!("Verdict: {} ({}% confidence)\n", v.category.label(), v.confidence));

    if !v.reasons.is_empty() {
        out.push_str("\nReasons:\n");
        for r in &v.reasons {
            out.push_str(&format!("- {}\n", r));
        }
    }

    out
}

pub fn render_feature_breakdown(f: &FeatureSet) -> String {
    let mut out = String::new();
    out.push_str("Signals:\n");
    out.push_str(&format!(
        "- sensational      {:>3}  (hits={})\n",
        f.sensational.score, f.sensational.count
    ));
    out.push_str(&format!(
        "- emotional        {:>3}  (words={}, caps_runs={}, exclamation_runs={})\n",
        f.emotional.score,
        f.emotional.emotional_word_count,
        f.emotional.excessive_caps,
        f.emotional.excessive_exclamation
    ));
    out.push_str(&format!(
        "- source citation -{:>3}  (mentions={})\n",
        f.source_citation.score, f.source_citation.source_mentions
    ));
    out.push_str(&format!(
        "- writing quality  {:>3}  (avg_words={:.1}, short={}, long={}, long_tokens={})\n",
        f.writing_quality.score,
        f.writing_quality.avg_words_per_sentence,
        f.writing_quality.short_sentences,
        f.writing_quality.long_sentences,
        f.writing_quality.grammar_issues
    ));
    out.push_str(&format!(
        "- fact check       {:>3}  (confirmations={}, hedges={})\n",
        f.fact_check.score, f.fact_check.fact_check_count, f.fact_check.warning_count
    ));
    out.push_str(&format!(
        "- clickbait        {:>3}  (numbers={}, questions={}, superlatives={}, urgency={})\n",
        f.clickbait.score,
        f.clickbait.numbers,
        f.clickbait.questions,
        f.clickbait.superlatives,
        f.clickbait.urgency_words
    ));
    out.push_str(&format!("Total: {}\n", total_score(f)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract_features;
    use crate::verdict::analyze_text;

    #[test]
    fn verdict_text_lists_reasons() {
        let v = analyze_text("SHOCKING: You won't believe what happened next!!!");
        assert_eq!(
            render_verdict_text(&v),
            "Verdict: Likely Fake (95% confidence)\n\nReasons:\n- Uses highly emotional and manipulative language\n"
        );
    }

    #[test]
    fn breakdown_ends_with_total() {
        let out = render_feature_breakdown(&extract_features("SHOCKING: You won't believe what happened next!!!"));
        assert!(out.ends_with("Total: 58\n"));
        assert!(out.contains("- sensational       20  (hits=2)"));
    }
}
