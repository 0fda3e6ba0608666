use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::{
    count_present, CREDIBLE_SOURCE_PHRASES, EMOTIONAL_WORDS, FACT_CHECK_PHRASES, HEDGE_PHRASES,
    SENSATIONAL_WORDS, SUPERLATIVES, URGENCY_WORDS,
};
use crate::models::{
    ClickbaitSignal, EmotionalSignal, FactCheckSignal, FeatureSet, SensationalSignal,
    SourceCitationSignal, WritingQualitySignal,
};

static CAPS_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{3,}").unwrap());
static EXCLAMATION_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!{2,}").unwrap());
static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static NUMBER_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9]+\b").unwrap());
static LONG_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]{16,}").unwrap());

const SHORT_SENTENCE_WORDS: usize = 5;
const LONG_SENTENCE_WORDS: usize = 25;

/// Run all six detectors over the analyzable text.
pub fn extract_features(text: &str) -> FeatureSet {
    let lower = text.to_lowercase();
    FeatureSet {
        sensational: sensational_language(&lower),
        emotional: emotional_language(text, &lower),
        source_citation: source_citations(&lower),
        writing_quality: writing_quality(text),
        fact_check: fact_check_indicators(&lower),
        clickbait: clickbait(text, &lower),
    }
}

pub fn sensational_language(lower: &str) -> SensationalSignal {
    let count = count_present(lower, SENSATIONAL_WORDS);
    SensationalSignal {
        count,
        score: (count as i32 * 10).min(30),
    }
}

pub fn emotional_language(text: &str, lower: &str) -> EmotionalSignal {
    let emotional_word_count = count_present(lower, EMOTIONAL_WORDS);
    let excessive_caps = CAPS_RUN_RE.find_iter(text).count() as u32;
    let excessive_exclamation = EXCLAMATION_RUN_RE.find_iter(text).count() as u32;
    let raw = emotional_word_count as i32 * 5 + excessive_caps as i32 * 10 + excessive_exclamation as i32 * 8;
    EmotionalSignal {
        emotional_word_count,
        excessive_caps,
        excessive_exclamation,
        score: raw.min(25),
    }
}

pub fn source_citations(lower: &str) -> SourceCitationSignal {
    let source_mentions = count_present(lower, CREDIBLE_SOURCE_PHRASES);
    SourceCitationSignal {
        source_mentions,
        score: (source_mentions as i32 * 15).min(30),
    }
}

/// Sentence/word statistics. Text without any terminator is one sentence;
/// text with no sentence at all contributes nothing.
pub fn writing_quality(text: &str) -> WritingQualitySignal {
    let sentences: Vec<&str> = SENTENCE_END_RE
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .collect();
    if sentences.is_empty() {
        return WritingQualitySignal::default();
    }

    let word_count = text.split_whitespace().count();
    let sentence_words: Vec<usize> = sentences.iter().map(|s| s.split_whitespace().count()).collect();
    let short_sentences = sentence_words.iter().filter(|&&n| n < SHORT_SENTENCE_WORDS).count() as u32;
    let long_sentences = sentence_words.iter().filter(|&&n| n > LONG_SENTENCE_WORDS).count() as u32;
    let grammar_issues = LONG_TOKEN_RE.find_iter(text).count() as u32;

    let score = 20 - short_sentences as i32 * 2 - long_sentences as i32 - grammar_issues as i32 * 3;

    WritingQualitySignal {
        avg_words_per_sentence: word_count as f64 / sentences.len() as f64,
        short_sentences,
        long_sentences,
        grammar_issues,
        score: score.max(0),
    }
}

pub fn fact_check_indicators(lower: &str) -> FactCheckSignal {
    let fact_check_count = count_present(lower, FACT_CHECK_PHRASES);
    let warning_count = count_present(lower, HEDGE_PHRASES);
    FactCheckSignal {
        fact_check_count,
        warning_count,
        score: (fact_check_count as i32 * 10 - warning_count as i32 * 5).max(0),
    }
}

pub fn clickbait(text: &str, lower: &str) -> ClickbaitSignal {
    let numbers = NUMBER_TOKEN_RE.find_iter(text).count() as u32;
    let questions = text.matches('?').count() as u32;
    let superlatives = count_present(lower, SUPERLATIVES);
    let urgency_words = count_present(lower, URGENCY_WORDS);
    let sum = (numbers + questions + superlatives + urgency_words) as i32;
    ClickbaitSignal {
        numbers,
        questions,
        superlatives,
        urgency_words,
        score: (sum * 2).min(20),
    }
}
