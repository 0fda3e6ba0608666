// Fixed lexicons. All matching is case-insensitive substring matching against
// the lowercased text, each entry counted at most once.

pub static SENSATIONAL_WORDS: &[&str] = &[
    "shocking", "unbelievable", "incredible", "amazing", "outrageous",
    "devastating", "explosive", "breaking", "urgent", "must read",
    "you won't believe", "this will blow your mind", "viral", "trending",
    "exclusive", "leaked", "secret", "hidden", "conspiracy", "cover-up",
];

pub static EMOTIONAL_WORDS: &[&str] = &[
    "hate", "love", "angry", "furious", "devastated", "heartbroken",
    "ecstatic", "terrified", "disgusted", "outraged", "shocked",
];

pub static CREDIBLE_SOURCE_PHRASES: &[&str] = &[
    "according to", "study shows", "research indicates", "experts say",
    "official report", "confirmed by", "verified by", "documents show",
    "data reveals", "statistics indicate",
];

pub static FACT_CHECK_PHRASES: &[&str] = &[
    "fact check", "verified", "confirmed", "authentic", "genuine",
    "corroborated", "substantiated", "validated", "cross-referenced",
];

pub static HEDGE_PHRASES: &[&str] = &[
    "rumor has it", "allegedly", "supposedly", "reportedly", "claims",
    "sources say", "unconfirmed reports", "speculation", "conspiracy theory",
];

pub static SUPERLATIVES: &[&str] = &["best", "worst", "most", "biggest", "smallest", "first", "last"];

pub static URGENCY_WORDS: &[&str] = &["now", "today", "immediately", "urgent", "asap"];

/// Number of distinct lexicon entries occurring in `text_lower`.
pub fn count_present(text_lower: &str, lexicon: &[&str]) -> u32 {
    lexicon.iter().filter(|term| text_lower.contains(*term)).count() as u32
}
