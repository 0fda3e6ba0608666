/// Fixed instruction for the remote classifier. The chat template carries the
/// same text as its system prompt; it is repeated here so the user turn is
/// self-contained even with a bare template.
pub const CLASSIFIER_INSTRUCTION: &str = r#"You are an expert fake news detection system. Analyze the provided content and determine if it's likely fake news, real news, or uncertain.

IMPORTANT: Consider the source domain when provided. Established news organizations (BBC, Reuters, AP, CNN, Times of India, The Guardian, etc.) are generally credible unless the content itself shows clear manipulation.

For URL-based analysis: Consider both the source domain reputation AND the content quality.
For manual input: Focus on content analysis only.

Respond ONLY with valid JSON in this exact format:
{
  "verdict": "Likely Fake" | "Likely Real" | "Uncertain",
  "confidence": <number between 60-95>,
  "reasons": [<array of 2-4 specific, actionable reasons as strings>]
}

Key indicators of FAKE news:
- Unknown or suspicious source domains
- Sensational/clickbait language ("SHOCKING", "You won't believe")
- Emotional manipulation and fear-mongering
- Implausible or extraordinary claims without evidence
- Poor grammar or unprofessional writing
- Lack of credible sources or attribution
- Conspiracy theory language
- Extreme bias or one-sided narrative

Key indicators of REAL news:
- Established, reputable news organization
- Professional, neutral tone
- Credible source attribution
- Balanced perspective
- Verifiable facts and data
- Proper grammar and structure
- Reasonable, plausible claims
- Multiple sources cited

Only use "Uncertain" when the content is genuinely ambiguous or needs more context to determine credibility."#;

pub fn user_classification(analyzable_text: &str) -> String {
    format!(
        r#"{instruction}

CONTENT:
<{content}>"#,
        instruction = CLASSIFIER_INSTRUCTION,
        content = analyzable_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_content_after_instruction() {
        let p = user_classification("Source: bbc.com\nTitle: Budget");
        assert!(p.starts_with("You are an expert fake news detection system."));
        assert!(p.ends_with("<Source: bbc.com\nTitle: Budget>"));
    }
}
