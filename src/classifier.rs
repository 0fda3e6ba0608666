use anyhow::{anyhow, Result};
use awful_aj::{api::ask, config::AwfulJadeConfig, template::ChatTemplate};
use futures::future::{FutureExt, LocalBoxFuture};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::error::{DetectError, DetectResult};
use crate::models::{DisplayColors, Verdict, VerdictCategory};
use crate::out_models::{
    ClassifierPayload, MAX_REMOTE_CONFIDENCE, MAX_REMOTE_REASONS, MIN_REMOTE_CONFIDENCE,
    MIN_REMOTE_REASONS,
};
use crate::prompts::user_classification;

pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

/// An alternate verdict source. Implementations return the raw model answer;
/// validation happens in [`classify_remote`]. Implementations are shared by
/// every request a [`crate::orchestrator::Detector`] serves, so they must be
/// thread-safe; the returned future itself may stay on one task.
pub trait RemoteClassifier: Send + Sync {
    fn complete<'a>(&'a self, analyzable_text: &'a str) -> LocalBoxFuture<'a, Result<String>>;
}

/// Hosted LLM reached through awful_aj.
pub struct AwfulJadeClassifier {
    cfg: AwfulJadeConfig,
    tpl: ChatTemplate,
}

impl AwfulJadeClassifier {
    pub fn new(cfg: AwfulJadeConfig, tpl: ChatTemplate) -> Self {
        Self { cfg, tpl }
    }
}

impl RemoteClassifier for AwfulJadeClassifier {
    fn complete<'a>(&'a self, analyzable_text: &'a str) -> LocalBoxFuture<'a, Result<String>> {
        async move { llm_call(&self.cfg, &self.tpl, &user_classification(analyzable_text)).await }
            .boxed_local()
    }
}

async fn llm_call(cfg: &AwfulJadeConfig, tpl: &ChatTemplate, user: &str) -> Result<String> {
    let start = std::time::Instant::now();
    debug!("Classifier request - prompt_chars={}", user.chars().count());

    // awful_aj errors are boxed trait objects
    let answer = ask(cfg, user.to_owned(), tpl, None, None, false)
        .await
        .map_err(|e| anyhow!("awful_aj ask: {e}"))?;

    info!(
        "Classifier answered - duration={:.2}s, answer_chars={}",
        start.elapsed().as_secs_f32(),
        answer.chars().count()
    );
    Ok(answer)
}

/// One attempt, bounded by `timeout`. Dropping the future on timeout aborts
/// the in-flight call.
pub async fn classify_remote(
    classifier: &dyn RemoteClassifier,
    analyzable_text: &str,
    timeout: Duration,
) -> DetectResult<Verdict> {
    let answer = match tokio::time::timeout(timeout, classifier.complete(analyzable_text)).await {
        Ok(Ok(answer)) => answer,
        Ok(Err(e)) => {
            error!("Remote classifier call failed - error={:#}", e);
            return Err(DetectError::Internal(format!("remote classifier: {e:#}")));
        }
        Err(_) => {
            error!("Remote classifier timed out - timeout={:.1}s", timeout.as_secs_f32());
            return Err(DetectError::Internal(format!(
                "remote classifier timed out after {:.1}s",
                timeout.as_secs_f32()
            )));
        }
    };
    parse_verdict(&answer)
}

/// Strict validation of the model's answer into a [`Verdict`].
pub fn parse_verdict(answer: &str) -> DetectResult<Verdict> {
    let payload: ClassifierPayload = serde_json::from_str(answer.trim()).map_err(|e| {
        warn!("Unparsable classifier answer - error={}, answer={:?}", e, answer);
        DetectError::MalformedUpstreamResponse(e.to_string())
    })?;

    let category = VerdictCategory::from_label(&payload.verdict).ok_or_else(|| {
        malformed(format!("unknown verdict {:?}", payload.verdict))
    })?;

    let confidence = payload.confidence;
    if !confidence.is_finite() || !(MIN_REMOTE_CONFIDENCE..=MAX_REMOTE_CONFIDENCE).contains(&confidence) {
        return Err(malformed(format!("confidence {confidence} outside [60, 95]")));
    }

    let n = payload.reasons.len();
    if !(MIN_REMOTE_REASONS..=MAX_REMOTE_REASONS).contains(&n) {
        return Err(malformed(format!("{n} reasons, expected 2 to 4")));
    }
    if payload.reasons.iter().any(|r| r.trim().is_empty()) {
        return Err(malformed("blank reason".to_string()));
    }

    Ok(Verdict {
        category,
        confidence: confidence.round() as u8,
        colors: DisplayColors::for_label(&payload.verdict),
        reasons: payload.reasons,
    })
}

fn malformed(detail: String) -> DetectError {
    warn!("Classifier answer rejected - {}", detail);
    DetectError::MalformedUpstreamResponse(detail)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned answers for tests.
    pub(crate) struct StubClassifier {
        pub answer: Result<String, String>,
        pub delay: Duration,
        pub calls: AtomicUsize,
    }

    impl StubClassifier {
        pub(crate) fn answering(answer: &str) -> Self {
            Self {
                answer: Ok(answer.to_string()),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl RemoteClassifier for StubClassifier {
        fn complete<'a>(&'a self, _text: &'a str) -> LocalBoxFuture<'a, Result<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            async move {
                tokio::time::sleep(self.delay).await;
                self.answer.clone().map_err(|e| anyhow!(e))
            }
            .boxed_local()
        }
    }

    #[test]
    fn accepts_a_conforming_answer() {
        let v = parse_verdict(
            r#"  {"verdict":"Likely Real","confidence":88,"reasons":["Cites Reuters","Neutral tone"]} "#,
        )
        .unwrap();
        assert_eq!(v.category, VerdictCategory::LikelyReal);
        assert_eq!(v.confidence, 88);
        assert_eq!(v.reasons.len(), 2);
        assert_eq!(v.colors, DisplayColors::for_category(VerdictCategory::LikelyReal));
    }

    #[test]
    fn fractional_confidence_is_rounded() {
        let v = parse_verdict(r#"{"verdict":"Uncertain","confidence":72.6,"reasons":["a","b"]}"#).unwrap();
        assert_eq!(v.confidence, 73);
    }

    #[test]
    fn rejects_schema_violations() {
        let bad = [
            "not json at all",
            "```json\n{\"verdict\":\"Likely Fake\",\"confidence\":90,\"reasons\":[\"a\",\"b\"]}\n```",
            r#"{"verdict":"Satire","confidence":80,"reasons":["a","b"]}"#,
            r#"{"verdict":"Likely Fake","confidence":99,"reasons":["a","b"]}"#,
            r#"{"verdict":"Likely Fake","confidence":40,"reasons":["a","b"]}"#,
            r#"{"verdict":"Likely Fake","confidence":"high","reasons":["a","b"]}"#,
            r#"{"verdict":"Likely Fake","confidence":80,"reasons":["only one"]}"#,
            r#"{"verdict":"Likely Fake","confidence":80,"reasons":["a","b","c","d","e"]}"#,
            r#"{"verdict":"Likely Fake","confidence":80,"reasons":["a","  "]}"#,
            r#"{"verdict":"Likely Fake","confidence":80}"#,
            r#"{"verdict":"Likely Fake","confidence":80,"reasons":["a","b"],"color":"red"}"#,
        ];
        for answer in bad {
            let err = parse_verdict(answer).unwrap_err();
            assert!(
                matches!(err, DetectError::MalformedUpstreamResponse(_)),
                "{answer}: {err}"
            );
            assert_eq!(err.status(), 500);
            assert_eq!(err.user_message(), "Invalid response from AI");
        }
    }

    #[tokio::test]
    async fn transport_failure_is_internal() {
        let stub = StubClassifier {
            answer: Err("connection reset".into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        };
        let err = classify_remote(&stub, "text", DEFAULT_REMOTE_TIMEOUT).await.unwrap_err();
        assert!(matches!(err, DetectError::Internal(_)));
        assert_eq!(err.user_message(), "Internal server error");
    }

    #[tokio::test]
    async fn slow_classifier_times_out_after_one_attempt() {
        let stub = StubClassifier {
            delay: Duration::from_secs(5),
            ..StubClassifier::answering(r#"{"verdict":"Uncertain","confidence":70,"reasons":["a","b"]}"#)
        };
        let err = classify_remote(&stub, "text", Duration::from_millis(50)).await.unwrap_err();
        assert!(matches!(err, DetectError::Internal(_)));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }
}
