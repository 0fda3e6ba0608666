use tracing::{debug, error, info, warn};

use crate::api_types::DetectRequest;
use crate::classifier::{classify_remote, RemoteClassifier};
use crate::config::DetectorSettings;
use crate::error::{DetectError, DetectResult};
use crate::fetch::ContentAcquirer;
use crate::models::{NormalizedContent, RawInput, Verdict};
use crate::normalize::{normalize_page, normalize_text};
use crate::verdict::analyze_text;

/// Request pipeline. Holds only immutable collaborators, so one instance can
/// serve any number of concurrent requests.
pub struct Detector {
    acquirer: ContentAcquirer,
    remote: Option<Box<dyn RemoteClassifier>>,
    settings: DetectorSettings,
}

impl Detector {
    pub fn new(settings: DetectorSettings) -> DetectResult<Self> {
        Ok(Self {
            acquirer: ContentAcquirer::new(settings.fetch_timeout)?,
            remote: None,
            settings,
        })
    }

    pub fn with_remote(mut self, remote: Box<dyn RemoteClassifier>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn uses_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn detect(&self, request: DetectRequest) -> DetectResult<Verdict> {
        let start = std::time::Instant::now();
        let raw = RawInput::from(request);

        if raw.is_empty() {
            warn!("Rejected request - no url, text or headline");
            return Err(DetectError::InvalidInput);
        }

        let content = self.acquire(&raw).await?;
        debug!(
            "Analyzable text ready - chars={}, body_chars={}, source={:?}, title={:?}, has_description={}",
            content.analyzable_text.chars().count(),
            content.body_text.chars().count(),
            content.source_domain,
            content.title,
            content.description.is_some()
        );

        let verdict = match &self.remote {
            Some(remote) => {
                classify_remote(remote.as_ref(), &content.analyzable_text, self.settings.remote_timeout).await?
            }
            None => analyze_text(&content.analyzable_text),
        };

        info!(
            "Detection completed - duration={:.2}s, verdict={}, confidence={}, remote={}",
            start.elapsed().as_secs_f32(),
            verdict.category.label(),
            verdict.confidence,
            self.uses_remote()
        );
        Ok(verdict)
    }

    /// Text the heuristic breakdown can be computed from without a second
    /// fetch. `None` for URL input and in remote mode.
    pub fn explain_text(&self, request: &DetectRequest) -> Option<String> {
        let raw = RawInput::from(request.clone());
        if self.uses_remote() {
            warn!("Signal breakdown skipped - remote classifier in use");
            return None;
        }
        if raw.url().is_some() {
            warn!("Signal breakdown skipped - only available for headline/text input");
            return None;
        }
        raw.manual_text().map(|t| normalize_text(t).analyzable_text)
    }

    async fn acquire(&self, raw: &RawInput) -> DetectResult<NormalizedContent> {
        match raw.url() {
            Some(url) => {
                let page = self.acquirer.fetch(url).await?;
                Ok(normalize_page(&page))
            }
            None => Ok(normalize_text(raw.manual_text().unwrap_or_default())),
        }
    }

    /// Runs requests `batch_width` at a time; results keep input order and a
    /// failure only affects its own slot.
    pub async fn detect_batch(&self, requests: Vec<DetectRequest>) -> Vec<DetectResult<Verdict>> {
        let total = requests.len();
        let width = self.settings.batch_width;
        let batch_start = std::time::Instant::now();
        info!("Batch detection starting - requests={}, batch_size={}", total, width);

        let mut results = Vec::with_capacity(total);
        let mut pending = requests.into_iter().peekable();
        while pending.peek().is_some() {
            let tasks: Vec<_> = pending.by_ref().take(width).map(|r| self.detect(r)).collect();
            results.extend(futures::future::join_all(tasks).await);
            debug!("Batch progress: {}/{}", results.len(), total);
        }

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            error!("Batch detection finished with failures - failed={}, total={}", failed, total);
        }
        info!(
            "Batch detection completed - duration={:.2}s, requests={}, failed={}",
            batch_start.elapsed().as_secs_f32(),
            total,
            failed
        );
        results
    }
}
