use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{DetectError, DetectResult};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// Browser-looking headers so naive bot filters let us through.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Markup fetched from a page, tagged with the host it came from.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub domain: String,
    pub html: String,
}

/// Single-attempt page fetcher. The client-level timeout covers the whole
/// exchange and drops the connection when it fires.
#[derive(Debug, Clone)]
pub struct ContentAcquirer {
    client: Client,
    timeout: Duration,
}

impl ContentAcquirer {
    pub fn new(timeout: Duration) -> DetectResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DetectError::Internal(format!("building http client: {e}")))?;
        Ok(Self { client, timeout })
    }

    pub async fn fetch(&self, raw_url: &str) -> DetectResult<FetchedPage> {
        let url = parse_url(raw_url)?;
        let domain = url.host_str().unwrap_or_default().to_string();
        let start = std::time::Instant::now();

        debug!("Fetching page - url={}, timeout={:.1}s", url, self.timeout.as_secs_f32());

        let resp = self
            .client
            .get(url.clone())
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT, BROWSER_ACCEPT)
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Page fetch rejected - url={}, status={}", url, status);
            return Err(DetectError::FetchError {
                status: Some(status.as_u16()),
                detail: format!("{url} answered {status}"),
            });
        }

        let html = resp.text().await.map_err(|e| self.classify(&url, e))?;

        info!(
            "Page fetch completed - domain={}, duration={:.2}s, bytes={}",
            domain,
            start.elapsed().as_secs_f32(),
            html.len()
        );

        Ok(FetchedPage { domain, html })
    }

    fn classify(&self, url: &Url, e: reqwest::Error) -> DetectError {
        if e.is_timeout() {
            warn!("Page fetch timed out - url={}", url);
            DetectError::FetchTimeout(self.timeout)
        } else {
            warn!("Page fetch failed - url={}, error={}", url, e);
            DetectError::FetchError {
                status: e.status().map(|s| s.as_u16()),
                detail: e.to_string(),
            }
        }
    }
}

pub fn parse_url(raw: &str) -> DetectResult<Url> {
    Url::parse(raw.trim()).map_err(|e| DetectError::InvalidUrl {
        url: raw.to_string(),
        detail: e.to_string(),
    })
}
