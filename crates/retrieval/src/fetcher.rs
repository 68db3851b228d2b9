//! Bounded-time portal page fetcher
//!
//! One fetch = cache check, then at most one GET with a short timeout and
//! browser-like headers. Every transient failure (network error, non-200,
//! unusable content) is absence, not an error: the caller excludes the
//! source from this request and moves on. Successful extractions are cached
//! per URL so repeated queries inside the TTL window never re-hit the
//! portal; government sites rate-limit, so this is a functional
//! requirement rather than an optimization.

use crate::extract::extract_text;
use crate::sources::SourceDescriptor;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{redirect, StatusCode};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use vidhi_common::config::FetcherConfig;
use vidhi_common::errors::Result;
use vidhi_common::{metrics, TtlCache};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Extracted text from one source, with its provenance label
#[derive(Debug, Clone)]
pub struct SourcePage {
    /// Provenance label from the source descriptor
    pub label: String,

    /// Extracted page text
    pub text: String,
}

/// Fetch abstraction: a source either yields usable text or contributes
/// nothing this request. Implemented by [`PageFetcher`] and by test doubles.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, source: &SourceDescriptor) -> Option<SourcePage>;
}

/// HTTP fetcher with extraction, content policy, and TTL caching
pub struct PageFetcher {
    client: reqwest::Client,
    cache: Arc<TtlCache>,
    config: FetcherConfig,
}

impl PageFetcher {
    /// Create a fetcher sharing the given cache
    pub fn new(cache: Arc<TtlCache>, config: FetcherConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-IN,en;q=0.9"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .redirect(redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client, cache, config })
    }

    /// Extract, enforce the content policy, and cache. Returns `None` when
    /// the page loaded but had no usable content; that outcome is not
    /// cached, so the next request tries the portal again.
    async fn process_body(&self, url: &str, body: &str) -> Option<String> {
        let text = extract_text(body, self.config.max_paragraphs);

        let char_count = text.chars().count();
        if char_count < self.config.min_content_len {
            warn!(url = %url, chars = char_count, "Extracted content too short");
            return None;
        }

        let text = truncate_chars(&text, self.config.max_chars_per_source);
        self.cache.put(url, text.clone()).await;
        Some(text)
    }
}

#[async_trait]
impl SourceFetcher for PageFetcher {
    async fn fetch(&self, source: &SourceDescriptor) -> Option<SourcePage> {
        // Fresh cache entry: no network call at all
        if let Some(text) = self.cache.get(&source.url).await {
            info!(url = %source.url, chars = text.len(), "Serving cached portal text");
            return Some(SourcePage {
                label: source.label.clone(),
                text,
            });
        }

        let start = Instant::now();
        info!(url = %source.url, "Fetching portal page");

        let response = match self.client.get(&source.url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %source.url, error = %e, "Network error fetching portal");
                metrics::record_fetch(start.elapsed().as_secs_f64(), "network_error");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            warn!(url = %source.url, status = response.status().as_u16(), "Portal returned non-200");
            metrics::record_fetch(start.elapsed().as_secs_f64(), "http_error");
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %source.url, error = %e, "Failed reading portal response body");
                metrics::record_fetch(start.elapsed().as_secs_f64(), "read_error");
                return None;
            }
        };

        let Some(text) = self.process_body(&source.url, &body).await else {
            metrics::record_fetch(start.elapsed().as_secs_f64(), "too_short");
            return None;
        };

        info!(url = %source.url, chars = text.len(), "Portal fetch ok");
        metrics::record_fetch(start.elapsed().as_secs_f64(), "success");

        Some(SourcePage {
            label: source.label.clone(),
            text,
        })
    }
}

/// Truncate to at most `max` characters without splitting a code point
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> FetcherConfig {
        FetcherConfig {
            timeout_secs: 1,
            ..FetcherConfig::default()
        }
    }

    fn unreachable_source() -> SourceDescriptor {
        // Nothing listens on the discard port; the connection fails fast.
        SourceDescriptor::new("http://127.0.0.1:9/", "Unreachable Portal")
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("abc", 10), "abc");
        // Multi-byte characters survive the cut
        assert_eq!(truncate_chars("धारा ६", 4), "धारा");
    }

    #[tokio::test]
    async fn test_network_error_is_absence_and_not_cached() {
        let cache = Arc::new(TtlCache::default());
        let fetcher = PageFetcher::new(cache.clone(), test_config()).unwrap();

        let result = fetcher.fetch(&unreachable_source()).await;
        assert!(result.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_fresh_cache_entry_skips_network() {
        let cache = Arc::new(TtlCache::default());
        cache
            .put("http://127.0.0.1:9/", "cached portal text".to_string())
            .await;

        // The URL is unreachable, so a hit proves no network call was made.
        let fetcher = PageFetcher::new(cache, test_config()).unwrap();
        let page = fetcher.fetch(&unreachable_source()).await.expect("cache hit");
        assert_eq!(page.text, "cached portal text");
        assert_eq!(page.label, "Unreachable Portal");
    }

    #[tokio::test]
    async fn test_short_extraction_not_cached() {
        let cache = Arc::new(TtlCache::default());
        let fetcher = PageFetcher::new(cache.clone(), test_config()).unwrap();

        // 200-with-thin-content path: extraction succeeds but stays below
        // the minimum, so the outcome is absence and nothing is cached.
        let html = "<html><body><p>Short page with barely any usable text at all.</p></body></html>";
        let processed = fetcher.process_body("http://example.test/", html).await;
        assert!(processed.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_successful_extraction_cached_and_truncated() {
        let cache = Arc::new(TtlCache::default());
        let config = FetcherConfig {
            max_chars_per_source: 120,
            ..test_config()
        };
        let fetcher = PageFetcher::new(cache.clone(), config).unwrap();

        let paragraph = "Section 7(1) of the RTI Act requires a response within thirty days of \
                         the application reaching the Public Information Officer concerned.";
        let html = format!("<html><body><p>{paragraph}</p><p>{paragraph}</p></body></html>");

        let text = fetcher
            .process_body("http://example.test/", &html)
            .await
            .expect("usable content");
        assert_eq!(text.chars().count(), 120);
        assert_eq!(cache.get("http://example.test/").await.as_deref(), Some(text.as_str()));
    }
}
