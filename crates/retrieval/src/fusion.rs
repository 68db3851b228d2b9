//! Context fusion engine
//!
//! Fans out the topic's first few configured sources as concurrent fetch
//! tasks, then accepts results in configured order until enough sources
//! have succeeded. Completion order is irrelevant: assembly follows the
//! registry's priority order, so output is deterministic regardless of
//! which portal answered first.
//!
//! Stragglers are neither cancelled nor awaited. A slow portal's task keeps
//! running after the engine returns, and its eventual success still
//! populates the shared cache for the next request.

use crate::corpus::Topic;
use crate::fetcher::SourceFetcher;
use crate::sources::SourceRegistry;
use std::sync::Arc;
use tracing::{debug, warn};
use vidhi_common::config::FusionConfig;

/// Separator between accepted source snippets
pub const SOURCE_SEPARATOR: &str = "\n\n---\n\n";

/// Live web context for one topic
#[derive(Debug, Clone, Default)]
pub struct TopicContext {
    /// Accepted snippets joined with [`SOURCE_SEPARATOR`]; empty when every
    /// source failed or the topic has no sources
    pub combined: String,

    /// Labels of the sources that contributed, in configured order
    pub sources_used: Vec<String>,
}

/// Orchestrates concurrent portal fetches for a topic
pub struct ContextFusionEngine {
    fetcher: Arc<dyn SourceFetcher>,
    registry: SourceRegistry,
    config: FusionConfig,
}

impl ContextFusionEngine {
    pub fn new(fetcher: Arc<dyn SourceFetcher>, registry: SourceRegistry, config: FusionConfig) -> Self {
        Self {
            fetcher,
            registry,
            config,
        }
    }

    /// The registry backing this engine
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Fetch live context for a topic.
    ///
    /// Only the first `max_sources` configured sources are ever attempted in
    /// one call; that cap bounds request latency by design. An unconfigured
    /// topic yields an empty context, not an error.
    pub async fn get_context(&self, topic: Topic) -> TopicContext {
        let sources = self.registry.sources_for(topic);
        if sources.is_empty() {
            debug!(topic = %topic, "No sources configured");
            return TopicContext::default();
        }

        let attempted = &sources[..sources.len().min(self.config.max_sources)];

        let handles: Vec<_> = attempted
            .iter()
            .map(|source| {
                let fetcher = Arc::clone(&self.fetcher);
                let source = source.clone();
                tokio::spawn(async move { fetcher.fetch(&source).await })
            })
            .collect();

        let mut snippets: Vec<String> = Vec::new();
        let mut sources_used: Vec<String> = Vec::new();

        for handle in handles {
            if snippets.len() >= self.config.success_target {
                // Enough sources succeeded. Remaining handles are dropped,
                // which detaches the tasks; late results still warm the
                // cache but are not waited on.
                break;
            }

            match handle.await {
                Ok(Some(page)) => {
                    snippets.push(format!("[Source: {}]\n{}", page.label, page.text));
                    sources_used.push(page.label);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(topic = %topic, error = %e, "Portal fetch task failed");
                }
            }
        }

        debug!(
            topic = %topic,
            attempted = attempted.len(),
            accepted = sources_used.len(),
            "Fusion round complete"
        );

        TopicContext {
            combined: snippets.join(SOURCE_SEPARATOR),
            sources_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::SourcePage;
    use crate::sources::SourceDescriptor;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    struct StubResponse {
        delay: Duration,
        text: Option<String>,
    }

    struct StubFetcher {
        responses: HashMap<String, StubResponse>,
        calls: Mutex<Vec<String>>,
        completed: AtomicUsize,
    }

    impl StubFetcher {
        fn new(responses: Vec<(&str, Duration, Option<&str>)>) -> Self {
            Self {
                responses: responses
                    .into_iter()
                    .map(|(url, delay, text)| {
                        (
                            url.to_string(),
                            StubResponse {
                                delay,
                                text: text.map(str::to_string),
                            },
                        )
                    })
                    .collect(),
                calls: Mutex::new(Vec::new()),
                completed: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SourceFetcher for StubFetcher {
        async fn fetch(&self, source: &SourceDescriptor) -> Option<SourcePage> {
            self.calls.lock().unwrap().push(source.url.clone());
            let response = self.responses.get(&source.url)?;
            tokio::time::sleep(response.delay).await;
            self.completed.fetch_add(1, Ordering::SeqCst);
            response.text.clone().map(|text| SourcePage {
                label: source.label.clone(),
                text,
            })
        }
    }

    fn registry_with(topic: Topic, urls: &[&str]) -> SourceRegistry {
        let mut map = HashMap::new();
        map.insert(
            topic,
            urls.iter()
                .enumerate()
                .map(|(i, url)| SourceDescriptor::new(*url, format!("Source {}", i + 1)))
                .collect(),
        );
        SourceRegistry::with_sources(map)
    }

    fn engine(fetcher: Arc<StubFetcher>, registry: SourceRegistry) -> ContextFusionEngine {
        ContextFusionEngine::new(fetcher, registry, FusionConfig::default())
    }

    #[tokio::test]
    async fn test_unconfigured_topic_returns_empty() {
        let fetcher = Arc::new(StubFetcher::new(vec![]));
        let engine = engine(
            fetcher.clone(),
            SourceRegistry::with_sources(HashMap::new()),
        );

        let context = engine.get_context(Topic::Rti).await;
        assert_eq!(context.combined, "");
        assert!(context.sources_used.is_empty());
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_early_stop_skips_slow_third_source() {
        let fetcher = Arc::new(StubFetcher::new(vec![
            ("http://a/", Duration::from_millis(10), Some("alpha text")),
            ("http://b/", Duration::from_millis(10), Some("bravo text")),
            ("http://c/", Duration::from_secs(300), Some("charlie text")),
        ]));
        let engine = engine(
            fetcher.clone(),
            registry_with(Topic::Rti, &["http://a/", "http://b/", "http://c/"]),
        );

        let start = Instant::now();
        let context = engine.get_context(Topic::Rti).await;

        assert_eq!(
            context.combined,
            "[Source: Source 1]\nalpha text\n\n---\n\n[Source: Source 2]\nbravo text"
        );
        assert_eq!(context.sources_used, vec!["Source 1", "Source 2"]);
        // Returned long before the slow source's deadline...
        assert!(start.elapsed() < Duration::from_secs(300));
        // ...and without its result: the task was dispatched but never
        // finished by the time the engine returned.
        assert_eq!(fetcher.calls().len(), 3);
        assert_eq!(fetcher.completed.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_order_does_not_leak_into_output() {
        // Source 2 finishes well before source 1; assembly still follows
        // configured order.
        let fetcher = Arc::new(StubFetcher::new(vec![
            ("http://a/", Duration::from_millis(200), Some("first configured")),
            ("http://b/", Duration::from_millis(5), Some("second configured")),
        ]));
        let engine = engine(
            fetcher.clone(),
            registry_with(Topic::Divorce, &["http://a/", "http://b/"]),
        );

        let context = engine.get_context(Topic::Divorce).await;
        assert_eq!(
            context.combined,
            "[Source: Source 1]\nfirst configured\n\n---\n\n[Source: Source 2]\nsecond configured"
        );
        assert_eq!(context.sources_used, vec!["Source 1", "Source 2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_source_excluded_in_configured_order() {
        let fetcher = Arc::new(StubFetcher::new(vec![
            ("http://a/", Duration::from_millis(10), Some("alpha")),
            ("http://b/", Duration::from_millis(10), None),
            ("http://c/", Duration::from_millis(10), Some("charlie")),
        ]));
        let engine = engine(
            fetcher.clone(),
            registry_with(Topic::DomesticViolence, &["http://a/", "http://b/", "http://c/"]),
        );

        let context = engine.get_context(Topic::DomesticViolence).await;
        assert_eq!(
            context.combined,
            "[Source: Source 1]\nalpha\n\n---\n\n[Source: Source 3]\ncharlie"
        );
        assert_eq!(context.sources_used, vec!["Source 1", "Source 3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_first_three_sources_attempted() {
        let fetcher = Arc::new(StubFetcher::new(vec![
            ("http://a/", Duration::from_millis(1), None),
            ("http://b/", Duration::from_millis(1), None),
            ("http://c/", Duration::from_millis(1), None),
            ("http://d/", Duration::from_millis(1), Some("never used")),
        ]));
        let engine = engine(
            fetcher.clone(),
            registry_with(Topic::Rti, &["http://a/", "http://b/", "http://c/", "http://d/"]),
        );

        let context = engine.get_context(Topic::Rti).await;
        assert_eq!(context.combined, "");
        assert!(context.sources_used.is_empty());

        let calls = fetcher.calls();
        assert_eq!(calls.len(), 3);
        assert!(!calls.contains(&"http://d/".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_sources_failing_yields_empty_context() {
        let fetcher = Arc::new(StubFetcher::new(vec![
            ("http://a/", Duration::from_millis(1), None),
            ("http://b/", Duration::from_millis(1), None),
        ]));
        let engine = engine(
            fetcher.clone(),
            registry_with(Topic::Rti, &["http://a/", "http://b/"]),
        );

        let context = engine.get_context(Topic::Rti).await;
        assert_eq!(context.combined, "");
        assert!(context.sources_used.is_empty());
    }
}
