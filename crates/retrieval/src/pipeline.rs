//! Fusion/fallback retrieval pipeline
//!
//! Web-first, semantic-fallback context assembly:
//! 1. Semantic search over the corpus gives the fallback context and, via
//!    the nearest chunk, the query's dominant topic.
//! 2. The fusion engine races that topic's portals.
//! 3. Web context at or above the character threshold wins and is stacked
//!    on top of the semantic context; anything thinner is discarded
//!    wholesale (including its provenance) so a citation never rests on a
//!    fragment too thin to be trustworthy.
//!
//! Every query receives some context: the semantic side is always available
//! once the index is built, so total portal failure is a normal path here,
//! not an error.

use crate::corpus::Topic;
use crate::fusion::{ContextFusionEngine, TopicContext};
use crate::index::{ScoredChunk, SemanticIndex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use vidhi_common::config::RetrievalConfig;
use vidhi_common::errors::Result;
use vidhi_common::metrics;

const WEB_BANNER: &str = "=== LIVE DATA FROM OFFICIAL GOVERNMENT PORTALS ===";
const KB_BANNER_FUSED: &str = "=== ADDITIONAL CONTEXT FROM LEGAL KNOWLEDGE BASE ===";
const KB_BANNER_ONLY: &str = "=== CONTEXT FROM LEGAL KNOWLEDGE BASE ===";

/// Which sources contributed to a fused context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextOrigin {
    /// Live portal content stacked on semantic results
    #[serde(rename = "web+semantic")]
    WebSemantic,

    /// Semantic results only (web context absent or below threshold)
    #[serde(rename = "semantic-only")]
    SemanticOnly,
}

impl ContextOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextOrigin::WebSemantic => "web+semantic",
            ContextOrigin::SemanticOnly => "semantic-only",
        }
    }
}

impl fmt::Display for ContextOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request-scoped fused context handed to the reasoning step
#[derive(Debug, Clone, Serialize)]
pub struct FusedContext {
    /// Assembled context text
    pub text: String,

    /// Provenance tag
    pub origin: ContextOrigin,

    /// Labels of the web sources that contributed, in configured order;
    /// empty when `origin` is `semantic-only`
    pub sources_used: Vec<String>,

    /// Dominant topic the query classified into
    pub topic: Topic,
}

/// Debug view of one retrieved chunk, for observability tooling
#[derive(Debug, Clone, Serialize)]
pub struct ChunkMatch {
    /// 1-based rank, nearest first
    pub rank: usize,
    pub topic: Topic,
    pub section: String,
    pub distance: f32,
    /// First 200 characters of the chunk text
    pub preview: String,
}

/// Top-level retrieval orchestration
pub struct RetrievalPipeline {
    index: Arc<SemanticIndex>,
    fusion: ContextFusionEngine,
    config: RetrievalConfig,
}

impl RetrievalPipeline {
    pub fn new(index: Arc<SemanticIndex>, fusion: ContextFusionEngine, config: RetrievalConfig) -> Self {
        Self {
            index,
            fusion,
            config,
        }
    }

    /// Assemble the context for a query under the fusion/fallback policy.
    pub async fn retrieve(&self, query: &str) -> Result<FusedContext> {
        let start = Instant::now();

        // The two semantic lookups are independent; order does not matter.
        let (matches, topic) = tokio::join!(
            self.index.query(query, self.config.top_k),
            self.index.classify(query)
        );
        let matches = matches?;
        let topic = topic?;

        let rag_context = render_rag_context(&matches);
        let web = self.fusion.get_context(topic).await;

        let (text, origin, sources_used) =
            fuse(web, &rag_context, self.config.min_web_context_chars);

        metrics::record_retrieval(start.elapsed().as_secs_f64(), origin.as_str(), matches.len());
        info!(
            topic = %topic,
            origin = %origin,
            web_sources = sources_used.len(),
            chunks = matches.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Context assembled"
        );

        Ok(FusedContext {
            text,
            origin,
            sources_used,
            topic,
        })
    }

    /// Raw per-chunk view of what the index matched for a query, nearest
    /// first. Backs retrieval-quality debugging.
    pub async fn inspect(&self, query: &str, n: usize) -> Result<Vec<ChunkMatch>> {
        let matches = self.index.query(query, n).await?;

        Ok(matches
            .into_iter()
            .enumerate()
            .map(|(i, scored)| ChunkMatch {
                rank: i + 1,
                topic: scored.chunk.topic,
                section: scored.chunk.section.clone(),
                distance: scored.distance,
                preview: preview_of(&scored.chunk.text),
            })
            .collect())
    }
}

fn render_rag_context(matches: &[ScoredChunk]) -> String {
    matches
        .iter()
        .map(|scored| {
            format!(
                "[{} — {}]\n{}",
                scored.chunk.topic, scored.chunk.section, scored.chunk.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The decision rule. The threshold counts characters, and a below-threshold
/// web context is discarded together with its provenance labels.
fn fuse(
    web: TopicContext,
    rag_context: &str,
    min_web_context_chars: usize,
) -> (String, ContextOrigin, Vec<String>) {
    if web.combined.chars().count() >= min_web_context_chars {
        let text = format!(
            "{WEB_BANNER}\n{}\n\n{KB_BANNER_FUSED}\n{}",
            web.combined, rag_context
        );
        (text, ContextOrigin::WebSemantic, web.sources_used)
    } else {
        let text = format!("{KB_BANNER_ONLY}\n{rag_context}");
        (text, ContextOrigin::SemanticOnly, Vec::new())
    }
}

fn preview_of(text: &str) -> String {
    let mut preview: String = text.chars().take(200).collect();
    if preview.len() < text.len() {
        preview.push_str("...");
    }
    preview
}
