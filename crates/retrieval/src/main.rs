//! Vidhi triage entry point
//!
//! Builds the retrieval pipeline and answers a single query from the
//! command line, printing the fused context (and, when a reasoner API key
//! is configured, the structured triage report) as JSON.

use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vidhi_common::cache::{CacheConfig, TtlCache};
use vidhi_common::config::AppConfig;
use vidhi_common::embeddings::create_embedder;
use vidhi_common::metrics;
use vidhi_retrieval::reasoner::{ChatReasoner, TriageReport};
use vidhi_retrieval::{
    legal_corpus, ChunkMatch, ContextFusionEngine, FusedContext, PageFetcher, RetrievalPipeline,
    SemanticIndex, SourceRegistry, TriageService,
};

#[derive(Serialize)]
struct TriageOutput {
    query: String,
    retrieved: Vec<ChunkMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<FusedContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<TriageReport>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .json()
        .init();

    info!("Starting Vidhi triage v{}", vidhi_common::VERSION);

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Initialize metrics
    metrics::register_metrics();

    let query: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        anyhow::bail!("usage: triage <free-text legal query>");
    }

    // Build the semantic index. This is the one startup step that may not
    // degrade: without it no request can be answered.
    let embedder = create_embedder(&config.embedding)?;
    let index = Arc::new(
        SemanticIndex::build(embedder, legal_corpus())
            .await
            .context("failed to build semantic index")?,
    );

    // Assemble the fusion pipeline
    let cache = Arc::new(TtlCache::new(CacheConfig {
        default_ttl_secs: config.fetcher.cache_ttl_secs,
        ..CacheConfig::default()
    }));
    let fetcher = Arc::new(PageFetcher::new(cache, config.fetcher.clone())?);
    let fusion = ContextFusionEngine::new(fetcher, SourceRegistry::default(), config.fusion.clone());
    let pipeline = RetrievalPipeline::new(index, fusion, config.retrieval.clone());

    let output = if config.reasoner.api_key.is_some() {
        let service = TriageService::new(pipeline, Arc::new(ChatReasoner::new(&config.reasoner)?));
        let retrieved = service.pipeline().inspect(&query, 4).await?;
        let report = service.analyze(&query).await?;
        TriageOutput {
            query,
            retrieved,
            context: None,
            report: Some(report),
        }
    } else {
        info!("No reasoner API key configured; printing fused context only");
        let retrieved = pipeline.inspect(&query, 4).await?;
        let context = pipeline.retrieve(&query).await?;
        TriageOutput {
            query,
            retrieved,
            context: Some(context),
            report: None,
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
