//! Vidhi Retrieval Core
//!
//! The context-fusion retrieval pipeline behind the legal-triage service:
//! - Compiled-in corpus of Indian legal provisions with topic metadata
//! - Semantic index (cosine nearest-neighbor over sentence embeddings)
//! - Government-portal registry and bounded-time page fetcher
//! - Context fusion engine racing live fetches against the semantic fallback
//! - Reasoning-service abstraction consuming the fused context

pub mod corpus;
pub mod extract;
pub mod fetcher;
pub mod fusion;
pub mod index;
pub mod pipeline;
pub mod reasoner;
pub mod sources;

// Re-export the pipeline surface
pub use corpus::{legal_corpus, KnowledgeChunk, Topic};
pub use fetcher::{PageFetcher, SourceFetcher, SourcePage};
pub use fusion::{ContextFusionEngine, TopicContext};
pub use index::{ScoredChunk, SemanticIndex};
pub use pipeline::{ChunkMatch, ContextOrigin, FusedContext, RetrievalPipeline};
pub use reasoner::{Reasoner, TriageReport, TriageService};
pub use sources::{SourceDescriptor, SourceRegistry};
