//! Semantic index over the legal corpus
//!
//! Built once at startup by embedding every corpus chunk; queried with
//! cosine distance. The index state is an immutable snapshot behind an
//! `RwLock<Arc<..>>`: a rebuild constructs a complete replacement and swaps
//! it in, so concurrent queries never observe a half-built index.

use crate::corpus::{KnowledgeChunk, Topic};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;
use vidhi_common::errors::{AppError, Result};
use vidhi_common::Embedder;

/// A corpus chunk scored against a query
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The matched chunk
    pub chunk: KnowledgeChunk,

    /// Cosine distance to the query (0.0 = identical direction)
    pub distance: f32,
}

struct IndexedChunk {
    chunk: KnowledgeChunk,
    embedding: Vec<f32>,
}

struct IndexState {
    entries: Vec<IndexedChunk>,
}

/// Cosine nearest-neighbor index over the knowledge corpus
pub struct SemanticIndex {
    embedder: Arc<dyn Embedder>,
    state: RwLock<Arc<IndexState>>,
}

impl SemanticIndex {
    /// Embed all chunks and build the index. An empty chunk set is a
    /// configuration error: the corpus is static, so there is nothing a
    /// running process could do to recover.
    pub async fn build(embedder: Arc<dyn Embedder>, chunks: Vec<KnowledgeChunk>) -> Result<Self> {
        let state = Self::build_state(embedder.as_ref(), chunks).await?;
        Ok(Self {
            embedder,
            state: RwLock::new(Arc::new(state)),
        })
    }

    async fn build_state(embedder: &dyn Embedder, chunks: Vec<KnowledgeChunk>) -> Result<IndexState> {
        if chunks.is_empty() {
            return Err(AppError::Configuration {
                message: "semantic index requires a non-empty corpus".to_string(),
            });
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexedChunk { chunk, embedding })
            .collect::<Vec<_>>();

        tracing::info!(chunks = entries.len(), model = embedder.model_name(), "Semantic index built");

        Ok(IndexState { entries })
    }

    /// Rebuild the index from a new chunk set. The replacement state is
    /// fully constructed before the swap; readers see either the old index
    /// or the new one, never a mixture.
    pub async fn rebuild(&self, chunks: Vec<KnowledgeChunk>) -> Result<()> {
        let new_state = Self::build_state(self.embedder.as_ref(), chunks).await?;
        let mut state = self.state.write().await;
        *state = Arc::new(new_state);
        Ok(())
    }

    /// Return the `k` chunks nearest to `text`, nearest first.
    ///
    /// Ties are broken by corpus insertion order (the sort is stable), so
    /// repeated identical queries always return the same ordering.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let query_embedding = self.embedder.embed(text).await?;

        let state = { self.state.read().await.clone() };

        let mut scored: Vec<ScoredChunk> = state
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                distance: cosine_distance(&query_embedding, &entry.embedding),
            })
            .collect();

        scored.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        Ok(scored)
    }

    /// Dominant topic for a query: the topic of the single nearest chunk.
    /// Classification reuses the retrieval index, so retrieval and routing
    /// can never disagree on vocabulary.
    pub async fn classify(&self, text: &str) -> Result<Topic> {
        let nearest = self.query(text, 1).await?;
        nearest
            .first()
            .map(|s| s.chunk.topic)
            .ok_or_else(|| AppError::Internal {
                message: "index returned no neighbors for a non-empty corpus".to_string(),
            })
    }

    /// Number of indexed chunks
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    1.0 - dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidhi_common::embeddings::HashEmbedder;

    fn test_corpus() -> Vec<KnowledgeChunk> {
        vec![
            KnowledgeChunk::new(
                "rti_filing",
                Topic::Rti,
                "Filing Procedure",
                "File an RTI application under Section 6(1) with the PIO, no reasons required",
            ),
            KnowledgeChunk::new(
                "dv_orders",
                Topic::DomesticViolence,
                "Court Orders",
                "Protection order and residence order from the Magistrate under the PWDVA",
            ),
            KnowledgeChunk::new(
                "divorce_mutual",
                Topic::Divorce,
                "Mutual Consent",
                "Mutual consent divorce petition in the Family Court after one year separation",
            ),
        ]
    }

    async fn build_index() -> SemanticIndex {
        SemanticIndex::build(Arc::new(HashEmbedder::new(384)), test_corpus())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_corpus_is_fatal() {
        let result = SemanticIndex::build(Arc::new(HashEmbedder::new(384)), vec![]).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_query_is_deterministic() {
        let index = build_index().await;
        let a = index.query("how do I file an RTI application", 3).await.unwrap();
        let b = index.query("how do I file an RTI application", 3).await.unwrap();

        let ids_a: Vec<_> = a.iter().map(|s| s.chunk.id.clone()).collect();
        let ids_b: Vec<_> = b.iter().map(|s| s.chunk.id.clone()).collect();
        assert_eq!(ids_a, ids_b);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.distance, y.distance);
        }
    }

    #[tokio::test]
    async fn test_query_orders_by_ascending_distance() {
        let index = build_index().await;
        let results = index.query("protection order magistrate", 3).await.unwrap();
        assert_eq!(results.len(), 3);
        for pair in results.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
        assert_eq!(results[0].chunk.id, "dv_orders");
    }

    #[tokio::test]
    async fn test_query_truncates_to_k() {
        let index = build_index().await;
        let results = index.query("divorce", 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_tie_break_is_insertion_order() {
        let chunks = vec![
            KnowledgeChunk::new("first", Topic::Rti, "A", "identical passage text"),
            KnowledgeChunk::new("second", Topic::Divorce, "B", "identical passage text"),
        ];
        let index = SemanticIndex::build(Arc::new(HashEmbedder::new(384)), chunks)
            .await
            .unwrap();

        let results = index.query("identical passage text", 2).await.unwrap();
        assert_eq!(results[0].distance, results[1].distance);
        assert_eq!(results[0].chunk.id, "first");
        assert_eq!(results[1].chunk.id, "second");
    }

    #[tokio::test]
    async fn test_classify_picks_nearest_topic() {
        let index = build_index().await;
        let topic = index.classify("mutual consent divorce separation").await.unwrap();
        assert_eq!(topic, Topic::Divorce);
    }

    #[tokio::test]
    async fn test_rebuild_swaps_content() {
        let index = build_index().await;
        assert_eq!(index.len().await, 3);

        let replacement = vec![KnowledgeChunk::new(
            "only",
            Topic::Rti,
            "Only",
            "a single replacement chunk",
        )];
        index.rebuild(replacement).await.unwrap();

        assert_eq!(index.len().await, 1);
        let results = index.query("replacement", 3).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.id, "only");
    }

    #[test]
    fn test_cosine_distance_bounds() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0];
        let c = vec![0.0, 1.0];
        assert!(cosine_distance(&a, &b).abs() < 1e-6);
        assert!((cosine_distance(&a, &c) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_distance(&a, &[0.0, 0.0]), 1.0);
    }
}
