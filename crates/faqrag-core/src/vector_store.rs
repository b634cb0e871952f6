//! Vector store trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Document, Result};

/// A document returned from similarity search, with its score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f32,
}

/// Trait for vector stores
///
/// This trait defines the interface for nearest-neighbor search over
/// embedded documents. Results are ordered most similar first.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Store documents with their embeddings
    async fn add_batch(&self, entries: Vec<(Document, Vec<f32>)>) -> Result<()>;

    /// Search for the `top_k` documents most similar to the given vector
    async fn search_by_vector(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredDocument>>;

    /// Total number of stored documents
    async fn count(&self) -> Result<usize>;

    /// Whether the store holds no documents
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.count().await? == 0)
    }
}
