//! Embedding-backed FAQ retriever

use std::sync::Arc;
use tracing::{debug, info};

use faqrag_core::{Document, EmbeddingProvider, Error, Result, ScoredDocument, VectorStore};

/// Retriever over an embedded FAQ collection.
///
/// `build` embeds the whole collection once at startup; `retrieve` embeds
/// the question and runs a fresh nearest-neighbor search per query.
pub struct FaqRetriever<E: EmbeddingProvider, V: VectorStore> {
    embeddings: Arc<E>,
    store: Arc<V>,
    top_k: usize,
}

impl<E: EmbeddingProvider, V: VectorStore> FaqRetriever<E, V> {
    pub const DEFAULT_TOP_K: usize = 4;

    /// Create a new retriever
    pub fn new(embeddings: Arc<E>, store: Arc<V>) -> Self {
        Self {
            embeddings,
            store,
            top_k: Self::DEFAULT_TOP_K,
        }
    }

    /// Set how many documents each query retrieves
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Embed and index the document collection. Called once at startup.
    pub async fn build(&self, documents: Vec<Document>) -> Result<usize> {
        if documents.is_empty() {
            return Err(Error::Ingestion(
                "cannot build an index from an empty document collection".to_string(),
            ));
        }

        let contents: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let vectors = self.embeddings.embed_batch(&contents).await?;

        let count = documents.len();
        let batch: Vec<(Document, Vec<f32>)> =
            documents.into_iter().zip(vectors).collect();
        self.store.add_batch(batch).await?;

        info!(count, "vector index built");
        Ok(count)
    }

    /// Retrieve the top-k documents most relevant to the question
    pub async fn retrieve(&self, question: &str) -> Result<Vec<ScoredDocument>> {
        let vector = self.embeddings.embed(question).await?;
        let results = self.store.search_by_vector(&vector, self.top_k).await?;

        debug!(count = results.len(), "retrieved documents");
        Ok(results)
    }
}
