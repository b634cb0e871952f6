//! In-memory vector store

use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::RwLock;

use faqrag_core::{Document, Error, Result, ScoredDocument, VectorStore};

struct Entry {
    document: Document,
    embedding: Vec<f32>,
}

/// In-memory vector store over document embeddings.
///
/// Built once at startup from the full document collection and read-only
/// afterwards from the perspective of request handling.
pub struct InMemoryVectorStore {
    entries: RwLock<Vec<Entry>>,
}

impl InMemoryVectorStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add_batch(&self, batch: Vec<(Document, Vec<f32>)>) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| Error::Upstream(format!("vector store lock poisoned: {e}")))?;

        entries.extend(
            batch
                .into_iter()
                .map(|(document, embedding)| Entry {
                    document,
                    embedding,
                }),
        );

        Ok(())
    }

    async fn search_by_vector(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredDocument>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| Error::Upstream(format!("vector store lock poisoned: {e}")))?;

        let mut results: Vec<ScoredDocument> = entries
            .iter()
            .map(|entry| ScoredDocument {
                document: entry.document.clone(),
                score: Self::cosine_similarity(vector, &entry.embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
        });

        results.truncate(top_k);

        Ok(results)
    }

    async fn count(&self) -> Result<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|e| Error::Upstream(format!("vector store lock poisoned: {e}")))?;
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqrag_core::DocMetadata;

    fn doc(content: &str) -> Document {
        Document::new(content, DocMetadata::default())
    }

    #[tokio::test]
    async fn search_ranks_by_cosine_similarity() {
        let store = InMemoryVectorStore::new();
        store
            .add_batch(vec![
                (doc("orthogonal"), vec![0.0, 1.0]),
                (doc("aligned"), vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search_by_vector(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results[0].document.content, "aligned");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn search_is_bounded_by_top_k() {
        let store = InMemoryVectorStore::new();
        store
            .add_batch(vec![
                (doc("a"), vec![1.0, 0.0]),
                (doc("b"), vec![0.9, 0.1]),
                (doc("c"), vec![0.0, 1.0]),
            ])
            .await
            .unwrap();

        let results = store.search_by_vector(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn empty_store_yields_empty_results() {
        let store = InMemoryVectorStore::new();
        let results = store.search_by_vector(&[1.0, 0.0], 4).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn store_is_no_longer_empty_after_adding() {
        let store = InMemoryVectorStore::new();
        assert!(store.is_empty().await.unwrap());

        store
            .add_batch(vec![(doc("a"), vec![1.0, 0.0])])
            .await
            .unwrap();

        assert!(!store.is_empty().await.unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[test]
    fn zero_norm_vectors_score_zero() {
        assert_eq!(
            InMemoryVectorStore::cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]),
            0.0
        );
        assert_eq!(
            InMemoryVectorStore::cosine_similarity(&[1.0], &[1.0, 0.0]),
            0.0
        );
    }
}
