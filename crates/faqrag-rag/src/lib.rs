//! Retrieval-augmented FAQ answering for FAQRAG
//!
//! This crate provides FAQ document ingestion, an in-memory vector store,
//! the embedding-backed retriever, and the answer pipeline.

mod ingest;
mod pipeline;
mod retriever;
mod store;


pub use ingest::load_faq_documents;
pub use pipeline::{format_context, render_prompt, AnswerPipeline};
pub use retriever::FaqRetriever;
pub use store::InMemoryVectorStore;

// Re-export core types for convenience
pub use faqrag_core::{
    AnswerResult, AnswerService, DocMetadata, Document, EmbeddingProvider, Error, Result,
    ScoredDocument, TextGenerator, VectorStore,
};
