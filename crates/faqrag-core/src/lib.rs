//! Core traits and types for FAQRAG
//!
//! This crate defines the fundamental traits and types used across the FAQRAG
//! system. It provides capability-facing interfaces for text generation,
//! embeddings, vector stores, and the answer pipeline, making the system
//! test-friendly and extensible.

pub mod answer;
pub mod document;

pub mod embedding;
pub mod error;
pub mod llm;
pub mod vector_store;

pub use answer::{AnswerResult, AnswerService};
pub use document::{DocMetadata, Document};
pub use embedding::EmbeddingProvider;
pub use error::{Error, Result};
pub use llm::{GenerationParams, TextGenerator};
pub use vector_store::{ScoredDocument, VectorStore};
