//! AWS Bedrock integration for FAQRAG
//!
//! This crate provides the Bedrock implementations of the TextGenerator and
//! EmbeddingProvider traits, plus the inference-modifier resolver that maps
//! logical generation parameters onto each model family's wire format.

mod client;
mod config;
mod embeddings;
mod modifier;
mod registry;


pub use client::BedrockClient;
pub use config::BedrockConfig;
pub use embeddings::TitanEmbeddings;
pub use modifier::{
    ClaudeParams, CommandParams, InferenceModifier, JurassicParams, ModelFamily,
};
pub use registry::{ModelRegistry, RegisteredModel};

// Re-export core types for convenience
pub use faqrag_core::{EmbeddingProvider, Error, GenerationParams, Result, TextGenerator};
