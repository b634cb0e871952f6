//! Answer pipeline trait and result types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Document, Result};

/// Result of one question → answer request.
///
/// `sources` is aligned with `context`: entry `i` is the source deep link
/// of the `i`-th retrieved document, or an empty string when the document
/// carries none. Duplicates are preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    pub sources: Vec<String>,
    pub context: Vec<Document>,
}

/// Trait for the end-to-end answering pipeline
///
/// This is the seam the HTTP layer consumes. `model` optionally selects a
/// registered generation-model alternative by name.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Answer a question using retrieved FAQ context
    async fn answer(&self, question: &str, model: Option<&str>) -> Result<AnswerResult>;
}
