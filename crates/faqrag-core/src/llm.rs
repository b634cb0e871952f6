//! Text generation trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Logical generation parameters as supplied by a caller.
///
/// Every field is optional; the backend applies its own per-model-family
/// defaults and field names when a value is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub top_k: Option<u32>,
    pub stop_sequences: Option<Vec<String>>,
}

/// Trait for hosted text generation backends
///
/// `model` selects among the backend's registered model alternatives by
/// name; `None` selects the backend's default. An unknown name fails with
/// an invalid-argument error.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate plain text for the given prompt
    async fn generate(&self, model: Option<&str>, prompt: &str) -> Result<String>;
}
