//! Titan text embeddings over the Bedrock runtime

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use faqrag_core::{EmbeddingProvider, Error, Result};

use crate::config::BedrockConfig;

/// Embedding client for `amazon.titan-embed-text-v1`
pub struct TitanEmbeddings {
    config: BedrockConfig,
    client: Client,
    model_id: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    #[serde(rename = "inputText")]
    input_text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

impl TitanEmbeddings {
    pub const TITAN_EMBED_TEXT_V1: &'static str = "amazon.titan-embed-text-v1";

    /// Create a new embedding client from configuration
    pub fn new(config: BedrockConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            config,
            client,
            model_id: Self::TITAN_EMBED_TEXT_V1.to_string(),
        })
    }

    /// Create a new embedding client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = BedrockConfig::from_env()?;
        Self::new(config)
    }

    /// Use a different embedding model id
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }
}

#[async_trait]
impl EmbeddingProvider for TitanEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!(
            "{}/model/{}/invoke",
            self.config.endpoint(),
            self.model_id
        );

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&EmbedRequest { input_text: text })
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Upstream(format!(
                "Titan embedding failed with status {status}: {error_text}"
            )));
        }

        let embed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        if embed.embedding.is_empty() {
            return Err(Error::Upstream(
                "empty embedding from Bedrock runtime".to_string(),
            ));
        }

        Ok(embed.embedding)
    }
}
