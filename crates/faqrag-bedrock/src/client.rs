//! Bedrock runtime text-generation client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use faqrag_core::{Error, GenerationParams, Result, TextGenerator};

use crate::config::BedrockConfig;
use crate::modifier::{InferenceModifier, ModelFamily};
use crate::registry::{ModelRegistry, RegisteredModel};

/// Client for the Bedrock runtime `invoke` API.
///
/// Holds a registry of named model alternatives; `generate` resolves the
/// requested alternative (or the default), shapes the request body for that
/// model's family, and unwraps the family-specific response envelope down
/// to plain text.
pub struct BedrockClient {
    config: BedrockConfig,
    client: Client,
    registry: ModelRegistry,
    params: GenerationParams,
}

#[derive(Serialize)]
struct TitanTextConfig {
    #[serde(rename = "maxTokenCount")]
    max_token_count: u32,
}

#[derive(Serialize)]
struct TitanRequest<'a> {
    #[serde(rename = "inputText")]
    input_text: &'a str,
    #[serde(rename = "textGenerationConfig")]
    text_generation_config: TitanTextConfig,
}

#[derive(Serialize)]
struct PromptRequest {
    prompt: String,
    #[serde(flatten)]
    modifier: InferenceModifier,
}

#[derive(Deserialize)]
struct TitanResult {
    #[serde(rename = "outputText")]
    output_text: String,
}

#[derive(Deserialize)]
struct TitanResponse {
    results: Vec<TitanResult>,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    completion: String,
}

#[derive(Deserialize)]
struct JurassicData {
    text: String,
}

#[derive(Deserialize)]
struct JurassicCompletion {
    data: JurassicData,
}

#[derive(Deserialize)]
struct JurassicResponse {
    completions: Vec<JurassicCompletion>,
}

#[derive(Deserialize)]
struct CommandGeneration {
    text: String,
}

#[derive(Deserialize)]
struct CommandResponse {
    generations: Vec<CommandGeneration>,
}

impl BedrockClient {
    const DEFAULT_TITAN_MAX_TOKENS: u32 = 4000;

    /// Create a new Bedrock client from configuration
    pub fn new(config: BedrockConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            config,
            client,
            registry: ModelRegistry::bedrock_defaults(),
            params: GenerationParams::default(),
        })
    }

    /// Create a new Bedrock client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = BedrockConfig::from_env()?;
        Self::new(config)
    }

    /// Replace the model registry
    pub fn with_registry(mut self, registry: ModelRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the logical generation parameters applied to every request
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    fn request_body(&self, model: &RegisteredModel, prompt: &str) -> Result<serde_json::Value> {
        let body = match InferenceModifier::for_family(model.family, &self.params) {
            // Titan carries its parameters in textGenerationConfig
            None => serde_json::to_value(TitanRequest {
                input_text: prompt,
                text_generation_config: TitanTextConfig {
                    max_token_count: self
                        .params
                        .max_tokens
                        .unwrap_or(Self::DEFAULT_TITAN_MAX_TOKENS),
                },
            }),
            Some(modifier) => {
                // Claude completion models require the Human/Assistant framing
                let prompt = match model.family {
                    ModelFamily::Claude => format!("\n\nHuman: {prompt}\n\nAssistant:"),
                    _ => prompt.to_string(),
                };
                serde_json::to_value(PromptRequest { prompt, modifier })
            }
        };
        body.map_err(|e| Error::Serialization(e.to_string()))
    }

    fn parse_response(family: ModelFamily, body: &str) -> Result<String> {
        let text = match family {
            ModelFamily::Titan => {
                let resp: TitanResponse = serde_json::from_str(body)
                    .map_err(|e| Error::Serialization(e.to_string()))?;
                resp.results
                    .into_iter()
                    .next()
                    .map(|r| r.output_text)
            }
            ModelFamily::Claude => {
                let resp: ClaudeResponse = serde_json::from_str(body)
                    .map_err(|e| Error::Serialization(e.to_string()))?;
                Some(resp.completion)
            }
            ModelFamily::Jurassic => {
                let resp: JurassicResponse = serde_json::from_str(body)
                    .map_err(|e| Error::Serialization(e.to_string()))?;
                resp.completions.into_iter().next().map(|c| c.data.text)
            }
            ModelFamily::Command => {
                let resp: CommandResponse = serde_json::from_str(body)
                    .map_err(|e| Error::Serialization(e.to_string()))?;
                resp.generations.into_iter().next().map(|g| g.text)
            }
        };

        let text = text.ok_or_else(|| {
            Error::Upstream("empty response from Bedrock runtime".to_string())
        })?;

        Ok(text.trim().to_string())
    }

    async fn invoke(&self, model: &RegisteredModel, prompt: &str) -> Result<String> {
        let body = self.request_body(model, prompt)?;
        let url = format!("{}/model/{}/invoke", self.config.endpoint(), model.model_id);

        debug!(model_id = %model.model_id, "invoking bedrock model");

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
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
                "Bedrock invoke failed with status {status}: {error_text}"
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Self::parse_response(model.family, &response_text)
    }
}

#[async_trait]
impl TextGenerator for BedrockClient {
    async fn generate(&self, model: Option<&str>, prompt: &str) -> Result<String> {
        let model = self.registry.resolve(model)?;
        self.invoke(model, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BedrockClient {
        BedrockClient::new(BedrockConfig::new("test_key".to_string())).unwrap()
    }

    #[test]
    fn titan_body_carries_max_token_count() {
        let client = client();
        let model = RegisteredModel::new("amazon.titan-text-express-v1", ModelFamily::Titan);
        let body = client.request_body(&model, "hello").unwrap();

        assert_eq!(body["inputText"], "hello");
        assert_eq!(body["textGenerationConfig"]["maxTokenCount"], 4000);
    }

    #[test]
    fn claude_body_wraps_prompt_and_flattens_modifier() {
        let client = client();
        let model = RegisteredModel::new("anthropic.claude-v2:1", ModelFamily::Claude);
        let body = client.request_body(&model, "What is X?").unwrap();

        assert_eq!(body["prompt"], "\n\nHuman: What is X?\n\nAssistant:");
        assert_eq!(body["max_tokens_to_sample"], 4096);
        assert_eq!(body["top_k"], 250);
    }

    #[test]
    fn jurassic_body_uses_camel_case_fields() {
        let client = client();
        let model = RegisteredModel::new("ai21.j2-ultra-v1", ModelFamily::Jurassic);
        let body = client.request_body(&model, "What is X?").unwrap();

        assert_eq!(body["prompt"], "What is X?");
        assert_eq!(body["maxTokens"], 4096);
        assert!(body.get("top_k").is_none());
        assert!(body.get("k").is_none());
    }

    #[test]
    fn parse_titan_response() {
        let body = r#"{"results": [{"outputText": " X is a fruit. "}]}"#;
        let text = BedrockClient::parse_response(ModelFamily::Titan, body).unwrap();
        assert_eq!(text, "X is a fruit.");
    }

    #[test]
    fn parse_claude_response() {
        let body = r#"{"completion": " X is a fruit."}"#;
        let text = BedrockClient::parse_response(ModelFamily::Claude, body).unwrap();
        assert_eq!(text, "X is a fruit.");
    }

    #[test]
    fn parse_jurassic_response() {
        let body = r#"{"completions": [{"data": {"text": "X is a fruit."}}]}"#;
        let text = BedrockClient::parse_response(ModelFamily::Jurassic, body).unwrap();
        assert_eq!(text, "X is a fruit.");
    }

    #[test]
    fn empty_completions_are_an_upstream_failure() {
        let body = r#"{"completions": []}"#;
        let err = BedrockClient::parse_response(ModelFamily::Jurassic, body).unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }
}
