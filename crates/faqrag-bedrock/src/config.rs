//! Bedrock runtime configuration

use serde::{Deserialize, Serialize};
use std::env;

use faqrag_core::{Error, Result};

/// Configuration for the Bedrock runtime client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedrockConfig {
    pub region: String,
    pub profile: String,
    pub api_key: String,
}

impl BedrockConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let region = env::var("AWS_DEFAULT_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        let profile = env::var("AWS_PROFILE").unwrap_or_else(|_| "default".to_string());

        let api_key = env::var("AWS_BEARER_TOKEN_BEDROCK").map_err(|_| {
            Error::Configuration(
                "AWS_BEARER_TOKEN_BEDROCK environment variable not found".to_string(),
            )
        })?;

        Ok(Self {
            region,
            profile,
            api_key,
        })
    }

    /// Create configuration with an explicit API key and default region
    pub fn new(api_key: String) -> Self {
        Self {
            region: "us-east-1".to_string(),
            profile: "default".to_string(),
            api_key,
        }
    }

    /// Base URL of the Bedrock runtime endpoint for the configured region
    pub fn endpoint(&self) -> String {
        format!("https://bedrock-runtime.{}.amazonaws.com", self.region)
    }
}
