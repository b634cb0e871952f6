//! Registry of configurable generation-model alternatives
//!
//! Callers pick among a fixed set of pre-registered models by name at
//! request time without the pipeline knowing any model identifiers.

use std::collections::HashMap;

use faqrag_core::{Error, Result};

use crate::modifier::ModelFamily;

/// A generation model registered under an alternative name
#[derive(Debug, Clone)]
pub struct RegisteredModel {
    pub model_id: String,
    pub family: ModelFamily,
}

impl RegisteredModel {
    pub fn new(model_id: impl Into<String>, family: ModelFamily) -> Self {
        Self {
            model_id: model_id.into(),
            family,
        }
    }
}

/// Name → model registry with an explicit default key.
///
/// Immutable after construction; resolution is read-only.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    default_key: String,
    models: HashMap<String, RegisteredModel>,
}

impl ModelRegistry {
    /// Alternative names
    pub const DEFAULT_KEY: &'static str = "titan-text-express-v1";
    pub const ANTHROPIC: &'static str = "anthropic";
    pub const COHERE: &'static str = "cohere";
    pub const AI2J: &'static str = "ai2j";

    /// The stock Bedrock model set: Titan Text Express as the default, with
    /// Claude, Command, and Jurassic alternates.
    pub fn bedrock_defaults() -> Self {
        let mut models = HashMap::new();
        models.insert(
            Self::DEFAULT_KEY.to_string(),
            RegisteredModel::new("amazon.titan-text-express-v1", ModelFamily::Titan),
        );
        models.insert(
            Self::ANTHROPIC.to_string(),
            RegisteredModel::new("anthropic.claude-v2:1", ModelFamily::Claude),
        );
        models.insert(
            Self::COHERE.to_string(),
            RegisteredModel::new("cohere.command-text-v14", ModelFamily::Command),
        );
        models.insert(
            Self::AI2J.to_string(),
            RegisteredModel::new("ai21.j2-ultra-v1", ModelFamily::Jurassic),
        );

        Self {
            default_key: Self::DEFAULT_KEY.to_string(),
            models,
        }
    }

    /// Build a registry from explicit entries
    pub fn new(default_key: impl Into<String>, models: HashMap<String, RegisteredModel>) -> Result<Self> {
        let default_key = default_key.into();
        if !models.contains_key(&default_key) {
            return Err(Error::Configuration(format!(
                "default model key '{default_key}' is not registered"
            )));
        }
        Ok(Self {
            default_key,
            models,
        })
    }

    /// Resolve an alternative name, falling back to the default when `None`
    pub fn resolve(&self, key: Option<&str>) -> Result<&RegisteredModel> {
        let key = key.unwrap_or(&self.default_key);
        self.models.get(key).ok_or_else(|| {
            Error::InvalidArgument(format!("unknown model alternative: {key}"))
        })
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// Registered alternative names, sorted for stable output
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.models.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_key_resolves_when_unset() {
        let registry = ModelRegistry::bedrock_defaults();
        let model = registry.resolve(None).unwrap();
        assert_eq!(model.model_id, "amazon.titan-text-express-v1");
        assert_eq!(model.family, ModelFamily::Titan);
    }

    #[test]
    fn alternates_resolve_by_name() {
        let registry = ModelRegistry::bedrock_defaults();
        assert_eq!(
            registry.resolve(Some("anthropic")).unwrap().model_id,
            "anthropic.claude-v2:1"
        );
        assert_eq!(
            registry.resolve(Some("ai2j")).unwrap().family,
            ModelFamily::Jurassic
        );
    }

    #[test]
    fn unknown_alternative_is_rejected() {
        let registry = ModelRegistry::bedrock_defaults();
        let err = registry.resolve(Some("gpt4")).unwrap_err();
        match err {
            Error::InvalidArgument(msg) => assert!(msg.contains("gpt4")),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn default_key_must_be_registered() {
        let err = ModelRegistry::new("missing", HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
