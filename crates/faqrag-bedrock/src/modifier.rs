//! Inference-modifier resolution
//!
//! Each Bedrock model family expects its own field names and defaults for
//! decoding parameters. [`InferenceModifier`] holds exactly the field set a
//! family accepts; [`InferenceModifier::resolve`] maps a loose set of logical
//! parameters onto it. Adding a family means adding an enum variant, so the
//! dispatch stays exhaustive at compile time.

use serde::Serialize;

use faqrag_core::{Error, GenerationParams, Result};

const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f64 = 0.5;
const DEFAULT_TOP_P: f64 = 1.0;
const DEFAULT_TOP_K: u32 = 250;

fn default_stop_sequences() -> Vec<String> {
    vec!["\n\nHuman".to_string()]
}

/// The model families served through the Bedrock runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    Titan,
    Claude,
    Jurassic,
    Command,
}

/// Decoding parameters in Anthropic Claude's wire format
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaudeParams {
    pub max_tokens_to_sample: u32,
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub stop_sequences: Vec<String>,
}

impl From<&GenerationParams> for ClaudeParams {
    fn from(p: &GenerationParams) -> Self {
        Self {
            max_tokens_to_sample: p.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: p.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_k: p.top_k.unwrap_or(DEFAULT_TOP_K),
            top_p: p.top_p.unwrap_or(DEFAULT_TOP_P),
            stop_sequences: p.stop_sequences.clone().unwrap_or_else(default_stop_sequences),
        }
    }
}

/// Decoding parameters in AI21 Jurassic's wire format.
///
/// Jurassic has no top-k knob, so none is emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JurassicParams {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    pub stop_sequences: Vec<String>,
}

impl From<&GenerationParams> for JurassicParams {
    fn from(p: &GenerationParams) -> Self {
        Self {
            temperature: p.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: p.top_p.unwrap_or(DEFAULT_TOP_P),
            max_tokens: p.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            stop_sequences: p.stop_sequences.clone().unwrap_or_else(default_stop_sequences),
        }
    }
}

/// Decoding parameters in Cohere Command's wire format
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandParams {
    pub temperature: f64,
    #[serde(rename = "p")]
    pub top_p: f64,
    #[serde(rename = "k")]
    pub top_k: u32,
    pub max_tokens: u32,
    pub stop_sequences: Vec<String>,
}

impl From<&GenerationParams> for CommandParams {
    fn from(p: &GenerationParams) -> Self {
        Self {
            temperature: p.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: p.top_p.unwrap_or(DEFAULT_TOP_P),
            top_k: p.top_k.unwrap_or(DEFAULT_TOP_K),
            max_tokens: p.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            stop_sequences: p.stop_sequences.clone().unwrap_or_else(default_stop_sequences),
        }
    }
}

/// The family-specific decoding parameters sent with a generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InferenceModifier {
    Claude(ClaudeParams),
    Jurassic(JurassicParams),
    Command(CommandParams),
}

impl InferenceModifier {
    /// Resolve logical parameters into a family-specific modifier.
    ///
    /// When `params` is supplied it is the sole source of caller values and
    /// `kwargs` is ignored entirely; the two are never merged. Every
    /// recognized parameter resolves to the caller's value or the fixed
    /// default, never partially.
    pub fn resolve(
        model_type: &str,
        params: Option<GenerationParams>,
        kwargs: GenerationParams,
    ) -> Result<Self> {
        let effective = params.unwrap_or(kwargs);
        match model_type {
            "claude" => Ok(Self::Claude(ClaudeParams::from(&effective))),
            "jurassic" => Ok(Self::Jurassic(JurassicParams::from(&effective))),
            "command" => Ok(Self::Command(CommandParams::from(&effective))),
            other => Err(Error::InvalidArgument(format!(
                "unknown model_type: {other}"
            ))),
        }
    }

    /// Build a modifier for a known family, or `None` for families that do
    /// not take one (Titan carries its parameters in `textGenerationConfig`).
    pub fn for_family(family: ModelFamily, params: &GenerationParams) -> Option<Self> {
        match family {
            ModelFamily::Titan => None,
            ModelFamily::Claude => Some(Self::Claude(ClaudeParams::from(params))),
            ModelFamily::Jurassic => Some(Self::Jurassic(JurassicParams::from(params))),
            ModelFamily::Command => Some(Self::Command(CommandParams::from(params))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn claude_defaults() {
        let modifier = InferenceModifier::resolve("claude", None, GenerationParams::default())
            .unwrap();

        assert_eq!(
            to_value(&modifier).unwrap(),
            json!({
                "max_tokens_to_sample": 4096,
                "temperature": 0.5,
                "top_k": 250,
                "top_p": 1.0,
                "stop_sequences": ["\n\nHuman"],
            })
        );
    }

    #[test]
    fn jurassic_defaults_have_no_top_k() {
        let modifier = InferenceModifier::resolve("jurassic", None, GenerationParams::default())
            .unwrap();

        assert_eq!(
            to_value(&modifier).unwrap(),
            json!({
                "temperature": 0.5,
                "topP": 1.0,
                "maxTokens": 4096,
                "stopSequences": ["\n\nHuman"],
            })
        );
    }

    #[test]
    fn command_defaults() {
        let modifier = InferenceModifier::resolve("command", None, GenerationParams::default())
            .unwrap();

        assert_eq!(
            to_value(&modifier).unwrap(),
            json!({
                "temperature": 0.5,
                "p": 1.0,
                "k": 250,
                "max_tokens": 4096,
                "stop_sequences": ["\n\nHuman"],
            })
        );
    }

    #[test]
    fn explicit_params_override_kwargs_entirely() {
        let params = GenerationParams {
            temperature: Some(0.9),
            ..Default::default()
        };
        let kwargs = GenerationParams {
            top_k: Some(10),
            ..Default::default()
        };

        let modifier = InferenceModifier::resolve("claude", Some(params), kwargs).unwrap();

        let value = to_value(&modifier).unwrap();
        assert_eq!(value["temperature"], json!(0.9));
        // the kwargs top_k is ignored because params was supplied
        assert_eq!(value["top_k"], json!(250));
    }

    #[test]
    fn kwargs_apply_when_params_absent() {
        let kwargs = GenerationParams {
            top_k: Some(10),
            ..Default::default()
        };

        let modifier = InferenceModifier::resolve("claude", None, kwargs).unwrap();

        let value = to_value(&modifier).unwrap();
        assert_eq!(value["top_k"], json!(10));
    }

    #[test]
    fn unknown_family_is_rejected() {
        let err = InferenceModifier::resolve("unknown", None, GenerationParams::default())
            .unwrap_err();

        match err {
            Error::InvalidArgument(msg) => assert!(msg.contains("unknown")),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = InferenceModifier::resolve("command", None, GenerationParams::default()).unwrap();
        let b = InferenceModifier::resolve("command", None, GenerationParams::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn titan_takes_no_modifier() {
        assert!(
            InferenceModifier::for_family(ModelFamily::Titan, &GenerationParams::default())
                .is_none()
        );
    }
}
