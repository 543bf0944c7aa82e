//! Start-up configuration read from the environment

use crate::llm::{ModelParams, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("Failed to read prompt file {path}: {source}")]
    PromptFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Prompt file {0} is empty")]
    EmptyPrompt(PathBuf),
}

/// Configuration for the completion provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API base, e.g. `https://api.openai.com/v1` or a compatible gateway
    pub base_url: String,
    pub params: ModelParams,
    pub request_timeout: Duration,
}

/// Optional files replacing the built-in prompts
#[derive(Debug, Clone, Default)]
pub struct PromptOverrides {
    pub companion: Option<PathBuf>,
    pub diagnostic: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub llm: LlmConfig,
    pub prompts: PromptOverrides,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = parse_var(&var, "COMPANION_PORT")?.unwrap_or(DEFAULT_PORT);
        let temperature: f32 =
            parse_var(&var, "COMPANION_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                name: "COMPANION_TEMPERATURE",
                value: temperature.to_string(),
                reason: "must be between 0 and 2".to_string(),
            });
        }
        let max_output_tokens =
            parse_var(&var, "COMPANION_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS);
        let timeout_secs = parse_var(&var, "COMPANION_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            port,
            llm: LlmConfig {
                base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                params: ModelParams {
                    model: var("COMPANION_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                    temperature,
                    max_output_tokens,
                },
                request_timeout: Duration::from_secs(timeout_secs),
            },
            prompts: PromptOverrides {
                companion: var("COMPANION_SYSTEM_PROMPT_FILE").map(PathBuf::from),
                diagnostic: var("COMPANION_WIZARD_PROMPT_FILE").map(PathBuf::from),
            },
        })
    }
}

fn parse_var<T>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    var(name)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e: T::Err| ConfigError::InvalidValue {
                    name,
                    value: value.clone(),
                    reason: e.to_string(),
                })
        })
        .transpose()
}
