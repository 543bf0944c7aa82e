//! API credential resolution
//!
//! The environment is consulted first; a key entered interactively with the
//! request is the fallback. Keys are held in memory only and never logged.

use std::fmt;

/// Environment variable holding the provider API key
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// A non-empty API key. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for keys that are empty after trimming
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Where API keys come from for this run
#[derive(Debug, Clone, Default)]
pub struct CredentialSource {
    ambient: Option<ApiKey>,
}

impl CredentialSource {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            ambient: lookup(API_KEY_ENV_VAR).as_deref().and_then(ApiKey::new),
        }
    }

    /// Whether a key was provided by the environment
    pub fn has_ambient(&self) -> bool {
        self.ambient.is_some()
    }

    /// Resolve the key for one turn: environment first, then the interactive entry
    pub fn resolve(&self, interactive: Option<&str>) -> Option<ApiKey> {
        self.ambient
            .clone()
            .or_else(|| interactive.and_then(ApiKey::new))
    }
}
