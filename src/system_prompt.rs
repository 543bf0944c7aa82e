//! Fixed system instructions for the counsel chat and the malfunction wizard
//!
//! Both prompts are read-only after start-up. Either may be replaced by a
//! file named in the configuration.

use crate::config::{ConfigError, PromptOverrides};
use std::path::Path;

/// Instruction for free-form counsel turns
const COMPANION_PROMPT: &str = r#"You are a compassionate guide whose psychological model follows Buddhist
insights (clinging creates suffering) but whose language is thoroughly
Stoic (dichotomy of control, inner citadel, rational judgment). Your job
is to help modern Western users see how letting go of craving restores
calm, phrased in Stoic terminology so it feels accessible.

Guardrails:
- Never shame or judge the user.
- Emphasize what is within their control (thoughts, choices) versus
  externals (other people, status, outcomes).
- Offer at most three short sections: "Perspective", "Practice",
  "Closing Mantra".
- Keep responses warm, grounded, and concise, around 120-180 words total."#;

/// Instruction for the single-shot wizard diagnosis
const DIAGNOSTIC_PROMPT: &str = r#"You are a calm diagnostician of the mind. The user reports a "malfunction":
a habit, reaction, or craving that keeps disturbing their peace. Read it the
way a Buddhist teacher reads attachment, and explain it in the plain language
of a Stoic: what is within their control and what is not.

Respond with exactly three short sections:
- "Diagnosis": the attachment or aversion driving the behavior.
- "Root Judgment": the mistaken belief that keeps it running.
- "Suggested Patch": one small, concrete practice the user can commit to.

Never shame the user. Keep the whole reply under 160 words."#;

/// The system instructions in effect for this run
#[derive(Debug, Clone)]
pub struct Prompts {
    pub companion: String,
    pub diagnostic: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            companion: COMPANION_PROMPT.to_string(),
            diagnostic: DIAGNOSTIC_PROMPT.to_string(),
        }
    }
}

impl Prompts {
    /// Built-in prompts, with any configured override files applied
    pub fn load(overrides: &PromptOverrides) -> Result<Self, ConfigError> {
        let mut prompts = Self::default();
        if let Some(path) = &overrides.companion {
            prompts.companion = read_prompt(path)?;
            tracing::info!(path = %path.display(), "Loaded companion prompt override");
        }
        if let Some(path) = &overrides.diagnostic {
            prompts.diagnostic = read_prompt(path)?;
            tracing::info!(path = %path.display(), "Loaded wizard prompt override");
        }
        Ok(prompts)
    }
}

fn read_prompt(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::PromptFile {
        path: path.to_path_buf(),
        source,
    })?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyPrompt(path.to_path_buf()));
    }
    Ok(trimmed.to_string())
}
