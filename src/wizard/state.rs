//! Wizard state types

use serde::Serialize;
use std::fmt;

/// Where the wizard currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Input,
    Review,
    Resolved,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Input => "input",
            Stage::Review => "review",
            Stage::Resolved => "resolved",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Artifacts owned by each stage. Fields only exist in the stages that
/// populate them, so a `Review` without an analysis cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Input,
    Review {
        malfunction: String,
        analysis: String,
    },
    Resolved {
        malfunction: String,
        analysis: String,
        patch: String,
    },
}

/// The diagnose -> patch -> resolve workflow record for one run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardState {
    phase: Phase,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn reviewing(malfunction: String, analysis: String) -> Self {
        Self {
            phase: Phase::Review {
                malfunction,
                analysis,
            },
        }
    }

    /// Move a reviewed diagnosis to resolved. Returns `None` outside `Review`.
    pub(super) fn resolved_with(&self, patch: String) -> Option<Self> {
        match &self.phase {
            Phase::Review {
                malfunction,
                analysis,
            } => Some(Self {
                phase: Phase::Resolved {
                    malfunction: malfunction.clone(),
                    analysis: analysis.clone(),
                    patch,
                },
            }),
            Phase::Input | Phase::Resolved { .. } => None,
        }
    }

    pub fn stage(&self) -> Stage {
        match self.phase {
            Phase::Input => Stage::Input,
            Phase::Review { .. } => Stage::Review,
            Phase::Resolved { .. } => Stage::Resolved,
        }
    }

    /// The reported malfunction; empty at `Input`
    pub fn malfunction_text(&self) -> &str {
        match &self.phase {
            Phase::Input => "",
            Phase::Review { malfunction, .. } | Phase::Resolved { malfunction, .. } => malfunction,
        }
    }

    /// The provider's analysis; empty at `Input`
    pub fn analysis_text(&self) -> &str {
        match &self.phase {
            Phase::Input => "",
            Phase::Review { analysis, .. } | Phase::Resolved { analysis, .. } => analysis,
        }
    }

    /// The committed patch; empty until `Resolved`
    pub fn patch_text(&self) -> &str {
        match &self.phase {
            Phase::Input | Phase::Review { .. } => "",
            Phase::Resolved { patch, .. } => patch,
        }
    }

    /// Flattened view for the presentation surface
    pub fn view(&self) -> WizardView {
        WizardView {
            stage: self.stage(),
            malfunction_text: self.malfunction_text().to_string(),
            analysis_text: self.analysis_text().to_string(),
            patch_text: self.patch_text().to_string(),
        }
    }
}

/// `(stage, malfunction, analysis, patch)` as the UI renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardView {
    pub stage: Stage,
    pub malfunction_text: String,
    pub analysis_text: String,
    pub patch_text: String,
}
