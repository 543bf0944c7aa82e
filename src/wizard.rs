//! Three-stage malfunction wizard: diagnose, patch, resolve
//!
//! Unlike counsel turns the wizard keeps no history: the diagnosis is a
//! single-shot request carrying only the reported malfunction.

#[cfg(test)]
mod proptests;
mod state;
mod transition;

pub use state::{Stage, WizardState, WizardView};
pub use transition::{
    ensure_stage, transition, InvalidStateError, WizardEvent, WizardOperation,
};

use crate::credential::ApiKey;
use crate::llm::LlmMessage;
use crate::turn::{require_credential, require_text, CompletionContext, TurnError};

/// Diagnose a malfunction. Valid only at `Input`; moves to `Review` on
/// success and leaves the state untouched on any failure.
pub async fn run_diagnostic(
    state: &mut WizardState,
    malfunction_text: &str,
    credential: Option<&ApiKey>,
    ctx: &CompletionContext<'_>,
) -> Result<String, TurnError> {
    ensure_stage(state, WizardOperation::RunDiagnostic)?;
    let malfunction = require_text(malfunction_text)?;
    let api_key = require_credential(credential)?;

    let analysis = ctx
        .complete_text(api_key, vec![LlmMessage::user(malfunction)])
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Wizard diagnosis failed"))?;

    *state = transition(
        state,
        WizardEvent::DiagnosisReady {
            malfunction: malfunction.to_string(),
            analysis: analysis.clone(),
        },
    )?;
    tracing::info!(stage = %state.stage(), "Wizard diagnosis recorded");
    Ok(analysis)
}

/// Commit the user's patch. Valid only at `Review`; no provider call.
pub fn commit_patch(state: &mut WizardState, patch_text: &str) -> Result<(), TurnError> {
    *state = transition(
        state,
        WizardEvent::PatchCommitted {
            patch: patch_text.to_string(),
        },
    )?;
    tracing::info!(stage = %state.stage(), "Wizard patch committed");
    Ok(())
}

/// Return to `Input` with every field cleared. Always succeeds.
pub fn reset(state: &mut WizardState) {
    // Reset is accepted from every stage
    *state = transition(state, WizardEvent::Reset).unwrap_or_default();
    tracing::debug!("Wizard reset");
}
