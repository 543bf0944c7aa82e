//! Pure wizard transition function
//!
//! Given the same state and event it always yields the same result and
//! performs no I/O. The async operations in the parent module do the
//! provider call first and then feed the outcome in here.

use super::state::{Stage, WizardState};
use crate::turn::{require_text, TurnError};
use std::fmt;
use thiserror::Error;

/// Things that move the wizard between stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// The provider produced an analysis for the reported malfunction
    DiagnosisReady { malfunction: String, analysis: String },
    /// The user committed a patch for the reviewed diagnosis
    PatchCommitted { patch: String },
    Reset,
}

/// Wizard operations that are only valid in one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOperation {
    RunDiagnostic,
    CommitPatch,
}

impl WizardOperation {
    /// The only stage the operation may be invoked from
    pub fn required_stage(self) -> Stage {
        match self {
            WizardOperation::RunDiagnostic => Stage::Input,
            WizardOperation::CommitPatch => Stage::Review,
        }
    }
}

impl fmt::Display for WizardOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardOperation::RunDiagnostic => f.write_str("run diagnostic"),
            WizardOperation::CommitPatch => f.write_str("commit patch"),
        }
    }
}

/// A wizard operation was invoked in the wrong stage. Caller bug; the state
/// is left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {operation} while the wizard is at the {actual} stage (requires {expected})")]
pub struct InvalidStateError {
    pub operation: WizardOperation,
    pub expected: Stage,
    pub actual: Stage,
}

impl InvalidStateError {
    pub fn new(operation: WizardOperation, actual: Stage) -> Self {
        Self {
            operation,
            expected: operation.required_stage(),
            actual,
        }
    }
}

/// Check that `operation` may run from the current stage
pub fn ensure_stage(
    state: &WizardState,
    operation: WizardOperation,
) -> Result<(), InvalidStateError> {
    if state.stage() == operation.required_stage() {
        Ok(())
    } else {
        Err(InvalidStateError::new(operation, state.stage()))
    }
}

/// Apply `event` to `state`. The stage is checked before the texts, and
/// every stored text is trimmed and must be non-blank.
pub fn transition(state: &WizardState, event: WizardEvent) -> Result<WizardState, TurnError> {
    match event {
        WizardEvent::DiagnosisReady {
            malfunction,
            analysis,
        } => {
            ensure_stage(state, WizardOperation::RunDiagnostic)?;
            let malfunction = require_text(&malfunction)?;
            let analysis = require_text(&analysis)?;
            Ok(WizardState::reviewing(
                malfunction.to_string(),
                analysis.to_string(),
            ))
        }
        WizardEvent::PatchCommitted { patch } => {
            ensure_stage(state, WizardOperation::CommitPatch)?;
            let patch = require_text(&patch)?;
            state
                .resolved_with(patch.to_string())
                .ok_or_else(|| {
                    InvalidStateError::new(WizardOperation::CommitPatch, state.stage()).into()
                })
        }
        WizardEvent::Reset => Ok(WizardState::new()),
    }
}
