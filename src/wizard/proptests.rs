//! Property-based tests for the wizard state machine
//!
//! These verify the stage invariants hold across arbitrary operation
//! sequences, including ones that call operations in the wrong stage.

use super::*;
use crate::turn::TurnError;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    /// A diagnosis the provider answered
    Diagnose { malfunction: String, analysis: String },
    /// A diagnosis the provider failed; nothing is applied
    DiagnoseFailed,
    Patch(String),
    Reset,
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-zA-Z][a-zA-Z ]{0,30}",
        1 => "[ \\t]{0,4}",
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (arb_text(), arb_text())
            .prop_map(|(malfunction, analysis)| Op::Diagnose { malfunction, analysis }),
        1 => Just(Op::DiagnoseFailed),
        3 => arb_text().prop_map(Op::Patch),
        1 => Just(Op::Reset),
    ]
}

/// Apply an operation the way the async controller would, minus the I/O
fn apply(state: &mut WizardState, op: &Op) -> Result<(), TurnError> {
    match op {
        Op::Diagnose {
            malfunction,
            analysis,
        } => {
            *state = transition(
                state,
                WizardEvent::DiagnosisReady {
                    malfunction: malfunction.clone(),
                    analysis: analysis.clone(),
                },
            )?;
            Ok(())
        }
        Op::DiagnoseFailed => {
            ensure_stage(state, WizardOperation::RunDiagnostic)?;
            Ok(())
        }
        Op::Patch(patch) => commit_patch(state, patch),
        Op::Reset => {
            reset(state);
            Ok(())
        }
    }
}

fn check_invariants(state: &WizardState) -> Result<(), TestCaseError> {
    match state.stage() {
        Stage::Input => {
            prop_assert!(state.malfunction_text().is_empty());
            prop_assert!(state.analysis_text().is_empty());
            prop_assert!(state.patch_text().is_empty());
        }
        Stage::Review => {
            prop_assert!(!state.analysis_text().trim().is_empty());
            prop_assert!(!state.malfunction_text().trim().is_empty());
            prop_assert!(state.patch_text().is_empty());
        }
        Stage::Resolved => {
            prop_assert!(!state.malfunction_text().is_empty());
            prop_assert!(!state.analysis_text().is_empty());
            prop_assert!(!state.patch_text().trim().is_empty());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_for_any_sequence(ops in proptest::collection::vec(arb_op(), 0..30)) {
        let mut state = WizardState::new();
        for op in &ops {
            let before = state.clone();
            match apply(&mut state, op) {
                Ok(()) => {}
                Err(TurnError::InvalidState(e)) => {
                    prop_assert_eq!(e.actual, before.stage());
                    prop_assert_eq!(&state, &before);
                }
                Err(TurnError::Validation(_)) => prop_assert_eq!(&state, &before),
                Err(TurnError::Completion(e)) => prop_assert!(false, "no provider in this test: {}", e),
            }
            check_invariants(&state)?;
        }
    }

    #[test]
    fn reset_always_returns_to_input(ops in proptest::collection::vec(arb_op(), 0..15)) {
        let mut state = WizardState::new();
        for op in &ops {
            let _ = apply(&mut state, op);
        }
        reset(&mut state);
        prop_assert_eq!(state.view(), WizardState::new().view());
    }

    #[test]
    fn stages_only_move_forward_or_reset(ops in proptest::collection::vec(arb_op(), 0..30)) {
        let rank = |stage: Stage| match stage {
            Stage::Input => 0,
            Stage::Review => 1,
            Stage::Resolved => 2,
        };
        let mut state = WizardState::new();
        for op in &ops {
            let before = rank(state.stage());
            let _ = apply(&mut state, op);
            let after = rank(state.stage());
            if matches!(op, Op::Reset) {
                prop_assert_eq!(after, 0);
            } else {
                prop_assert!(after == before || after == before + 1);
            }
        }
    }
}
