//! Property-based tests for counsel turns
//!
//! For any mix of outcomes, the log holds one user message per accepted turn
//! and one assistant message per successful turn, never more.

use super::submit_turn;
use crate::credential::ApiKey;
use crate::llm::testing::MockLlmService;
use crate::llm::{LlmError, ModelParams};
use crate::session::{Session, Speaker};
use crate::turn::{CompletionContext, TurnError};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Outcome {
    Reply(String),
    EmptyReply,
    Fault,
    BlankInput,
}

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        4 => "[a-zA-Z][a-zA-Z .]{0,40}".prop_map(Outcome::Reply),
        1 => Just(Outcome::EmptyReply),
        2 => Just(Outcome::Fault),
        1 => Just(Outcome::BlankInput),
    ]
}

fn run_turns(outcomes: &[Outcome]) -> (Session, usize, usize, usize) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let mock = MockLlmService::new();
    let params = ModelParams::default();
    let ctx = CompletionContext::new(&mock, "system", &params);
    let key = ApiKey::new("sk-test").unwrap();
    let mut session = Session::new();
    let (mut succeeded, mut failed, mut rejected) = (0, 0, 0);

    runtime.block_on(async {
        for (i, outcome) in outcomes.iter().enumerate() {
            let text = match outcome {
                Outcome::Reply(reply) => {
                    mock.queue_text(reply);
                    format!("turn {i}")
                }
                Outcome::EmptyReply => {
                    mock.queue_empty("{}");
                    format!("turn {i}")
                }
                Outcome::Fault => {
                    mock.queue_error(LlmError::network("connection reset"));
                    format!("turn {i}")
                }
                Outcome::BlankInput => " \t ".to_string(),
            };

            match submit_turn(&mut session, &text, Some(&key), &ctx).await {
                Ok(_) => succeeded += 1,
                Err(TurnError::Completion(_)) => failed += 1,
                Err(TurnError::Validation(_)) => rejected += 1,
                Err(TurnError::InvalidState(e)) => panic!("unexpected wizard error: {e}"),
            }
        }
    });

    (session, succeeded, failed, rejected)
}

proptest! {
    #[test]
    fn message_count_law(outcomes in proptest::collection::vec(arb_outcome(), 0..20)) {
        let (session, succeeded, failed, rejected) = run_turns(&outcomes);

        prop_assert_eq!(session.len(), 2 * succeeded + failed);
        prop_assert_eq!(succeeded + failed + rejected, outcomes.len());

        let assistants = session
            .snapshot()
            .iter()
            .filter(|m| m.role() == Speaker::Assistant)
            .count();
        prop_assert_eq!(assistants, succeeded);
    }

    #[test]
    fn assistant_always_follows_user(outcomes in proptest::collection::vec(arb_outcome(), 0..20)) {
        let (session, ..) = run_turns(&outcomes);
        let messages = session.snapshot();

        for (i, message) in messages.iter().enumerate() {
            if message.role() == Speaker::Assistant {
                prop_assert!(i > 0);
                prop_assert_eq!(messages[i - 1].role(), Speaker::User);
                prop_assert!(!message.content().is_empty());
            }
        }
    }
}
