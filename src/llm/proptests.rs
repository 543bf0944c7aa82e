//! Property-based tests for the `OpenAI` translation layer
//!
//! - Conversation order and content survive translation
//! - The system instruction always leads when present
//! - A normalized reply is never blank text

use super::openai::OpenAIService;
use super::types::{Completion, LlmMessage, LlmRequest, MessageRole, ModelParams};
use proptest::prelude::*;

fn arb_message() -> impl Strategy<Value = LlmMessage> {
    (any::<bool>(), "[a-zA-Z0-9 .,!?]{0,80}").prop_map(|(is_user, content)| {
        if is_user {
            LlmMessage::user(content)
        } else {
            LlmMessage::assistant(content)
        }
    })
}

fn arb_request() -> impl Strategy<Value = LlmRequest> {
    (
        "[a-zA-Z .]{0,40}",
        proptest::collection::vec(arb_message(), 0..12),
        prop_oneof![Just("gpt-4o-mini"), Just("gpt-4o"), Just("o4-mini")],
        1u32..4000,
    )
        .prop_map(|(system, messages, model, max_output_tokens)| LlmRequest {
            system,
            messages,
            params: ModelParams {
                model: model.to_string(),
                temperature: 0.5,
                max_output_tokens,
            },
        })
}

proptest! {
    #[test]
    fn translation_preserves_conversation(request in arb_request()) {
        let translated = OpenAIService::translate_for_test(&request);
        let offset = usize::from(!request.system.is_empty());

        prop_assert_eq!(translated.messages.len(), request.messages.len() + offset);
        if offset == 1 {
            prop_assert_eq!(translated.messages[0].role.as_str(), "system");
            prop_assert_eq!(translated.messages[0].content.as_deref(), Some(request.system.as_str()));
        }

        for (original, wire) in request.messages.iter().zip(&translated.messages[offset..]) {
            let role = match original.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            };
            prop_assert_eq!(wire.role.as_str(), role);
            prop_assert_eq!(wire.content.as_deref(), Some(original.content.as_str()));
        }
    }

    #[test]
    fn translation_sets_exactly_one_token_limit(request in arb_request()) {
        let translated = OpenAIService::translate_for_test(&request);
        prop_assert!(translated.max_tokens.is_some() ^ translated.max_completion_tokens.is_some());
        prop_assert_eq!(
            translated.max_tokens.or(translated.max_completion_tokens),
            Some(request.params.max_output_tokens)
        );
    }

    #[test]
    fn normalized_text_is_never_blank(content in "[ \\n\\ta-z]{0,30}") {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string();
        let response = OpenAIService::normalize_for_test(&body);

        match response.completion {
            Completion::Text(text) => {
                prop_assert!(!text.is_empty());
                prop_assert_eq!(text.as_str(), content.trim());
            }
            Completion::Empty { raw } => {
                prop_assert!(content.trim().is_empty());
                prop_assert!(!raw.is_empty());
            }
        }
    }
}
