//! Free-form counsel turns against the accumulated session history

#[cfg(test)]
mod proptests;

use crate::credential::ApiKey;
use crate::llm::{LlmMessage, MessageRole};
use crate::session::{Message, Session};
use crate::turn::{require_credential, require_text, CompletionContext, TurnError};

/// Prepended to user messages on the wire; the session log keeps the raw text
const CONCERN_PREFIX: &str = "User concern: ";

/// Run one request/response turn.
///
/// The user's message is appended before the provider is called and stays in
/// the log even when the call fails; the assistant reply is appended only on
/// success. Returns the reply text.
pub async fn submit_turn(
    session: &mut Session,
    user_text: &str,
    credential: Option<&ApiKey>,
    ctx: &CompletionContext<'_>,
) -> Result<String, TurnError> {
    let text = require_text(user_text)?;
    let api_key = require_credential(credential)?;

    session.append(Message::user(text));

    match ctx.complete_text(api_key, framed_history(session)).await {
        Ok(reply) => {
            session.append(Message::assistant(reply.clone()));
            tracing::info!(
                session_id = %session.id(),
                messages = session.len(),
                "Counsel turn completed"
            );
            Ok(reply)
        }
        Err(e) => {
            tracing::warn!(
                session_id = %session.id(),
                messages = session.len(),
                error = %e,
                "Counsel turn failed"
            );
            Err(e.into())
        }
    }
}

fn framed_history(session: &Session) -> Vec<LlmMessage> {
    session
        .to_llm_messages()
        .into_iter()
        .map(|mut message| {
            if message.role == MessageRole::User {
                message.content = format!("{CONCERN_PREFIX}{}", message.content);
            }
            message
        })
        .collect()
}
