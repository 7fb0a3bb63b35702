//! Completion invoker: runs one tutoring turn against the LLM backend.

use std::sync::Arc;

use llm_client::LlmClient;
use prompt::{system_instruction, ChatMessage, LearnerContext};
use tracing::{error, info, instrument, warn};
use tutor_core::{ConversationId, TutorError};

use crate::registry::SessionRegistry;

/// Sampling temperature for tutoring replies.
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Substitute reply used when the backend fails or degrades. Persisted into
/// history like a real reply; never empty or whitespace.
pub const FALLBACK_TEXT: &str = "It seems like we're experiencing a technical issue. \
    Don't worry, let's try to resolve this together. The error message is indicating \
    a problem with the LLM API configuration or connectivity. I'm here to help you \
    navigate through any challenges that come up. How would you like to proceed?";

/// Marker the degraded backend puts in its own failure replies. Matching it
/// is policy, not protocol; blank output is caught regardless.
const DISTRESS_MARKER: &str = "I apologize,";

/// The conversation engine: resolves the history store, builds the
/// personalized request, invokes the backend, and absorbs every failure into
/// [`FALLBACK_TEXT`].
pub struct TutorEngine {
    llm: Arc<dyn LlmClient>,
    registry: SessionRegistry,
}

impl TutorEngine {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self::with_registry(llm, SessionRegistry::new())
    }

    /// Uses an externally owned registry, e.g. one shared with an eviction
    /// task or inspected by tests.
    pub fn with_registry(llm: Arc<dyn LlmClient>, registry: SessionRegistry) -> Self {
        Self { llm, registry }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Runs one tutoring turn and returns the assistant text.
    ///
    /// Never returns an error and never returns a blank string: backend
    /// failures, timeouts, and degraded replies all become [`FALLBACK_TEXT`],
    /// which is stored in history like a real reply so subsequent turns see
    /// it as prior context. After every call the history holds at most
    /// [`crate::MAX_HISTORY`] turns, oldest dropped first.
    #[instrument(skip_all, fields(conversation = %conversation_id))]
    pub async fn respond(
        &self,
        conversation_id: &ConversationId,
        user_text: &str,
        ctx: &LearnerContext,
    ) -> String {
        let store = self.registry.get_or_create(conversation_id).await;
        // Held across the whole turn: same-conversation calls apply in arrival order.
        let mut store = store.lock().await;

        store.push_user(user_text);

        let mut messages = vec![ChatMessage::system(system_instruction(ctx))];
        // Prior history only; the active query goes in once, at the end.
        messages.extend_from_slice(store.prior());
        messages.push(ChatMessage::user(user_text));

        let reply = match self.llm.complete(messages, CHAT_TEMPERATURE).await {
            Ok(text) if is_degraded(&text) => {
                let cause = TutorError::DegradedResponse(
                    "backend reply was blank or self-flagged as failed".to_string(),
                );
                warn!(error = %cause, "Substituting fallback reply");
                FALLBACK_TEXT.to_string()
            }
            Ok(text) => text,
            Err(e) => {
                let cause = TutorError::BackendUnavailable(e.to_string());
                error!(error = %cause, "Substituting fallback reply");
                FALLBACK_TEXT.to_string()
            }
        };

        store.push_assistant(reply.clone());
        store.trim();
        info!(
            history_len = store.len(),
            reply_len = reply.len(),
            "Tutoring turn completed"
        );
        reply
    }
}

/// A successful reply still counts as degraded when it is blank or carries
/// the backend's own failure marker.
fn is_degraded(text: &str) -> bool {
    text.trim().is_empty() || text.contains(DISTRESS_MARKER)
}
