//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait — the single backend contract the VTA core
//! depends on: an ordered list of role-tagged messages plus a sampling
//! temperature, returning either a text completion or an error — and an
//! OpenAI-compatible implementation (the Groq API speaks the same protocol;
//! the base URL is configurable).
//!
//! Every call is bounded by a request timeout; an expired call fails like any
//! other transport error and never hangs the calling worker.

use anyhow::Result;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use async_trait::async_trait;
use prompt::{ChatMessage, MessageRole};

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_BASE_URL};
pub use openai_llm::{OpenAiLlmClient, DEFAULT_MODEL, DEFAULT_TIMEOUT};

/// LLM client interface: one completion from a list of messages at the given
/// sampling temperature. This is the only backend capability the core uses.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for the given messages
    /// (system/user/assistant). Errors cover transport, auth, and timeout.
    async fn complete(&self, messages: Vec<ChatMessage>, temperature: f32) -> Result<String>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
