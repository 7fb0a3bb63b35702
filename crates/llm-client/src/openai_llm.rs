//! OpenAI-compatible LlmClient implementation on async-openai.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_openai::{types::CreateChatCompletionRequestArgs, Client};
use async_trait::async_trait;
use prompt::ChatMessage;
use tracing::{info, instrument};

use super::{chat_message_to_openai, LlmClient, LlmConfig};

/// Default model, matching the Groq deployment the assistant runs against.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default per-request timeout. A call that exceeds this fails like any
/// other transport error.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// LlmClient backed by an OpenAI-compatible chat-completions API.
#[derive(Clone)]
pub struct OpenAiLlmClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    model: String,
    request_timeout: Duration,
}

impl OpenAiLlmClient {
    pub fn new(api_key: String) -> Self {
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds a client from any [`LlmConfig`] (base URL, model, timeout).
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model())
            .with_timeout(Duration::from_secs(config.timeout_secs()))
    }
}

#[async_trait]
impl LlmClient for OpenAiLlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn complete(&self, messages: Vec<ChatMessage>, temperature: f32) -> Result<String> {
        let mut openai_messages = Vec::with_capacity(messages.len());
        for msg in &messages {
            openai_messages.push(chat_message_to_openai(msg)?);
        }

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(openai_messages)
            .temperature(temperature)
            .build()?;

        let response =
            tokio::time::timeout(self.request_timeout, self.client.chat().create(request))
                .await
                .map_err(|_| {
                    anyhow::anyhow!(
                        "LLM request timed out after {}s",
                        self.request_timeout.as_secs()
                    )
                })??;

        let Some(choice) = response.choices.first() else {
            anyhow::bail!("No choices in LLM response");
        };
        let content = choice.message.content.clone().unwrap_or_default();
        info!(
            message_count = messages.len(),
            reply_len = content.len(),
            "LLM completion returned"
        );
        Ok(content)
    }
}
