//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

use super::openai_llm::{DEFAULT_MODEL, DEFAULT_TIMEOUT};

/// Default OpenAI-compatible endpoint (Groq).
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn timeout_secs(&self) -> u64;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }
    fn base_url(&self) -> &str {
        &self.base_url
    }
    fn model(&self) -> &str {
        &self.model
    }
    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl EnvLlmConfig {
    /// Load from environment variables.
    ///
    /// `GROQ_API_KEY` (or `OPENAI_API_KEY`) is required; `OPENAI_BASE_URL`,
    /// `MODEL`, and `LLM_TIMEOUT_SECS` are optional with Groq-friendly
    /// defaults. Call after loading `.env` (e.g. `dotenvy::dotenv()`).
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GROQ_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .context("GROQ_API_KEY (or OPENAI_API_KEY) not set")?;
        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT.as_secs());
        Ok(Self {
            api_key,
            base_url,
            model,
            timeout_secs,
        })
    }
}
