//! OpenAI-compatible client configuration.
//!
//! The agent talks to any endpoint that speaks the OpenAI chat-completion
//! schema (LM Studio, llama.cpp server, vLLM, OpenAI itself).

use crate::config::LlmSettings;
use crate::error::{Result, WebnavError};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// API key sent to local servers that ignore authentication.
const PLACEHOLDER_API_KEY: &str = "dummy";

/// Create a chat-completion client from the LLM settings.
///
/// The key is taken from the settings, then `OPENAI_API_KEY`, then a
/// placeholder so local servers keep working without one.
pub fn create_client(settings: &LlmSettings) -> Result<Client<OpenAIConfig>> {
    let api_key = settings
        .api_key
        .clone()
        .filter(|k| !k.is_empty())
        .or_else(|| std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()))
        .unwrap_or_else(|| PLACEHOLDER_API_KEY.to_string());

    let config = OpenAIConfig::new()
        .with_api_base(settings.base_url.trim_end_matches('/'))
        .with_api_key(api_key);

    create_client_with_timeout(config, Duration::from_secs(settings.timeout_secs))
}

/// Create a client for the given config with a custom timeout.
pub fn create_client_with_timeout(
    config: OpenAIConfig,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| WebnavError::Config(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Client::with_config(config).with_http_client(http_client))
}
