//! Language-model providers.
//!
//! One blocking round trip per request. There is no retry and no timeout
//! beyond the HTTP client's defaults; every failure surfaces as a
//! [`ProviderError`].

mod groq;
mod ollama;

pub use groq::GroqClient;
pub use ollama::OllamaClient;

use crate::config::{LlmConfig, Provider};
use crate::error::{ConfigError, ProviderError};
use crate::prompt::Prompt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A provider that turns a rendered prompt into raw reply text.
pub trait ModelClient: Send + Sync {
    fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError>;

    /// Cheap reachability check used by `doctor`.
    fn is_available(&self) -> bool;

    fn model(&self) -> &str;
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

pub(crate) fn chat_messages(prompt: &Prompt) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: prompt.system.clone(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: prompt.human.clone(),
        },
    ]
}

/// Build the client selected by `config`, resolving its credential.
pub fn client_from_config(config: &LlmConfig) -> Result<Arc<dyn ModelClient>, ConfigError> {
    match config.provider {
        Provider::Groq => {
            let api_key = config.api_key()?;
            Ok(Arc::new(GroqClient::new(config, api_key)))
        }
        Provider::Ollama => Ok(Arc::new(OllamaClient::new(config))),
    }
}
