use super::{chat_messages, ChatMessage, ModelClient};
use crate::config::LlmConfig;
use crate::error::ProviderError;
use crate::prompt::Prompt;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct OllamaChat {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

/// Client for a local Ollama server. Needs no credential.
pub struct OllamaClient {
    base_url: String,
    model: String,
    temperature: f32,
    client: reqwest::blocking::Client,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            base_url: config.endpoint().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            temperature: config.temperature,
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl ModelClient for OllamaClient {
    fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = OllamaChat {
            model: self.model.clone(),
            messages: chat_messages(prompt),
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
            },
        };
        tracing::debug!(%url, model = %self.model, "sending ollama chat");
        let resp: OllamaChatResponse = self
            .client
            .post(&url)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(resp.message.content)
    }

    fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        self.client.get(&url).send().is_ok()
    }

    fn model(&self) -> &str {
        &self.model
    }
}
