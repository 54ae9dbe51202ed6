use super::{chat_messages, ChatMessage, ModelClient};
use crate::config::LlmConfig;
use crate::error::ProviderError;
use crate::prompt::Prompt;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for Groq's OpenAI-compatible chat completions API.
pub struct GroqClient {
    base_url: String,
    model: String,
    temperature: f32,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GroqClient {
    pub fn new(config: &LlmConfig, api_key: String) -> Self {
        Self {
            base_url: config.endpoint().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            temperature: config.temperature,
            api_key,
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl ModelClient for GroqClient {
    fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: self.model.clone(),
            messages: chat_messages(prompt),
            temperature: self.temperature,
            stream: false,
        };
        tracing::debug!(%url, model = %self.model, system_len = prompt.system.len(), "sending chat completion");

        let resp: ChatResponse = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ProviderError::new("response contained no message"))
    }

    fn is_available(&self) -> bool {
        let url = format!("{}/models", self.base_url);
        self.client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
