use crate::error::{ConfigError, UnknownPersona};
use crate::personas;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_NAME: &str = "groq-cli";
const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_OLLAMA_MODEL: &str = "llama3.1";
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
const DEFAULT_TEMPERATURE: f32 = 0.1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Groq,
    Ollama,
}

impl std::str::FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(Provider::Groq),
            "ollama" => Ok(Provider::Ollama),
            _ => Err(ConfigError::UnknownProvider {
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: Provider,
    /// Falls back to the provider's default model when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Falls back to the provider's public endpoint when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub temperature: f32,
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Groq,
            model: None,
            endpoint: None,
            temperature: DEFAULT_TEMPERATURE,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl LlmConfig {
    pub fn model(&self) -> &str {
        match (&self.model, self.provider) {
            (Some(model), _) => model,
            (None, Provider::Groq) => DEFAULT_GROQ_MODEL,
            (None, Provider::Ollama) => DEFAULT_OLLAMA_MODEL,
        }
    }

    pub fn endpoint(&self) -> &str {
        match (&self.endpoint, self.provider) {
            (Some(endpoint), _) => endpoint,
            (None, Provider::Groq) => DEFAULT_GROQ_URL,
            (None, Provider::Ollama) => DEFAULT_OLLAMA_URL,
        }
    }

    /// Read the provider credential from the environment.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        match env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingCredential {
                var: self.api_key_env.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub default_persona: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            default_persona: personas::DEFAULT_PERSONA.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub behavior: BehaviorConfig,
}

impl Config {
    /// Persona names are checked here so a typo in the file is caught at
    /// startup rather than on the first request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = self.behavior.default_persona.trim().to_lowercase();
        if !personas::contains(&name) {
            return Err(UnknownPersona {
                name: self.behavior.default_persona.clone(),
            }
            .into());
        }
        Ok(())
    }
}

pub fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join("config.toml")
}

/// Load `path`, falling back to defaults when the file is missing or bad.
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read config");
            Config::default()
        }
    }
}

pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content).map_err(write_err)?;
    Ok(())
}
