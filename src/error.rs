use std::path::PathBuf;

/// Problems with configuration detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} environment variable not set")]
    MissingCredential { var: String },

    #[error("unknown provider '{name}' (expected 'groq' or 'ollama')")]
    UnknownProvider { name: String },

    #[error(transparent)]
    UnknownPersona(#[from] UnknownPersona),

    #[error("failed to write config to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The model provider could not produce a reply.
///
/// Auth, network, HTTP status and decoding failures all land here; the
/// pipeline recovers from each the same way.
#[derive(Debug, thiserror::Error)]
#[error("request failed: {message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// The model reply did not decode into a complete suggestion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid suggestion: {reason}")]
pub struct ParseError {
    reason: String,
}

impl ParseError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to start shell: {0}")]
pub struct ExecError(#[from] pub std::io::Error);

/// Failures of the `/cd`, `/read` and `/write` utilities.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown persona: {name}")]
pub struct UnknownPersona {
    pub name: String,
}
