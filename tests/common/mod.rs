#![allow(dead_code)]

use groq_cli::environment::EnvironmentContext;
use groq_cli::error::{ExecError, ProviderError};
use groq_cli::executor::CommandRunner;
use groq_cli::interrupt::Interrupts;
use groq_cli::llm::ModelClient;
use groq_cli::pipeline::Pipeline;
use groq_cli::prompt::Prompt;
use groq_cli::types::{CommandSuggestion, ExecutionResult};
use groq_cli::ui::{Console, Tone};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn fixed_context() -> EnvironmentContext {
    EnvironmentContext {
        os: "Linux 6.8.0-test".to_string(),
        current_dir: "/work".to_string(),
        tools: vec!["ls".to_string(), "git".to_string()],
    }
}

/// Model that returns canned replies and remembers every prompt.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<Prompt>>,
    delay: Duration,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        })
    }

    pub fn replying(reply: &str) -> Arc<Self> {
        Self::new(vec![Ok(reply.to_string())])
    }

    pub fn slow(reply: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(vec![Ok(reply.to_string())].into()),
            prompts: Mutex::new(Vec::new()),
            delay,
        })
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ModelClient for ScriptedModel {
    fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        std::thread::sleep(self.delay);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::new("no scripted reply left")))
    }

    fn is_available(&self) -> bool {
        true
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Runner that records commands instead of spawning them.
#[derive(Clone)]
pub struct RecordingRunner {
    pub ran: Arc<Mutex<Vec<String>>>,
    result: ExecutionResult,
}

impl RecordingRunner {
    pub fn returning(result: ExecutionResult) -> Self {
        Self {
            ran: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    pub fn ran(&self) -> Vec<String> {
        self.ran.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str) -> Result<ExecutionResult, ExecError> {
        self.ran.lock().unwrap().push(command.to_string());
        Ok(self.result)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Said(Tone, String),
    Suggestion(String, CommandSuggestion),
    HighRiskBanner,
    /// Question and the default offered.
    Asked(String, bool),
    Table(String, Vec<Vec<String>>),
    File(String, String),
}

/// Console that answers confirmations from a script and records output.
#[derive(Default)]
pub struct ScriptedConsole {
    answers: VecDeque<Option<bool>>,
    pub shown: Vec<Shown>,
}

impl ScriptedConsole {
    /// `None` in `answers` simulates Ctrl+C at the prompt. When the script
    /// runs out, the offered default is taken.
    pub fn answering(answers: Vec<Option<bool>>) -> Self {
        Self {
            answers: answers.into(),
            shown: Vec::new(),
        }
    }

    pub fn said(&self, needle: &str) -> bool {
        self.shown
            .iter()
            .any(|s| matches!(s, Shown::Said(_, msg) if msg.contains(needle)))
    }

    pub fn asked_default(&self) -> Option<bool> {
        self.shown.iter().find_map(|s| match s {
            Shown::Asked(_, default) => Some(*default),
            _ => None,
        })
    }

    pub fn saw_banner(&self) -> bool {
        self.shown.contains(&Shown::HighRiskBanner)
    }

    pub fn saw_suggestion(&self) -> bool {
        self.shown
            .iter()
            .any(|s| matches!(s, Shown::Suggestion(..)))
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, tone: Tone, message: &str) {
        self.shown.push(Shown::Said(tone, message.to_string()));
    }

    fn show_suggestion(&mut self, persona: &str, suggestion: &CommandSuggestion) {
        self.shown
            .push(Shown::Suggestion(persona.to_string(), suggestion.clone()));
    }

    fn high_risk_banner(&mut self) {
        self.shown.push(Shown::HighRiskBanner);
    }

    fn confirm(&mut self, question: &str, default: bool) -> Option<bool> {
        self.shown.push(Shown::Asked(question.to_string(), default));
        self.answers.pop_front().unwrap_or(Some(default))
    }

    fn table(&mut self, title: &str, _headers: &[&str], rows: &[Vec<String>]) {
        self.shown.push(Shown::Table(title.to_string(), rows.to_vec()));
    }

    fn show_file(&mut self, title: &str, content: &str) {
        self.shown
            .push(Shown::File(title.to_string(), content.to_string()));
    }

    fn prompt(&mut self, _text: &str) {}
}

pub fn pipeline(model: Arc<ScriptedModel>, runner: RecordingRunner) -> Pipeline {
    pipeline_with(model, runner, Interrupts::new())
}

pub fn pipeline_with(
    model: Arc<ScriptedModel>,
    runner: RecordingRunner,
    interrupts: Interrupts,
) -> Pipeline {
    Pipeline::new(model, Box::new(runner), interrupts).with_probe(fixed_context)
}

pub const LS_REPLY: &str = r#"{"command": "ls -la", "explanation": "List all files with details", "risk_level": "low", "alternatives": []}"#;

pub const RM_REPLY: &str = r#"{"command": "rm -rf /tmp/x", "explanation": "Recursively delete /tmp/x", "risk_level": "high", "alternatives": ["rm -ri /tmp/x"]}"#;
