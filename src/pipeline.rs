//! One request, end to end:
//!
//! `Idle → ProbingContext → AwaitingModel → Parsing → AwaitingConfirmation
//! → Executing → Done`, with `Aborted` reachable from the model and parse
//! steps. A declined confirmation goes straight to `Done`. Nothing carries
//! over between requests except the session's persona.

use crate::environment::{self, EnvironmentContext};
use crate::error::{ExecError, ParseError, ProviderError};
use crate::executor::CommandRunner;
use crate::interrupt::{Interrupts, Phase};
use crate::llm::ModelClient;
use crate::parser;
use crate::prompt::{self, Prompt};
use crate::safety;
use crate::session::Session;
use crate::types::{CommandSuggestion, ExecutionResult};
use crate::ui::{Console, Tone};
use std::{
    fmt,
    sync::{mpsc, Arc},
    thread,
    time::Duration,
};

const INTERRUPT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    ProbingContext,
    AwaitingModel,
    Parsing,
    AwaitingConfirmation,
    Executing,
    Done,
    Aborted,
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestState::Idle => "idle",
            RequestState::ProbingContext => "probing-context",
            RequestState::AwaitingModel => "awaiting-model",
            RequestState::Parsing => "parsing",
            RequestState::AwaitingConfirmation => "awaiting-confirmation",
            RequestState::Executing => "executing",
            RequestState::Done => "done",
            RequestState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AbortReason {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("interrupted")]
    Interrupted,
}

#[derive(Debug)]
pub enum RequestOutcome {
    /// The command ran; it may still have failed.
    Executed(ExecutionResult),
    Declined,
    ExecutionFailed(ExecError),
    Aborted(AbortReason),
}

impl RequestOutcome {
    pub fn final_state(&self) -> RequestState {
        match self {
            RequestOutcome::Aborted(_) => RequestState::Aborted,
            _ => RequestState::Done,
        }
    }
}

pub struct Pipeline {
    model: Arc<dyn ModelClient>,
    runner: Box<dyn CommandRunner>,
    interrupts: Interrupts,
    probe: fn() -> EnvironmentContext,
}

impl Pipeline {
    pub fn new(
        model: Arc<dyn ModelClient>,
        runner: Box<dyn CommandRunner>,
        interrupts: Interrupts,
    ) -> Self {
        Self {
            model,
            runner,
            interrupts,
            probe: environment::probe,
        }
    }

    pub fn with_probe(mut self, probe: fn() -> EnvironmentContext) -> Self {
        self.probe = probe;
        self
    }

    pub fn model(&self) -> &dyn ModelClient {
        self.model.as_ref()
    }

    pub fn interrupts(&self) -> &Interrupts {
        &self.interrupts
    }

    /// The prompt a request would be sent with right now.
    pub fn render_prompt(&self, session: &Session, request: &str) -> Prompt {
        let context = (self.probe)();
        let prompt = prompt::assemble(
            session.persona_text(),
            &context,
            &prompt::schema_description(),
            request,
        );
        tracing::debug!(
            persona = session.active_persona(),
            system_len = prompt.system.len(),
            "prompt assembled"
        );
        prompt
    }

    pub fn suggest(&self, session: &Session, request: &str) -> Result<CommandSuggestion, AbortReason> {
        transition(RequestState::ProbingContext);
        let prompt = self.render_prompt(session, request);

        transition(RequestState::AwaitingModel);
        let raw = self.invoke(prompt)?;

        transition(RequestState::Parsing);
        Ok(parser::parse(&raw)?)
    }

    /// Run the model call off-thread so an interrupt can abandon it.
    fn invoke(&self, prompt: Prompt) -> Result<String, AbortReason> {
        let _phase = self.interrupts.enter(Phase::AwaitingModel);
        let (tx, rx) = mpsc::channel();
        let model = Arc::clone(&self.model);
        thread::spawn(move || {
            // the receiver is gone if the request was interrupted
            let _ = tx.send(model.complete(&prompt));
        });

        loop {
            match rx.recv_timeout(INTERRUPT_POLL) {
                Ok(reply) => return Ok(reply?),
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if self.interrupts.take() {
                        return Err(AbortReason::Interrupted);
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    return Err(ProviderError::new("provider call panicked").into());
                }
            }
        }
    }

    pub fn process_request(
        &self,
        session: &Session,
        console: &mut dyn Console,
        request: &str,
    ) -> RequestOutcome {
        let persona = session.active_persona();
        console.say(Tone::Info, &format!("🤖 Getting {} suggestion...", persona));

        let suggestion = match self.suggest(session, request) {
            Ok(s) => s,
            Err(AbortReason::Interrupted) => {
                transition(RequestState::Aborted);
                console.say(Tone::Dim, "Cancelled by user.");
                return RequestOutcome::Aborted(AbortReason::Interrupted);
            }
            Err(reason) => {
                transition(RequestState::Aborted);
                tracing::warn!(error = %reason, "suggestion failed");
                console.say(Tone::Error, &format!("Error getting AI suggestion: {}", reason));
                console.say(Tone::Error, "❌ Failed to get command suggestion. Please try again.");
                return RequestOutcome::Aborted(reason);
            }
        };

        transition(RequestState::AwaitingConfirmation);
        let approved = {
            let _phase = self.interrupts.enter(Phase::Confirming);
            let approved = safety::confirm(console, persona, &suggestion);
            approved && !self.interrupts.take()
        };
        if !approved {
            transition(RequestState::Done);
            console.say(Tone::Dim, "Command not executed.");
            return RequestOutcome::Declined;
        }

        transition(RequestState::Executing);
        console.say(Tone::Dim, &format!("🚀 Executing: {}", suggestion.command));
        let run = {
            let _phase = self.interrupts.enter(Phase::Executing);
            let run = self.runner.run(&suggestion.command);
            let interrupted = self.interrupts.take();
            run.map(|mut result| {
                if interrupted && !result.success {
                    result.interrupted = true;
                }
                result
            })
        };
        transition(RequestState::Done);

        match run {
            Ok(result) => {
                report(console, &result);
                RequestOutcome::Executed(result)
            }
            Err(e) => {
                console.say(Tone::Error, &format!("❌ Error executing command: {}", e));
                RequestOutcome::ExecutionFailed(e)
            }
        }
    }
}

fn report(console: &mut dyn Console, result: &ExecutionResult) {
    if result.success {
        console.say(Tone::Success, "✅ Command completed successfully");
    } else if result.interrupted {
        console.say(Tone::Warning, "🛑 Command interrupted by user");
    } else {
        match result.exit_code {
            Some(code) => console.say(Tone::Warning, &format!("⚠️  Command exited with code {}", code)),
            None => console.say(Tone::Warning, "⚠️  Command terminated by a signal"),
        }
    }
}

fn transition(state: RequestState) {
    tracing::debug!(%state, "request state");
}
