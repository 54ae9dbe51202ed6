//! The interactive loop: free text goes to the pipeline, `/commands` are
//! dispatched here. A failing command is reported and the loop continues.

use crate::files::{self, EntryKind, WriteMode, APP_DISPLAY_LIMIT};
use crate::interrupt::Phase;
use crate::personas;
use crate::pipeline::{Pipeline, RequestOutcome};
use crate::session::Session;
use crate::ui::{prompt_text, Console, Tone};
use anyhow::Context;
use std::{
    env,
    io::{self, BufRead},
    path::{Path, PathBuf},
};

const DEBUG_PREFIX: &str = "Debug this error/code and provide solutions: ";

/// `(usage, description)` for `/help`.
const COMMANDS: &[(&str, &str)] = &[
    ("/persona [name]", "Show or switch the active persona"),
    ("/files", "List files in the current directory"),
    ("/cd <path>", "Change the current directory"),
    ("/apps", "List executables on the search path"),
    ("/read <file>", "Show a file with line numbers"),
    ("/write <file>", "Create, overwrite or append to a file"),
    ("/debug", "Paste an error or code and get a fix"),
    ("/help", "Show this list"),
    ("/quit, /exit", "Leave the session"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Quit,
    Help,
    Persona(Option<String>),
    Files,
    Cd(String),
    Apps,
    Read(String),
    Write(String),
    Debug,
    Unknown(String),
    Request(String),
}

pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return ReplCommand::Request(line.to_string());
    };

    let (name, args) = match rest.split_once(' ') {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };
    match name.to_lowercase().as_str() {
        "quit" | "exit" => ReplCommand::Quit,
        "help" => ReplCommand::Help,
        "persona" if args.is_empty() => ReplCommand::Persona(None),
        "persona" => ReplCommand::Persona(Some(args.to_string())),
        "files" => ReplCommand::Files,
        "cd" => ReplCommand::Cd(args.to_string()),
        "apps" => ReplCommand::Apps,
        "read" => ReplCommand::Read(args.to_string()),
        "write" => ReplCommand::Write(args.to_string()),
        "debug" => ReplCommand::Debug,
        other => ReplCommand::Unknown(other.to_string()),
    }
}

pub fn debug_request(input: &str) -> String {
    format!("{}{}", DEBUG_PREFIX, input)
}

/// Where the REPL reads its lines from.
pub trait LineSource {
    /// Next line without its terminator, `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

#[derive(Debug, Default)]
pub struct StdinSource;

impl LineSource for StdinSource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        read_trimmed(&mut io::stdin().lock())
    }
}

/// Lines from any buffered reader.
#[derive(Debug)]
pub struct ReaderSource<R>(pub R);

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        read_trimmed(&mut self.0)
    }
}

fn read_trimmed(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let end = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(end);
    Ok(Some(line))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Repl<C: Console, L: LineSource> {
    pipeline: Pipeline,
    session: Session,
    console: C,
    input: L,
}

impl<C: Console, L: LineSource> Repl<C, L> {
    pub fn new(pipeline: Pipeline, session: Session, console: C, input: L) -> Self {
        Self {
            pipeline,
            session,
            console,
            input,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Read and handle lines until `/quit` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
            self.console.prompt(&prompt_text(&cwd));
            let Some(line) = self.input.next_line().context("failed to read input")? else {
                self.console.say(Tone::Dim, "\nGoodbye! 👋");
                return Ok(());
            };
            if self.handle_line(&line) == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Handle one line. Errors are reported, never propagated.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        let command = parse_command(line);
        tracing::debug!(?command, "repl input");
        match self.dispatch(command) {
            Ok(flow) => flow,
            Err(e) => {
                tracing::warn!(error = ?e, "command failed");
                self.console
                    .say(Tone::Error, &format!("\nUnexpected error: {:#}", e));
                Flow::Continue
            }
        }
    }

    fn dispatch(&mut self, command: ReplCommand) -> anyhow::Result<Flow> {
        match command {
            ReplCommand::Empty => {}
            ReplCommand::Quit => {
                self.console.say(Tone::Dim, "Goodbye! 👋");
                return Ok(Flow::Quit);
            }
            ReplCommand::Help => self.help(),
            ReplCommand::Persona(name) => self.persona(name.as_deref()),
            ReplCommand::Files => self.files()?,
            ReplCommand::Cd(path) => self.cd(&path),
            ReplCommand::Apps => self.apps(),
            ReplCommand::Read(path) => self.read(&path),
            ReplCommand::Write(path) => self.write(&path)?,
            ReplCommand::Debug => self.debug()?,
            ReplCommand::Unknown(name) => {
                self.console
                    .say(Tone::Error, &format!("Unknown command: /{}", name));
                self.console.say(
                    Tone::Dim,
                    "Available: /quit, /persona, /files, /cd, /apps, /read, /write, /debug, /help",
                );
            }
            ReplCommand::Request(text) => {
                self.request(&text);
            }
        }
        Ok(Flow::Continue)
    }

    fn request(&mut self, text: &str) -> RequestOutcome {
        let outcome = self
            .pipeline
            .process_request(&self.session, &mut self.console, text);
        tracing::debug!(state = %outcome.final_state(), "request finished");
        outcome
    }

    fn available_personas(&mut self) {
        let names = personas::keys().collect::<Vec<_>>().join(", ");
        self.console.say(Tone::Dim, &format!("Available: {}", names));
    }

    fn help(&mut self) {
        let rows: Vec<Vec<String>> = COMMANDS
            .iter()
            .map(|(usage, desc)| vec![usage.to_string(), desc.to_string()])
            .collect();
        self.console.table("Commands", &["Command", "Description"], &rows);
        self.console
            .say(Tone::Dim, "Anything else is sent to the assistant as a request.");
    }

    fn persona(&mut self, name: Option<&str>) {
        match name {
            None => {
                let current = self.session.active_persona();
                self.console
                    .say(Tone::Info, &format!("Current persona: {}", current));
            }
            Some(name) => match self.session.switch_persona(name) {
                Ok(()) => {
                    let active = self.session.active_persona();
                    self.console
                        .say(Tone::Success, &format!("✅ Switched to persona: {}", active));
                    return;
                }
                Err(e) => {
                    self.console.say(Tone::Error, &format!("❌ {}", capitalize_first(&e.to_string())));
                }
            },
        }
        self.available_personas();
    }

    fn files(&mut self) -> anyhow::Result<()> {
        let entries = files::list_dir(Path::new(".")).context("failed to list files")?;
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|entry| {
                let (icon, kind) = match entry.kind {
                    EntryKind::Directory => ("📁", "directory"),
                    EntryKind::File => ("📄", "file"),
                };
                vec![
                    format!("{} {}", icon, entry.name),
                    kind.to_string(),
                    files::format_size(entry),
                ]
            })
            .collect();
        self.console
            .table("📁 Current Directory Files", &["Name", "Type", "Size"], &rows);
        Ok(())
    }

    fn cd(&mut self, path: &str) {
        if path.is_empty() {
            self.console.say(Tone::Error, "Usage: /cd <path>");
            return;
        }
        match files::change_dir(path) {
            Ok(target) => self
                .console
                .say(Tone::Success, &format!("Changed to: {}", target.display())),
            Err(e) => self.console.say(Tone::Error, &e.to_string()),
        }
    }

    fn apps(&mut self) {
        let apps = files::list_apps(env::var_os("PATH"));
        let rows: Vec<Vec<String>> = apps
            .iter()
            .take(APP_DISPLAY_LIMIT)
            .map(|a| vec![a.clone()])
            .collect();
        self.console
            .table("🚀 Available Commands (from PATH)", &["Executable"], &rows);
        self.console.say(
            Tone::Dim,
            &format!(
                "Showing first {} of {} available commands",
                rows.len(),
                apps.len()
            ),
        );
    }

    fn read(&mut self, path: &str) {
        if path.is_empty() {
            self.console.say(Tone::Error, "Usage: /read <filename>");
            return;
        }
        match files::read_text(Path::new(path)) {
            Ok(content) => self.console.show_file(path, &content),
            Err(e) => self.console.say(Tone::Error, &e.to_string()),
        }
    }

    fn write(&mut self, path: &str) -> anyhow::Result<()> {
        if path.is_empty() {
            self.console.say(Tone::Error, "Usage: /write <filename>");
            return Ok(());
        }
        let target = Path::new(path);

        let mode = if target.exists() {
            let question = format!("File '{}' exists. Overwrite?", path);
            match self.console.confirm(&question, false) {
                Some(true) => WriteMode::Overwrite,
                Some(false) => match self.console.confirm("Append to file instead?", true) {
                    Some(true) => WriteMode::Append,
                    _ => {
                        self.console.say(Tone::Dim, "Write cancelled.");
                        return Ok(());
                    }
                },
                None => {
                    self.console.say(Tone::Dim, "Write cancelled.");
                    return Ok(());
                }
            }
        } else {
            WriteMode::Create
        };

        self.console.say(
            Tone::Success,
            &format!(
                "Enter content for '{}' (Ctrl+D to finish, Ctrl+C then Enter to cancel):",
                path
            ),
        );
        let Some(lines) = self.read_block(None, false)? else {
            self.console.say(Tone::Dim, "\nWrite cancelled.");
            return Ok(());
        };

        files::write_text(target, &lines.join("\n"), mode)
            .with_context(|| format!("failed to write '{}'", path))?;
        self.console
            .say(Tone::Success, &format!("Content {} '{}'", mode.verb(), path));
        Ok(())
    }

    fn debug(&mut self) -> anyhow::Result<()> {
        self.console.say(
            Tone::Warning,
            "🐛 Debug Mode - Describe your error or paste problematic code",
        );
        self.console
            .say(Tone::Dim, "Finish with an empty line or Ctrl+D; Ctrl+C then Enter cancels:");

        let Some(lines) = self.read_block(Some("debug> "), true)? else {
            self.console.say(Tone::Dim, "\nDebug cancelled.");
            return Ok(());
        };
        if lines.is_empty() {
            self.console.say(Tone::Dim, "No input provided.");
            return Ok(());
        }

        self.console.say(Tone::Info, "🔍 Analyzing debug information...");
        self.request(&debug_request(&lines.join("\n")));
        Ok(())
    }

    /// Lines up to end of input, or up to a blank line when `stop_on_blank`.
    /// `None` if Ctrl+C arrived meanwhile.
    fn read_block(
        &mut self,
        prompt: Option<&str>,
        stop_on_blank: bool,
    ) -> anyhow::Result<Option<Vec<String>>> {
        let interrupts = self.pipeline.interrupts().clone();
        let _phase = interrupts.enter(Phase::Input);
        let mut lines = Vec::new();
        loop {
            if let Some(prompt) = prompt {
                self.console.prompt(prompt);
            }
            let line = self.input.next_line().context("failed to read input")?;
            if interrupts.take() {
                tracing::debug!("multi-line input cancelled");
                return Ok(None);
            }
            match line {
                Some(line) if !(stop_on_blank && line.trim().is_empty()) => lines.push(line),
                _ => return Ok(Some(lines)),
            }
        }
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
