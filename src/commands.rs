use crate::config::{save_config, Config, Provider};
use crate::error::ConfigError;
use crate::executor::ShellRunner;
use crate::interrupt::Interrupts;
use crate::llm::client_from_config;
use crate::personas;
use crate::pipeline::{Pipeline, RequestOutcome};
use crate::prompt::Prompt;
use crate::repl::{Repl, StdinSource};
use crate::session::Session;
use crate::ui::{print_banner, Console, TerminalConsole, Tone};
use anyhow::Context;
use std::{env, io::Write, path::Path, process::Command};

/// Command-line settings that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub persona: Option<String>,
    pub model: Option<String>,
    pub provider: Option<Provider>,
}

pub fn apply_overrides(config: &mut Config, overrides: &Overrides) {
    if let Some(provider) = overrides.provider {
        if provider != config.llm.provider {
            // endpoint and model defaults belong to the old provider
            config.llm.endpoint = None;
            config.llm.model = None;
        }
        config.llm.provider = provider;
    }
    if let Some(model) = &overrides.model {
        config.llm.model = Some(model.clone());
    }
    if let Some(persona) = &overrides.persona {
        config.behavior.default_persona = persona.clone();
    }
}

/// Validate configuration and build everything a session needs. Any error
/// here is fatal.
pub fn startup(config: &Config, interrupts: &Interrupts) -> Result<(Pipeline, Session), ConfigError> {
    config.validate()?;
    let session = Session::with_persona(&config.behavior.default_persona)?;
    let model = client_from_config(&config.llm)?;
    tracing::info!(
        provider = ?config.llm.provider,
        model = config.llm.model(),
        persona = session.active_persona(),
        "assistant ready"
    );
    let pipeline = Pipeline::new(model, Box::new(ShellRunner), interrupts.clone());
    Ok((pipeline, session))
}

pub fn cmd_repl(config: &Config) -> anyhow::Result<()> {
    print_banner();

    let interrupts = Interrupts::new();
    let (pipeline, session) = startup(config, &interrupts)?;
    interrupts
        .install(|| {
            println!("\nGoodbye! 👋");
            std::process::exit(0);
        })
        .context("failed to install Ctrl+C handler")?;

    let mut console = TerminalConsole::new();
    console.say(
        Tone::Success,
        &format!(
            "✅ Connected with persona: {} ({})",
            session.active_persona(),
            pipeline.model().model()
        ),
    );
    console.say(
        Tone::Dim,
        "Type your requests or use slash commands. Type '/quit' to exit.\n",
    );

    Repl::new(pipeline, session, console, StdinSource).run()
}

/// Run a single request. Returns `false` when it was aborted.
pub fn cmd_ask(config: &Config, query: &str) -> anyhow::Result<bool> {
    let interrupts = Interrupts::new();
    let (pipeline, session) = startup(config, &interrupts)?;
    interrupts
        .install(|| std::process::exit(130))
        .context("failed to install Ctrl+C handler")?;

    let mut console = TerminalConsole::new();
    let outcome = pipeline.process_request(&session, &mut console, query);
    Ok(!matches!(outcome, RequestOutcome::Aborted(_)))
}

pub fn cmd_personas() {
    for name in personas::keys() {
        println!("{}", name);
    }
}

pub fn cmd_doctor(config: &Config, config_path: &Path) -> anyhow::Result<()> {
    println!("diagnostics:");
    println!();

    print!("  config ... ");
    if config_path.exists() {
        println!("ok ({})", config_path.display());
    } else {
        println!("using defaults");
    }

    print!("  persona ({}) ... ", config.behavior.default_persona);
    match config.validate() {
        Ok(()) => println!("ok"),
        Err(e) => println!("failed\n    error: {}", e),
    }

    print!("  credential ({}) ... ", config.llm.api_key_env);
    match (config.llm.provider, config.llm.api_key()) {
        (Provider::Ollama, _) => println!("not needed"),
        (Provider::Groq, Ok(_)) => println!("ok"),
        (Provider::Groq, Err(_)) => {
            println!("missing");
            println!("    try: export {}=your_key_here", config.llm.api_key_env);
            println!();
            return Ok(());
        }
    }

    let client = client_from_config(&config.llm)?;

    print!("  provider ({}) ... ", config.llm.endpoint());
    std::io::stdout().flush().ok();
    if client.is_available() {
        println!("ok");
    } else {
        println!("failed");
        if config.llm.provider == Provider::Ollama {
            println!("    try: ollama serve");
        }
    }

    print!("  model ({}) ... ", client.model());
    std::io::stdout().flush().ok();
    let probe = Prompt {
        system: "Reply with the single word ok.".to_string(),
        human: "ok?".to_string(),
    };
    match client.complete(&probe) {
        Ok(_) => println!("ok"),
        Err(e) => {
            println!("failed");
            println!("    error: {}", e);
        }
    }

    println!();
    Ok(())
}

pub fn cmd_config(config_path: &Path) -> anyhow::Result<()> {
    if !config_path.exists() {
        save_config(&Config::default(), config_path)?;
    }

    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    Command::new(&editor)
        .arg(config_path)
        .status()
        .with_context(|| format!("failed to launch {}", editor))?;

    Ok(())
}
