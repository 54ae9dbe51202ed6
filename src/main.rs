use clap::{Parser, Subcommand};
use groq_cli::commands::{self, Overrides};
use groq_cli::config::{get_config_path, load_config, Provider};
use groq_cli::error::ConfigError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "groq-cli", version, about = "AI command assistant for your shell")]
struct Cli {
    /// Persona to start with (linux, windows, macos, devops, developer, security)
    #[arg(short, long, global = true)]
    persona: Option<String>,

    /// Model name, overriding the config file
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Model provider: groq or ollama
    #[arg(long, global = true)]
    provider: Option<Provider>,

    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Suggest and optionally run a single command, then exit
    Ask {
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },
    /// Check configuration and provider connectivity
    Doctor,
    /// Open the config file in $EDITOR
    Config,
    /// List available personas
    Personas,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(get_config_path);
    let mut config = load_config(&config_path);
    commands::apply_overrides(
        &mut config,
        &Overrides {
            persona: cli.persona,
            model: cli.model,
            provider: cli.provider,
        },
    );

    let result = match cli.command {
        None => commands::cmd_repl(&config),
        Some(CliCommand::Ask { query }) => match commands::cmd_ask(&config, &query.join(" ")) {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(e) => Err(e),
        },
        Some(CliCommand::Doctor) => commands::cmd_doctor(&config, &config_path),
        Some(CliCommand::Config) => commands::cmd_config(&config_path),
        Some(CliCommand::Personas) => {
            commands::cmd_personas();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        if let Some(ConfigError::MissingCredential { var }) = e.downcast_ref::<ConfigError>() {
            eprintln!("Set your API key: export {}=your_key_here", var);
        }
        std::process::exit(1);
    }
}
