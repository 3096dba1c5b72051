//! CLI adapter for toponym
//!
//! Reads a document and recognizer output from disk, runs the core
//! pipeline and prints the result. Depends on `core/`; nothing in
//! `core/` depends on this module.
//!
//! # Architecture
//!
//! ```text
//! +------------------+      +------------------+
//! |      cli/        | ---> |      core/       |
//! | (clap adapter)   |      |  (domain logic)  |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// toponym - context windows and canonical names for place mentions
///
/// Builds a word-bounded, entity-marked context window around every
/// location mention found by an entity recognizer, and merges spelling
/// variants of the same place under one canonical label.
#[derive(Parser, Debug)]
#[command(name = "toponym")]
#[command(version)]
#[command(about = "Context windows and canonical names for place mentions", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Log pipeline progress (info level) to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Window and canonicalize the mentions of one document
    Process(commands::ProcessArgs),

    /// Cluster spelling variants of place names
    Canonicalize(commands::CanonicalizeArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  toponym completions bash > ~/.local/share/bash-completion/completions/toponym
    ///   zsh:   toponym completions zsh > ~/.zfunc/_toponym
    ///   fish:  toponym completions fish > ~/.config/fish/completions/toponym.fish
    Completions(commands::CompletionsArgs),
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so that stdout only carries command output.
/// `RUST_LOG` wins over the `--verbose` default when set.
pub fn init_logging(verbose: bool, json: bool) {
    let default_directive = if verbose { "toponym=info" } else { "toponym=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed (tests, embedding)
    let result = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };

    if let Err(e) = result {
        tracing::debug!("Logging already initialized: {}", e);
    }
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::xdg::XdgDirs;

    // Handle completions command early (doesn't need configuration)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let xdg = XdgDirs::new();
    xdg.log_paths();

    // Load configuration
    let config = Config::load()?;
    config.log_config();

    // Execute command
    match cli.command {
        Commands::Process(args) => commands::process::execute(args, &config, cli.format),
        Commands::Canonicalize(args) => {
            commands::canonicalize::execute(args, &config, cli.format)
        }
        Commands::ShowConfig(args) => commands::config::execute(args, &config, &xdg, cli.format),
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
