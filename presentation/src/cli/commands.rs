//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain answer text
    #[default]
    Text,
    /// Answer text followed by the domains that produced it
    Route,
    /// JSON with the routing decision, handler outcomes and answer
    Json,
}

/// CLI arguments for campus-concierge
#[derive(Parser, Debug)]
#[command(name = "campus-concierge")]
#[command(author, version, about = "Ask questions about a university; answers are routed to domain experts")]
#[command(long_about = r#"
Campus Concierge answers questions about a university by routing each query to
one or more domain handlers and merging their answers.

Each query goes through three steps:
1. Classify: a router model picks the domains (curriculum, locations, events)
2. Dispatch: every chosen domain handler answers concurrently
3. Combine: one answer is passed through, several are merged into one

Configuration files are loaded from (in priority order):
1. CONCIERGE_* environment variables (e.g. CONCIERGE_ROUTER__DEFAULT_DOMAIN=events)
2. --config <path>         Explicit config file
3. ./concierge.toml        Project-level config
4. ~/.config/campus-concierge/config.toml   Global config

Example:
  campus-concierge "What courses does the CS department offer?"
  campus-concierge --output route "Where is Perkins Library and when does it close?"
  campus-concierge --chat --session alice
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Conversation session id; turns are remembered per session
    #[arg(short, long, value_name = "ID", default_value = "default")]
    pub session: String,

    /// Model for every role (router, synthesis and handlers), overriding config
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append routing events as JSON lines to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}
