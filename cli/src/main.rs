//! CLI entrypoint for Campus Concierge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use concierge_application::{NoProgress, QueryService, SessionStore};
use concierge_infrastructure::{
    ConfigLoader, FileConfig, InMemorySessionStore, JsonlConversationLogger, OpenAiGateway,
    build_handler_registry,
};
use concierge_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, ProgressReporter, ReplConfig,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// How often idle sessions are swept in chat mode
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting Campus Concierge");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    if let Some(model) = &cli.model {
        override_models(&mut config, model);
    }

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("config error: {}", issue.message);
        } else {
            eprintln!("config warning: {}", issue.message);
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Configuration is invalid; fix the errors above and retry.");
    }

    let output = OutputConfig::resolve(cli.output, config.output.show_route, config.output.color);
    output.apply_color();

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiGateway::from_config(&config.providers.openai)?);
    let registry = build_handler_registry(Arc::clone(&gateway), &config);
    let store = Arc::new(InMemorySessionStore::new((&config.sessions).into()));

    let mut service = QueryService::new(gateway, registry, store, config.to_router_params());
    if let Some(path) = &cli.conversation_log {
        let logger = JsonlConversationLogger::open(path)
            .with_context(|| format!("opening conversation log {}", path.display()))?;
        service = service.with_conversation_logger(Arc::new(logger));
    }
    let service = Arc::new(service);

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_progress: config.repl.show_progress && !cli.quiet,
            history_file: config.repl.history_file.as_ref().map(PathBuf::from),
        };

        let sweeper = spawn_session_sweeper(Arc::clone(service.store()));

        let repl = ChatRepl::new(service)
            .with_session(cli.session)
            .with_format(output.format)
            .with_progress(repl_config.show_progress)
            .with_history_file(repl_config.resolved_history_file());

        let result = repl.run().await;
        sweeper.abort();
        result?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let answer = if cli.quiet || !config.repl.show_progress {
        service.answer(&cli.session, &question, &NoProgress).await
    } else {
        let progress = ProgressReporter::new();
        service.answer(&cli.session, &question, &progress).await
    };

    println!("{}", ConsoleFormatter::format(&answer, output.format));

    Ok(())
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over `-v`. With `--log-file`, output goes through a
/// non-blocking file writer whose guard must outlive `main`.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .context("--log-file must name a file")?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

/// `--model` applies to every role, including per-handler overrides.
fn override_models(config: &mut FileConfig, model: &str) {
    config.models.router = Some(model.to_string());
    config.models.synthesis = Some(model.to_string());
    config.models.handler = Some(model.to_string());
    for handler in config.handlers.values_mut() {
        handler.model = None;
    }
}

/// Periodically drop idle sessions while the REPL is open.
fn spawn_session_sweeper(store: Arc<InMemorySessionStore>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = store.evict_expired();
            if removed > 0 {
                info!(removed, remaining = store.len(), "Evicted idle sessions");
            }
        }
    })
}
