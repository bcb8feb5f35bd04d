//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use crate::cli::commands::OutputFormat;
use concierge_application::{
    DEFAULT_SESSION_ID, LlmGateway, NoProgress, QueryService, SessionStore,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// What the loop should do after a slash command
#[derive(Debug, Clone, PartialEq, Eq)]
enum CommandAction {
    Continue,
    SwitchSession(String),
    ShowHistory,
    Exit,
}

/// Interactive chat REPL
pub struct ChatRepl<G: LlmGateway + 'static, S: SessionStore + 'static> {
    service: Arc<QueryService<G, S>>,
    session_id: String,
    format: OutputFormat,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl<G: LlmGateway + 'static, S: SessionStore + 'static> ChatRepl<G, S> {
    /// Create a new ChatRepl
    pub fn new(service: Arc<QueryService<G, S>>) -> Self {
        Self {
            service,
            session_id: DEFAULT_SESSION_ID.to_string(),
            format: OutputFormat::Text,
            show_progress: true,
            history_file: None,
        }
    }

    /// Start in `session_id`
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Where readline history is persisted
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Run the interactive REPL
    pub async fn run(mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let prompt = format!("[{}] >>> ", self.session_id);
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if line.starts_with('/') {
                        match parse_command(line) {
                            CommandAction::Exit => {
                                println!("Bye!");
                                break;
                            }
                            CommandAction::SwitchSession(id) => {
                                debug!(from = %self.session_id, to = %id, "Switching session");
                                println!("Switched to session '{}'", id);
                                self.session_id = id;
                            }
                            CommandAction::ShowHistory => {
                                let history = self.service.history(&self.session_id).await;
                                println!();
                                println!(
                                    "{}",
                                    ConsoleFormatter::format_history(&self.session_id, &history)
                                );
                            }
                            CommandAction::Continue => {}
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Campus Concierge - Chat Mode         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("University: {}", self.service.params().university);
        println!("Session:    {}", self.session_id);
        println!();
        print_help();
    }

    async fn process_question(&self, question: &str) {
        println!();

        let answer = if self.show_progress {
            let progress = ProgressReporter::new();
            self.service
                .answer(&self.session_id, question, &progress)
                .await
        } else {
            self.service
                .answer(&self.session_id, question, &NoProgress)
                .await
        };

        println!("{}", ConsoleFormatter::format(&answer, self.format));
        println!();
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /help, /h, /?      - Show this help");
    println!("  /session <id>      - Switch conversation session");
    println!("  /history           - Show this session's turns");
    println!("  /quit, /exit, /q   - Exit chat");
    println!();
}

/// Interpret a slash command, printing help or errors inline.
fn parse_command(line: &str) -> CommandAction {
    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or_default();
    let arg = parts.next();

    match cmd {
        "/quit" | "/exit" | "/q" => CommandAction::Exit,
        "/help" | "/h" | "/?" => {
            println!();
            print_help();
            CommandAction::Continue
        }
        "/history" => CommandAction::ShowHistory,
        "/session" => match arg {
            Some(id) => CommandAction::SwitchSession(id.to_string()),
            None => {
                println!("Usage: /session <id>");
                CommandAction::Continue
            }
        },
        _ => {
            println!("Unknown command: {}", cmd);
            println!("Type /help for available commands");
            CommandAction::Continue
        }
    }
}
