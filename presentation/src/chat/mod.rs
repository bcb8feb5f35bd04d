//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface with per-session memory.

mod repl;

pub use repl::ChatRepl;
