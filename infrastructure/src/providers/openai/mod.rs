//! OpenAI-compatible chat completion provider
//!
//! Talks to any server implementing `/v1/chat/completions`: OpenAI itself,
//! Azure-style proxies, or local servers such as Ollama and LM Studio.

mod gateway;
mod session;
mod types;

pub use gateway::OpenAiGateway;
pub use session::OpenAiSession;
