//! Prompt domain
//!
//! Templates for the router, synthesis and domain-handler requests.

mod template;

pub use template::PromptTemplate;
