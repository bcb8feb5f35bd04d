//! Prompt templates for the routing flow

use crate::routing::tag::DomainTag;
use crate::session::entities::Turn;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the router model
    pub fn classification_system(university: &str) -> String {
        format!(
            r#"You are a router for a {university} information system.
Your job is to analyze a user query and decide which specialized domains should answer it.
You never answer the query yourself."#
        )
    }

    /// User prompt for classification: domain list, recent history, query, reply format.
    pub fn classification_prompt(query: &str, history: &[Turn]) -> String {
        let mut prompt = String::from("The available domains are:\n");
        for tag in DomainTag::routable() {
            prompt.push_str(&format!("- {}: {}\n", tag.as_str(), tag.description()));
        }

        prompt.push_str("\nChat history:\n");
        prompt.push_str(&Self::format_history(history));

        prompt.push_str(&format!("\nUser query: {}\n", query));

        prompt.push_str(
            r#"
If the query needs information from more than one domain, list every relevant domain.
Reply with a single JSON object and nothing else, for example:
{"domains": ["curriculum"]}
{"domains": ["curriculum", "locations"]}

If you cannot produce JSON, end your reply with the domain list wrapped in triple
asterisks, for example ***curriculum*** or ***curriculum,locations***."#,
        );

        prompt
    }

    /// System prompt for merging several domain answers
    pub fn synthesis_system() -> &'static str {
        r#"You combine pieces of information into a single answer for a university visitor.
Write one coherent, conversational answer that addresses every aspect of the question.
Avoid redundancy. Never mention that the information came from different sources, agents or domains."#
    }

    /// User prompt for synthesis. Texts are given without any labels.
    pub fn synthesis_prompt(query: &str, texts: &[&str]) -> String {
        format!(
            r#"User query: {}

Information:
{}

Synthesize this information into a single response to the user query."#,
            query,
            texts.join("\n\n")
        )
    }

    /// Built-in system prompt for a domain handler
    pub fn handler_system(domain: DomainTag, university: &str) -> String {
        let focus = match domain {
            DomainTag::Curriculum => format!(
                "You help incoming students and applicants with curriculum questions.\n\
                 Provide accurate information about {university}'s courses, departments, majors and academic offerings."
            ),
            DomainTag::Locations => format!(
                "You help students and visitors navigate {university}'s campuses.\n\
                 Provide accurate information about buildings, libraries, dining locations, dorms and other facilities."
            ),
            DomainTag::Events => format!(
                "You help students learn about events happening at {university}.\n\
                 Provide accurate information about schedules, performances, games, talks and club meetings."
            ),
            DomainTag::General => format!(
                "You answer general questions about {university} for prospective and current students."
            ),
        };

        format!(
            "You are an AI assistant for {university}.\n{focus}\n\
             Always be informative, helpful, and concise.\n\
             When you don't know the answer, suggest consulting {university}'s official resources or the appropriate office."
        )
    }

    /// User prompt for a domain handler.
    ///
    /// `tools` are `(name, description)` pairs the handler may rely on; they
    /// are listed so the model knows what data sources back its answer.
    pub fn handler_prompt(query: &str, history: &[Turn], tools: &[(String, String)]) -> String {
        let mut prompt = String::new();

        if !tools.is_empty() {
            prompt.push_str("Available data sources:\n");
            for (name, description) in tools {
                prompt.push_str(&format!("- {}: {}\n", name, description));
            }
            prompt.push('\n');
        }

        if !history.is_empty() {
            prompt.push_str("Chat history:\n");
            prompt.push_str(&Self::format_history(history));
            prompt.push('\n');
        }

        prompt.push_str(&format!("Question: {}", query));
        prompt
    }

    /// Render turns as `role: text` lines, or `(none)`.
    pub fn format_history(history: &[Turn]) -> String {
        if history.is_empty() {
            return "(none)\n".to_string();
        }
        let mut out = String::new();
        for turn in history {
            out.push_str(&format!("{}: {}\n", turn.role.as_str(), turn.text));
        }
        out
    }
}
