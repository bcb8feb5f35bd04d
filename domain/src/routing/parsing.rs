//! Decision parsing for router model replies.
//!
//! Pure domain logic: no I/O, just extraction of a domain list from
//! free-form model output. Every extracted token is validated against
//! [`DomainTag`]; unknown names are discarded, never passed through.
//!
//! # Accepted Formats
//!
//! | Priority | Format | Example |
//! |----------|--------|---------|
//! | 1 | JSON object with a `domains` field | `{"domains": ["curriculum", "locations"]}` |
//! | 2 | Triple-asterisk marker | `***curriculum,locations***` |

use super::tag::DomainTag;
use thiserror::Error;

const MARKER: &str = "***";

/// Why a reply did not yield a usable decision
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("no decision found in router reply")]
    NoDecision,

    #[error("router reply named no known domain (rejected: {})", rejected.join(", "))]
    NoValidDomains { rejected: Vec<String> },
}

/// Parse the domain list out of a router model reply.
///
/// Returns the valid tags in the order the model named them. Duplicates are
/// kept here; [`RoutingDecision::new`](super::decision::RoutingDecision::new)
/// removes them.
///
/// # Examples
///
/// ```
/// use concierge_domain::{DomainTag, parse_decision};
///
/// let tags = parse_decision(r#"{"domains": ["events"]}"#).unwrap();
/// assert_eq!(tags, vec![DomainTag::Events]);
///
/// let tags = parse_decision("Both apply. ***curriculum, locations***").unwrap();
/// assert_eq!(tags, vec![DomainTag::Curriculum, DomainTag::Locations]);
///
/// assert!(parse_decision("curriculum").is_err()); // no marker, no JSON
/// ```
pub fn parse_decision(response: &str) -> Result<Vec<DomainTag>, ParseFailure> {
    let tokens = extract_json_domains(response)
        .or_else(|| extract_marker_domains(response))
        .ok_or(ParseFailure::NoDecision)?;

    let mut valid = Vec::new();
    let mut rejected = Vec::new();
    for token in tokens {
        let cleaned = clean_token(&token);
        if cleaned.is_empty() {
            continue;
        }
        match cleaned.parse::<DomainTag>() {
            Ok(tag) => valid.push(tag),
            Err(_) => rejected.push(cleaned.to_string()),
        }
    }

    if valid.is_empty() {
        Err(ParseFailure::NoValidDomains { rejected })
    } else {
        Ok(valid)
    }
}

/// Look for `{"domains": [...]}` (or `{"domains": "a,b"}`) anywhere in the reply.
fn extract_json_domains(response: &str) -> Option<Vec<String>> {
    let start = response.find('{')?;
    let end = response[start..].rfind('}')?;
    let json_str = &response[start..start + end + 1];

    let parsed: serde_json::Value = serde_json::from_str(json_str).ok()?;
    match parsed.get("domains")? {
        serde_json::Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        ),
        serde_json::Value::String(list) => Some(split_list(list)),
        _ => None,
    }
}

/// Take the last complete `***...***` pair in the reply.
///
/// Models that reason before answering sometimes quote the format earlier in
/// the text; the final marker is the decision.
fn extract_marker_domains(response: &str) -> Option<Vec<String>> {
    let mut last = None;
    let mut rest = response;
    while let Some(open) = rest.find(MARKER) {
        let after_open = &rest[open + MARKER.len()..];
        let Some(close) = after_open.find(MARKER) else {
            break;
        };
        last = Some(&after_open[..close]);
        rest = &after_open[close + MARKER.len()..];
    }
    last.map(split_list)
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',').map(str::to_string).collect()
}

fn clean_token(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '`' | '.' | '*'))
}
