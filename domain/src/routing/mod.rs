//! Routing domain.
//!
//! - [`tag::DomainTag`] — the closed set of topical domains
//! - [`decision::RoutingDecision`] — the non-empty set of domains chosen for a query
//! - [`parsing`] — extraction of a decision from a router model reply
//! - [`keywords`] — deterministic keyword fallback

pub mod decision;
pub mod keywords;
pub mod parsing;
pub mod tag;
