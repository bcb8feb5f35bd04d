//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — language models the router and handlers can talk to
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
