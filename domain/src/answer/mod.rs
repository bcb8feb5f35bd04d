//! Answer value objects - what handlers produce and what the caller receives.
//!
//! - [`outcome::HandlerOutcome`] - one per dispatched domain, success or failure
//! - [`response::FinalResponse`] - the single merged answer

pub mod outcome;
pub mod response;
