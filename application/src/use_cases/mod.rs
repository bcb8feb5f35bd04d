//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod classify;
pub mod combine;
pub mod dispatch;
pub mod process_query;
pub mod route;

#[cfg(test)]
pub(crate) mod test_support;
