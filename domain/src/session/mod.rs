//! Conversation session domain.
//!
//! - [`entities::Session`] — one conversation, keyed by an opaque id
//! - [`entities::Turn`] — a single immutable exchange entry within a session

pub mod entities;
