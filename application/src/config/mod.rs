//! Application-level configuration.
//!
//! - [`RouterParams`] — models, timeouts, fan-out and fallback texts for the routing pipeline

pub mod router_params;

pub use router_params::RouterParams;
