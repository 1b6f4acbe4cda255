//! Inbound HTTP adapters.

pub mod idea;
pub mod middleware;
