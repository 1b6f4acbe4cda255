//! Request-scoped extractors shared across routes.

pub mod identity;

pub use identity::{RequesterAddr, RequireUser};
