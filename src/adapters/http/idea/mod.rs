//! HTTP surface for ideas.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, IdeaListResponse, IdeaResponse, IdeaSummaryResponse};
pub use handlers::IdeaHandlers;
pub use routes::idea_routes;
