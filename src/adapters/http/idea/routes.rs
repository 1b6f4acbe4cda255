//! Route definitions for idea endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    add_addition, add_comment, create_idea, get_idea, list_ideas, update_idea, vote_idea,
    IdeaHandlers,
};

/// Builds the idea router; nest it under `/api/ideas`.
pub fn idea_routes(handlers: IdeaHandlers) -> Router {
    Router::new()
        .route("/", post(create_idea).get(list_ideas))
        .route("/:id", get(get_idea).patch(update_idea))
        .route("/:id/vote", post(vote_idea))
        .route("/:id/additions", post(add_addition))
        .route("/:id/additions/:addition_id/comments", post(add_comment))
        .with_state(handlers)
}
