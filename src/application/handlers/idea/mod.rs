//! Idea operation handlers.
//!
//! One command/query handler per exposed operation, each composing the
//! `IdeaStore` port with the pure domain helpers. Together they form the
//! aggregation service the HTTP adapter exposes.

mod add_addition;
mod add_comment;
mod create_idea;
mod get_idea;
mod list_ideas;
mod update_idea;
mod vote_idea;

pub use add_addition::{AddAdditionCommand, AddAdditionHandler};
pub use add_comment::{AddCommentCommand, AddCommentHandler};
pub use create_idea::{CreateIdeaCommand, CreateIdeaHandler};
pub use get_idea::{GetIdeaHandler, GetIdeaQuery};
pub use list_ideas::{ListIdeasHandler, ListIdeasQuery};
pub use update_idea::{UpdateIdeaCommand, UpdateIdeaHandler};
pub use vote_idea::{VoteIdeaCommand, VoteIdeaHandler};
