//! Idea domain module.
//!
//! The aggregate (ideas with votes, additions, and comments), the pure
//! badge classifier, the vote value object, and the requester-scoped public
//! projections.

pub mod aggregate;
pub mod badge;
pub mod errors;
pub mod view;
pub mod vote;

pub use aggregate::{Addition, Comment, Idea, MAX_TITLE_LENGTH};
pub use badge::Badge;
pub use errors::IdeaError;
pub use view::{IdeaSummary, IdeaView};
pub use vote::VoteValue;
