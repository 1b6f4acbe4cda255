//! Foundation value objects shared by every domain module.
//!
//! Identifiers, timestamps, and the error vocabulary. Nothing in here knows
//! about ideas, votes, or persistence.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AdditionId, CommentId, IdeaId, UserId, UserRef, VoterId};
pub use timestamp::Timestamp;
