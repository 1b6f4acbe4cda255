//! Idea store port.
//!
//! Defines the contract for durable keyed storage of idea documents.
//! Every mutating operation is an **atomic conditional update**: the
//! predicate and the mutation form one request to the underlying store,
//! with no read-then-write gap visible to concurrent writers.
//!
//! # Design
//!
//! - **Externally synchronized**: implementations carry the atomicity;
//!   callers issue no in-process locks of their own
//! - **Resolved owners**: reads return ideas with owner references already
//!   resolved to their displayable subset
//! - **Per-idea independence**: operations on different ideas never
//!   contend with each other

use async_trait::async_trait;

use crate::domain::foundation::{AdditionId, DomainError, IdeaId, UserId, VoterId};
use crate::domain::idea::{Addition, Comment, Idea, VoteValue};

/// Storage port for idea documents.
#[async_trait]
pub trait IdeaStore: Send + Sync {
    /// Insert a new idea, enforcing title uniqueness.
    ///
    /// # Errors
    ///
    /// - `DuplicateTitle` if another idea carries the same title
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, idea: &Idea) -> Result<(), DomainError>;

    /// Find an idea by its ID, owners resolved.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &IdeaId) -> Result<Option<Idea>, DomainError>;

    /// List every idea in stable insertion order.
    async fn list(&self) -> Result<Vec<Idea>, DomainError>;

    /// Owner-gated edit of summary and content, as one compound
    /// match-then-update.
    ///
    /// # Errors
    ///
    /// - `IdeaNotFound` if the idea doesn't exist
    /// - `NotOwner` if the stored owner differs from `owner_claim`
    /// - `DatabaseError` on persistence failure
    async fn update_content(
        &self,
        id: &IdeaId,
        owner_claim: &UserId,
        summary: Option<String>,
        content: Option<String>,
    ) -> Result<(), DomainError>;

    /// Apply a vote atomically under the deduplication predicate.
    ///
    /// Adds the voter to the chosen set and removes it from the opposite
    /// set, unless the voter already sits in the chosen set - in which case
    /// the call succeeds without changing anything.
    ///
    /// # Errors
    ///
    /// - `VoteTargetNotFound` if the idea doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn apply_vote(
        &self,
        id: &IdeaId,
        voter: &VoterId,
        value: VoteValue,
    ) -> Result<(), DomainError>;

    /// Append an addition to an idea.
    ///
    /// # Errors
    ///
    /// - `IdeaNotFound` if the idea doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn push_addition(&self, id: &IdeaId, addition: Addition) -> Result<(), DomainError>;

    /// Append a comment to the matching addition within an idea.
    ///
    /// # Errors
    ///
    /// - `IdeaNotFound` if the idea doesn't exist
    /// - `AdditionNotFound` if no addition in the idea matches
    /// - `DatabaseError` on persistence failure
    async fn push_comment(
        &self,
        id: &IdeaId,
        addition_id: &AdditionId,
        comment: Comment,
    ) -> Result<(), DomainError>;
}
