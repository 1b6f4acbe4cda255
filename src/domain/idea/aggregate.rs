//! Idea aggregate entity.
//!
//! Ideas are the root content item of the platform: users submit them, vote
//! on them, and extend them with additions that carry nested comments.
//!
//! # Ownership
//!
//! Ideas reference users, they do not own them. Owner fields hold the
//! denormalized `UserRef` the store resolves on read; an unresolved owner is
//! represented as `None` and tolerated everywhere.
//!
//! # Invariants
//!
//! - `title` is non-empty and unique across ideas (uniqueness enforced by
//!   the store)
//! - a voter identifier appears in at most one of `upvotes` / `downvotes`
//! - `additions` and each addition's `comments` are append-only
//! - `updated_at` moves forward on every mutation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{
    AdditionId, CommentId, IdeaId, Timestamp, UserRef, ValidationError, VoterId,
};

use super::vote::VoteValue;

/// Maximum length for an idea title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Idea aggregate - a submitted idea with votes and threaded additions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    /// Unique identifier, assigned at creation, immutable.
    id: IdeaId,

    /// Unique title across all ideas.
    title: String,

    /// Resolved owner reference; immutable after creation.
    owner: Option<UserRef>,

    /// Short mutable description, editable only by the owner.
    summary: Option<String>,

    /// Long mutable body, editable only by the owner.
    content: Option<String>,

    /// Voter identifiers that voted up, in arrival order.
    upvotes: Vec<VoterId>,

    /// Voter identifiers that voted down, in arrival order.
    downvotes: Vec<VoterId>,

    /// Append-only extension list.
    additions: Vec<Addition>,

    /// When the idea was created.
    created_at: Timestamp,

    /// When the idea last changed.
    updated_at: Timestamp,
}

impl Idea {
    /// Create a new idea with no votes and no additions.
    ///
    /// # Errors
    ///
    /// - `EmptyField` / `TooLong` if the title is invalid
    pub fn new(
        owner: Option<UserRef>,
        title: String,
        summary: Option<String>,
        content: Option<String>,
    ) -> Result<Self, ValidationError> {
        Self::validate_title(&title)?;

        let now = Timestamp::now();
        Ok(Self {
            id: IdeaId::new(),
            title,
            owner,
            summary,
            content,
            upvotes: Vec::new(),
            downvotes: Vec::new(),
            additions: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an idea from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: IdeaId,
        title: String,
        owner: Option<UserRef>,
        summary: Option<String>,
        content: Option<String>,
        upvotes: Vec<VoterId>,
        downvotes: Vec<VoterId>,
        additions: Vec<Addition>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            owner,
            summary,
            content,
            upvotes,
            downvotes,
            additions,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the idea ID.
    pub fn id(&self) -> &IdeaId {
        &self.id
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the resolved owner reference, if any.
    pub fn owner(&self) -> Option<&UserRef> {
        self.owner.as_ref()
    }

    /// Returns the summary.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Returns the content body.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the additions in append order.
    pub fn additions(&self) -> &[Addition] {
        &self.additions
    }

    /// Returns the number of upvotes.
    pub fn upvote_count(&self) -> usize {
        self.upvotes.len()
    }

    /// Returns the number of downvotes.
    pub fn downvote_count(&self) -> usize {
        self.downvotes.len()
    }

    /// Checks whether the given voter has an active upvote.
    pub fn has_upvote(&self, voter: &VoterId) -> bool {
        self.upvotes.contains(voter)
    }

    /// Checks whether the given voter has an active downvote.
    pub fn has_downvote(&self, voter: &VoterId) -> bool {
        self.downvotes.contains(voter)
    }

    /// Returns when the idea was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the idea last changed.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Checks if the given user id matches the resolved owner.
    ///
    /// An unresolved owner matches nobody.
    pub fn is_owned_by(&self, user_id: &crate::domain::foundation::UserId) -> bool {
        self.owner
            .as_ref()
            .map(|owner| &owner.id == user_id)
            .unwrap_or(false)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a vote, enforcing at-most-one active vote per voter.
    ///
    /// Adds the voter to the chosen set and removes it from the opposite
    /// set, unless the voter is already in the chosen set - re-voting the
    /// same direction is a deliberate no-op, never a toggle-off. Returns
    /// whether state changed.
    pub fn apply_vote(&mut self, voter: VoterId, value: VoteValue) -> bool {
        let (chosen, opposite) = match value {
            VoteValue::Up => (&mut self.upvotes, &mut self.downvotes),
            VoteValue::Down => (&mut self.downvotes, &mut self.upvotes),
        };

        if chosen.contains(&voter) {
            return false;
        }

        opposite.retain(|v| v != &voter);
        chosen.push(voter);
        self.updated_at = Timestamp::now();
        true
    }

    /// Replace the owner-editable text fields.
    ///
    /// The owner gate lives in the store contract; this method only applies
    /// the already-authorized edit.
    pub fn update_content(&mut self, summary: Option<String>, content: Option<String>) {
        self.summary = summary;
        self.content = content;
        self.updated_at = Timestamp::now();
    }

    /// Append an addition. Additions are never removed or reordered.
    pub fn push_addition(&mut self, addition: Addition) {
        self.additions.push(addition);
        self.updated_at = Timestamp::now();
    }

    /// Append a comment to the addition with the given id.
    ///
    /// Returns `false` when no addition matches; the idea is left untouched.
    pub fn push_comment(&mut self, addition_id: &AdditionId, comment: Comment) -> bool {
        match self.additions.iter_mut().find(|a| a.id() == addition_id) {
            Some(addition) => {
                addition.comments.push(comment);
                self.updated_at = Timestamp::now();
                true
            }
            None => false,
        }
    }

    fn validate_title(title: &str) -> Result<(), ValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if trimmed.len() > MAX_TITLE_LENGTH {
            return Err(ValidationError::too_long("title", MAX_TITLE_LENGTH));
        }
        Ok(())
    }
}

/// A sub-contribution attached to an idea, authored by any user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addition {
    id: AdditionId,
    /// Resolved contributor reference; may differ from the idea's owner.
    owner: Option<UserRef>,
    /// Free-form classification.
    category: String,
    /// Opaque structured payload.
    content: Value,
    /// Append-only comment thread.
    comments: Vec<Comment>,
}

impl Addition {
    /// Creates a new addition with an empty comment thread.
    pub fn new(owner: Option<UserRef>, category: String, content: Value) -> Self {
        Self {
            id: AdditionId::new(),
            owner,
            category,
            content,
            comments: Vec::new(),
        }
    }

    /// Reconstitute an addition from persistence.
    pub fn reconstitute(
        id: AdditionId,
        owner: Option<UserRef>,
        category: String,
        content: Value,
        comments: Vec<Comment>,
    ) -> Self {
        Self {
            id,
            owner,
            category,
            content,
            comments,
        }
    }

    /// Returns the addition ID.
    pub fn id(&self) -> &AdditionId {
        &self.id
    }

    /// Returns the resolved contributor, if any.
    pub fn owner(&self) -> Option<&UserRef> {
        self.owner.as_ref()
    }

    /// Returns the category label.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the structured payload.
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Returns the comments in append order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }
}

/// Text attached to a specific addition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    owner: Option<UserRef>,
    comment: String,
}

impl Comment {
    /// Creates a new comment.
    pub fn new(owner: Option<UserRef>, comment: String) -> Self {
        Self {
            id: CommentId::new(),
            owner,
            comment,
        }
    }

    /// Reconstitute a comment from persistence.
    pub fn reconstitute(id: CommentId, owner: Option<UserRef>, comment: String) -> Self {
        Self { id, owner, comment }
    }

    /// Returns the comment ID.
    pub fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the resolved author, if any.
    pub fn owner(&self) -> Option<&UserRef> {
        self.owner.as_ref()
    }

    /// Returns the comment text.
    pub fn text(&self) -> &str {
        &self.comment
    }
}
