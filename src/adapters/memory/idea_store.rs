//! In-memory idea store adapter.
//!
//! Backs tests and local development. Every port call takes the write lock
//! exactly once, so each conditional mutation is atomic in the sense the
//! port requires: concurrent callers observe either the state before or
//! after a mutation, never a gap between predicate and write.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    AdditionId, DomainError, ErrorCode, IdeaId, UserId, VoterId,
};
use crate::domain::idea::{Addition, Comment, Idea, VoteValue};
use crate::ports::IdeaStore;

/// In-memory implementation of `IdeaStore`.
///
/// Insertion order is preserved, matching the listing contract.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdeaStore {
    ideas: Arc<RwLock<Vec<Idea>>>,
}

impl InMemoryIdeaStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            ideas: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Clear all stored ideas (useful for tests).
    pub async fn clear(&self) {
        self.ideas.write().await.clear();
    }

    /// Number of stored ideas.
    pub async fn len(&self) -> usize {
        self.ideas.read().await.len()
    }

    /// Whether the store holds no ideas.
    pub async fn is_empty(&self) -> bool {
        self.ideas.read().await.is_empty()
    }
}

#[async_trait]
impl IdeaStore for InMemoryIdeaStore {
    async fn insert(&self, idea: &Idea) -> Result<(), DomainError> {
        let mut ideas = self.ideas.write().await;
        if ideas.iter().any(|existing| existing.title() == idea.title()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateTitle,
                format!("An idea titled '{}' already exists", idea.title()),
            )
            .with_detail("title", idea.title()));
        }
        ideas.push(idea.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &IdeaId) -> Result<Option<Idea>, DomainError> {
        let ideas = self.ideas.read().await;
        Ok(ideas.iter().find(|idea| idea.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Idea>, DomainError> {
        Ok(self.ideas.read().await.clone())
    }

    async fn update_content(
        &self,
        id: &IdeaId,
        owner_claim: &UserId,
        summary: Option<String>,
        content: Option<String>,
    ) -> Result<(), DomainError> {
        let mut ideas = self.ideas.write().await;
        let idea = ideas
            .iter_mut()
            .find(|idea| idea.id() == id)
            .ok_or_else(|| not_found(ErrorCode::IdeaNotFound, id))?;

        if !idea.is_owned_by(owner_claim) {
            return Err(DomainError::new(
                ErrorCode::NotOwner,
                "Only the idea's owner may edit it",
            )
            .with_detail("idea_id", id.to_string())
            .with_detail("claimed_by", owner_claim.to_string()));
        }

        idea.update_content(summary, content);
        Ok(())
    }

    async fn apply_vote(
        &self,
        id: &IdeaId,
        voter: &VoterId,
        value: VoteValue,
    ) -> Result<(), DomainError> {
        let mut ideas = self.ideas.write().await;
        let idea = ideas
            .iter_mut()
            .find(|idea| idea.id() == id)
            .ok_or_else(|| not_found(ErrorCode::VoteTargetNotFound, id))?;

        // Same-direction re-votes fall through as no-op successes.
        idea.apply_vote(voter.clone(), value);
        Ok(())
    }

    async fn push_addition(&self, id: &IdeaId, addition: Addition) -> Result<(), DomainError> {
        let mut ideas = self.ideas.write().await;
        let idea = ideas
            .iter_mut()
            .find(|idea| idea.id() == id)
            .ok_or_else(|| not_found(ErrorCode::IdeaNotFound, id))?;

        idea.push_addition(addition);
        Ok(())
    }

    async fn push_comment(
        &self,
        id: &IdeaId,
        addition_id: &AdditionId,
        comment: Comment,
    ) -> Result<(), DomainError> {
        let mut ideas = self.ideas.write().await;
        let idea = ideas
            .iter_mut()
            .find(|idea| idea.id() == id)
            .ok_or_else(|| not_found(ErrorCode::IdeaNotFound, id))?;

        if !idea.push_comment(addition_id, comment) {
            return Err(DomainError::new(
                ErrorCode::AdditionNotFound,
                format!("Addition not found: {}", addition_id),
            )
            .with_detail("addition_id", addition_id.to_string()));
        }
        Ok(())
    }
}

fn not_found(code: ErrorCode, id: &IdeaId) -> DomainError {
    DomainError::new(code, format!("Idea not found: {}", id))
        .with_detail("idea_id", id.to_string())
}
