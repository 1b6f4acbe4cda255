//! CreateIdeaHandler - command handler for submitting a new idea.

use std::sync::Arc;

use crate::domain::foundation::{UserId, UserRef, VoterId};
use crate::domain::idea::{Idea, IdeaError, IdeaView};
use crate::ports::IdeaStore;

/// Command to create a new idea.
#[derive(Debug, Clone)]
pub struct CreateIdeaCommand {
    pub owner_id: UserId,
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    /// Requester-derived vote key; used only to scope the returned view.
    pub requester: VoterId,
}

/// Handler for idea creation.
pub struct CreateIdeaHandler {
    store: Arc<dyn IdeaStore>,
}

impl CreateIdeaHandler {
    pub fn new(store: Arc<dyn IdeaStore>) -> Self {
        Self { store }
    }

    /// Creates the idea and returns its public view for the creator.
    ///
    /// A fresh idea has no votes and no additions, so the view always shows
    /// `votecount = 0`, `your_vote = 0`, and badge level 1.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is invalid
    /// - `DuplicateTitle` if the title is already taken
    /// - `StoreUnavailable` on persistence failure
    pub async fn handle(&self, cmd: CreateIdeaCommand) -> Result<IdeaView, IdeaError> {
        let idea = Idea::new(
            Some(UserRef::from_id(cmd.owner_id)),
            cmd.title,
            cmd.summary,
            cmd.content,
        )
        .map_err(|e| IdeaError::validation("title", e.to_string()))?;

        self.store.insert(&idea).await?;

        tracing::info!(idea_id = %idea.id(), title = idea.title(), "idea created");
        Ok(IdeaView::project(&idea, &cmd.requester))
    }
}
