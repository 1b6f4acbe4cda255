//! AddAdditionHandler - appends an extension to an idea.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::foundation::{IdeaId, UserId, UserRef, VoterId};
use crate::domain::idea::{Addition, IdeaError, IdeaView};
use crate::ports::IdeaStore;

/// Command to append an addition. Any user may extend any idea.
#[derive(Debug, Clone)]
pub struct AddAdditionCommand {
    pub idea_id: IdeaId,
    pub contributor_id: UserId,
    pub category: String,
    pub content: Value,
    pub requester: VoterId,
}

/// Handler for appending additions.
pub struct AddAdditionHandler {
    store: Arc<dyn IdeaStore>,
}

impl AddAdditionHandler {
    pub fn new(store: Arc<dyn IdeaStore>) -> Self {
        Self { store }
    }

    /// Appends the addition and returns the refreshed public view.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the idea doesn't exist
    /// - `StoreUnavailable` on persistence failure
    pub async fn handle(&self, cmd: AddAdditionCommand) -> Result<IdeaView, IdeaError> {
        let addition = Addition::new(
            Some(UserRef::from_id(cmd.contributor_id)),
            cmd.category,
            cmd.content,
        );

        self.store.push_addition(&cmd.idea_id, addition).await?;

        let idea = self
            .store
            .find_by_id(&cmd.idea_id)
            .await?
            .ok_or(IdeaError::NotFound(cmd.idea_id))?;

        Ok(IdeaView::project(&idea, &cmd.requester))
    }
}
