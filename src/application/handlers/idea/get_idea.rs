//! GetIdeaHandler - single-idea public view.

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, VoterId};
use crate::domain::idea::{IdeaError, IdeaView};
use crate::ports::IdeaStore;

/// Query for one idea's public view.
#[derive(Debug, Clone)]
pub struct GetIdeaQuery {
    pub idea_id: IdeaId,
    pub requester: VoterId,
}

/// Handler for fetching a single idea.
pub struct GetIdeaHandler {
    store: Arc<dyn IdeaStore>,
}

impl GetIdeaHandler {
    pub fn new(store: Arc<dyn IdeaStore>) -> Self {
        Self { store }
    }

    /// Returns the requester-scoped view of the idea.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the idea doesn't exist
    /// - `StoreUnavailable` on persistence failure
    pub async fn handle(&self, query: GetIdeaQuery) -> Result<IdeaView, IdeaError> {
        let idea = self
            .store
            .find_by_id(&query.idea_id)
            .await?
            .ok_or(IdeaError::NotFound(query.idea_id))?;

        Ok(IdeaView::project(&idea, &query.requester))
    }
}
