//! VoteIdeaHandler - applies a voter's choice to an idea.
//!
//! Returns the refreshed view of the voted idea only. The original platform
//! re-fetched the entire collection after a vote; that behavior looked like
//! a source inconsistency and was deliberately not carried over (callers
//! wanting the list re-fetch it through the list operation).

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, VoterId};
use crate::domain::idea::{IdeaError, IdeaView, VoteValue};
use crate::ports::IdeaStore;

/// Command carrying one vote as received from the wire.
#[derive(Debug, Clone)]
pub struct VoteIdeaCommand {
    pub idea_id: IdeaId,
    pub voter: VoterId,
    /// Raw wire value; validated before storage is touched.
    pub value: i64,
}

/// Handler for voting on an idea.
pub struct VoteIdeaHandler {
    store: Arc<dyn IdeaStore>,
}

impl VoteIdeaHandler {
    pub fn new(store: Arc<dyn IdeaStore>) -> Self {
        Self { store }
    }

    /// Validates the wire value, applies the vote atomically, and returns
    /// the refreshed public view for the voter.
    ///
    /// Re-issuing the same vote is a no-op success, per the deduplication
    /// predicate; the returned view reflects the unchanged state.
    ///
    /// # Errors
    ///
    /// - `InvalidVoteValue` for wire values other than +1 / -1
    /// - `VoteTargetNotFound` if the idea doesn't exist
    /// - `StoreUnavailable` on persistence failure
    pub async fn handle(&self, cmd: VoteIdeaCommand) -> Result<IdeaView, IdeaError> {
        let value =
            VoteValue::from_wire(cmd.value).map_err(|_| IdeaError::InvalidVoteValue(cmd.value))?;

        self.store.apply_vote(&cmd.idea_id, &cmd.voter, value).await?;

        tracing::debug!(idea_id = %cmd.idea_id, value = cmd.value, "vote applied");

        let idea = self
            .store
            .find_by_id(&cmd.idea_id)
            .await?
            .ok_or(IdeaError::VoteTargetNotFound(cmd.idea_id))?;

        Ok(IdeaView::project(&idea, &cmd.voter))
    }
}
