//! UpdateIdeaHandler - owner-gated edit of an idea's text fields.

use std::sync::Arc;

use crate::domain::foundation::{IdeaId, UserId, VoterId};
use crate::domain::idea::{IdeaError, IdeaView};
use crate::ports::IdeaStore;

/// Command to edit an idea's summary and content.
#[derive(Debug, Clone)]
pub struct UpdateIdeaCommand {
    pub idea_id: IdeaId,
    /// Claimed owner; the store verifies the claim atomically with the edit.
    pub owner_claim: UserId,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub requester: VoterId,
}

/// Handler for owner-gated idea edits.
pub struct UpdateIdeaHandler {
    store: Arc<dyn IdeaStore>,
}

impl UpdateIdeaHandler {
    pub fn new(store: Arc<dyn IdeaStore>) -> Self {
        Self { store }
    }

    /// Applies the edit and returns the refreshed public view.
    ///
    /// The owner check and the mutation are a single compound conditional
    /// update in the store; this handler never inspects ownership itself.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the idea doesn't exist
    /// - `NotOwner` if the claim doesn't match the stored owner
    /// - `StoreUnavailable` on persistence failure
    pub async fn handle(&self, cmd: UpdateIdeaCommand) -> Result<IdeaView, IdeaError> {
        self.store
            .update_content(&cmd.idea_id, &cmd.owner_claim, cmd.summary, cmd.content)
            .await?;

        let idea = self
            .store
            .find_by_id(&cmd.idea_id)
            .await?
            .ok_or(IdeaError::NotFound(cmd.idea_id))?;

        Ok(IdeaView::project(&idea, &cmd.requester))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryIdeaStore;
    use crate::domain::foundation::UserRef;
    use crate::domain::idea::Idea;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn requester() -> VoterId {
        VoterId::new("10.0.0.1".to_string()).unwrap()
    }

    async fn seeded_store() -> (Arc<InMemoryIdeaStore>, IdeaId) {
        let store = Arc::new(InMemoryIdeaStore::new());
        let idea = Idea::new(
            Some(UserRef::new(user("u1"), "Ada")),
            "Solar Roads".to_string(),
            Some("old summary".to_string()),
            Some("old content".to_string()),
        )
        .unwrap();
        let id = *idea.id();
        store.insert(&idea).await.unwrap();
        (store, id)
    }

    #[tokio::test]
    async fn owner_edit_succeeds_and_returns_refreshed_view() {
        let (store, id) = seeded_store().await;
        let handler = UpdateIdeaHandler::new(store);

        let view = handler
            .handle(UpdateIdeaCommand {
                idea_id: id,
                owner_claim: user("u1"),
                summary: Some("new summary".to_string()),
                content: Some("new content".to_string()),
                requester: requester(),
            })
            .await
            .unwrap();

        assert_eq!(view.summary.as_deref(), Some("new summary"));
        assert_eq!(view.content.as_deref(), Some("new content"));
    }

    #[tokio::test]
    async fn non_owner_claim_is_rejected_and_leaves_fields_unchanged() {
        let (store, id) = seeded_store().await;
        let handler = UpdateIdeaHandler::new(store.clone());

        let err = handler
            .handle(UpdateIdeaCommand {
                idea_id: id,
                owner_claim: user("u2"),
                summary: Some("hijacked".to_string()),
                content: None,
                requester: requester(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, IdeaError::NotOwner);
        let idea = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(idea.summary(), Some("old summary"));
        assert_eq!(idea.content(), Some("old content"));
    }

    #[tokio::test]
    async fn missing_idea_is_not_found() {
        let (store, _) = seeded_store().await;
        let handler = UpdateIdeaHandler::new(store);

        let missing = IdeaId::new();
        let err = handler
            .handle(UpdateIdeaCommand {
                idea_id: missing,
                owner_claim: user("u1"),
                summary: None,
                content: None,
                requester: requester(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, IdeaError::NotFound(missing));
    }
}
