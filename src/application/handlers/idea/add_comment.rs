//! AddCommentHandler - appends a comment to an addition.

use std::sync::Arc;

use crate::domain::foundation::{AdditionId, IdeaId, UserId, UserRef, VoterId};
use crate::domain::idea::{Comment, IdeaError, IdeaView};
use crate::ports::IdeaStore;

/// Command to append a comment to a specific addition.
#[derive(Debug, Clone)]
pub struct AddCommentCommand {
    pub idea_id: IdeaId,
    pub addition_id: AdditionId,
    pub author_id: UserId,
    pub text: String,
    pub requester: VoterId,
}

/// Handler for appending comments.
pub struct AddCommentHandler {
    store: Arc<dyn IdeaStore>,
}

impl AddCommentHandler {
    pub fn new(store: Arc<dyn IdeaStore>) -> Self {
        Self { store }
    }

    /// Appends the comment and returns the refreshed public view.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the idea doesn't exist
    /// - `AdditionNotFound` if the addition id doesn't resolve within it
    /// - `StoreUnavailable` on persistence failure
    pub async fn handle(&self, cmd: AddCommentCommand) -> Result<IdeaView, IdeaError> {
        let comment = Comment::new(Some(UserRef::from_id(cmd.author_id)), cmd.text);

        self.store
            .push_comment(&cmd.idea_id, &cmd.addition_id, comment)
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
    use crate::domain::idea::{Addition, Idea};

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn requester() -> VoterId {
        VoterId::new("10.0.0.1".to_string()).unwrap()
    }

    async fn seeded() -> (Arc<InMemoryIdeaStore>, IdeaId, AdditionId) {
        let store = Arc::new(InMemoryIdeaStore::new());
        let mut idea = Idea::new(
            Some(UserRef::new(user("u1"), "Ada")),
            "Solar Roads".to_string(),
            None,
            None,
        )
        .unwrap();
        idea.push_addition(Addition::new(
            Some(UserRef::new(user("u2"), "Grace")),
            "extension".to_string(),
            serde_json::json!({}),
        ));
        let id = *idea.id();
        let addition_id = *idea.additions()[0].id();
        store.insert(&idea).await.unwrap();
        (store, id, addition_id)
    }

    #[tokio::test]
    async fn comment_lands_on_the_matching_addition() {
        let (store, id, addition_id) = seeded().await;
        let handler = AddCommentHandler::new(store);

        let view = handler
            .handle(AddCommentCommand {
                idea_id: id,
                addition_id,
                author_id: user("u3"),
                text: "great extension".to_string(),
                requester: requester(),
            })
            .await
            .unwrap();

        assert_eq!(view.additions[0].comments().len(), 1);
        assert_eq!(view.additions[0].comments()[0].text(), "great extension");
    }

    #[tokio::test]
    async fn unknown_addition_is_addition_not_found() {
        let (store, id, _) = seeded().await;
        let handler = AddCommentHandler::new(store.clone());

        let missing = AdditionId::new();
        let err = handler
            .handle(AddCommentCommand {
                idea_id: id,
                addition_id: missing,
                author_id: user("u3"),
                text: "lost".to_string(),
                requester: requester(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, IdeaError::AdditionNotFound(missing));

        let idea = store.find_by_id(&id).await.unwrap().unwrap();
        assert!(idea.additions()[0].comments().is_empty());
    }

    #[tokio::test]
    async fn unknown_idea_is_not_found() {
        let (store, _, addition_id) = seeded().await;
        let handler = AddCommentHandler::new(store);

        let missing = IdeaId::new();
        let err = handler
            .handle(AddCommentCommand {
                idea_id: missing,
                addition_id,
                author_id: user("u3"),
                text: "lost".to_string(),
                requester: requester(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, IdeaError::NotFound(missing));
    }
}
