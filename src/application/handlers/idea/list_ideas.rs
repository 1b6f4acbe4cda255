//! ListIdeasHandler - bulk listing in the reduced projection.

use std::sync::Arc;

use crate::domain::foundation::VoterId;
use crate::domain::idea::{IdeaError, IdeaSummary};
use crate::ports::IdeaStore;

/// Query for the full idea listing.
#[derive(Debug, Clone)]
pub struct ListIdeasQuery {
    pub requester: VoterId,
}

/// Handler for listing every idea.
pub struct ListIdeasHandler {
    store: Arc<dyn IdeaStore>,
}

impl ListIdeasHandler {
    pub fn new(store: Arc<dyn IdeaStore>) -> Self {
        Self { store }
    }

    /// Returns the list projection of every idea, store insertion order.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` on persistence failure
    pub async fn handle(&self, query: ListIdeasQuery) -> Result<Vec<IdeaSummary>, IdeaError> {
        let ideas = self.store.list().await?;
        Ok(ideas
            .iter()
            .map(|idea| IdeaSummary::project(idea, &query.requester))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryIdeaStore;
    use crate::domain::foundation::{UserId, UserRef};
    use crate::domain::idea::{Idea, VoteValue};

    fn voter(addr: &str) -> VoterId {
        VoterId::new(addr.to_string()).unwrap()
    }

    fn owner() -> UserRef {
        UserRef::new(UserId::new("u1".to_string()).unwrap(), "Ada")
    }

    #[tokio::test]
    async fn lists_in_insertion_order() {
        let store = Arc::new(InMemoryIdeaStore::new());
        for title in ["First", "Second", "Third"] {
            let idea = Idea::new(Some(owner()), title.to_string(), None, None).unwrap();
            store.insert(&idea).await.unwrap();
        }

        let handler = ListIdeasHandler::new(store);
        let summaries = handler
            .handle(ListIdeasQuery {
                requester: voter("10.0.0.1"),
            })
            .await
            .unwrap();

        let titles: Vec<&str> = summaries.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn summaries_are_scoped_to_the_requester() {
        let store = Arc::new(InMemoryIdeaStore::new());
        let idea = Idea::new(Some(owner()), "Solar Roads".to_string(), None, None).unwrap();
        let id = *idea.id();
        store.insert(&idea).await.unwrap();
        store
            .apply_vote(&id, &voter("10.0.0.1"), VoteValue::Down)
            .await
            .unwrap();

        let handler = ListIdeasHandler::new(store);

        let mine = handler
            .handle(ListIdeasQuery {
                requester: voter("10.0.0.1"),
            })
            .await
            .unwrap();
        assert_eq!(mine[0].your_vote, -1);
        assert_eq!(mine[0].votecount, -1);

        let theirs = handler
            .handle(ListIdeasQuery {
                requester: voter("9.9.9.9"),
            })
            .await
            .unwrap();
        assert_eq!(theirs[0].your_vote, 0);
    }

    #[tokio::test]
    async fn empty_store_yields_empty_list() {
        let handler = ListIdeasHandler::new(Arc::new(InMemoryIdeaStore::new()));
        let summaries = handler
            .handle(ListIdeasQuery {
                requester: voter("10.0.0.1"),
            })
            .await
            .unwrap();
        assert!(summaries.is_empty());
    }
}
