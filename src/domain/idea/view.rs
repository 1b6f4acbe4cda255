//! Requester-scoped public projections of an idea.
//!
//! The internal vote sets never leave the domain: projections expose only
//! the derived `votecount` and the requester's own vote. A list-shaped
//! summary omits the body and addition detail for bulk listings.

use serde::Serialize;

use crate::domain::foundation::{IdeaId, Timestamp, UserRef, VoterId};

use super::aggregate::{Addition, Idea};
use super::badge::Badge;

/// Full public view of a single idea, scoped to one requester.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdeaView {
    pub id: IdeaId,
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub additions: Vec<Addition>,
    pub owner: Option<UserRef>,
    pub votecount: i64,
    pub your_vote: i8,
    pub updated_at: Timestamp,
    pub badge: Badge,
}

impl IdeaView {
    /// Projects an idea into its public single-item view.
    pub fn project(idea: &Idea, requester: &VoterId) -> Self {
        Self {
            id: *idea.id(),
            title: idea.title().to_string(),
            summary: idea.summary().map(str::to_string),
            content: idea.content().map(str::to_string),
            additions: idea.additions().to_vec(),
            owner: idea.owner().cloned(),
            votecount: votecount(idea),
            your_vote: your_vote(idea, requester),
            updated_at: *idea.updated_at(),
            badge: Badge::classify(idea),
        }
    }
}

/// Reduced view for bulk idea listings.
///
/// Omits `content` and addition detail; additions contribute only a count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdeaSummary {
    pub id: IdeaId,
    pub title: String,
    pub summary: Option<String>,
    pub owner: Option<UserRef>,
    pub votecount: i64,
    pub your_vote: i8,
    pub addition_count: usize,
    pub updated_at: Timestamp,
    pub badge: Badge,
}

impl IdeaSummary {
    /// Projects an idea into its list-item view.
    pub fn project(idea: &Idea, requester: &VoterId) -> Self {
        Self {
            id: *idea.id(),
            title: idea.title().to_string(),
            summary: idea.summary().map(str::to_string),
            owner: idea.owner().cloned(),
            votecount: votecount(idea),
            your_vote: your_vote(idea, requester),
            addition_count: idea.additions().len(),
            updated_at: *idea.updated_at(),
            badge: Badge::classify(idea),
        }
    }
}

fn votecount(idea: &Idea) -> i64 {
    idea.upvote_count() as i64 - idea.downvote_count() as i64
}

/// The requester's active vote: +1, -1, or 0.
///
/// A voter present in both sets would indicate a store atomicity violation;
/// the upvote takes precedence rather than being repaired here.
fn your_vote(idea: &Idea, requester: &VoterId) -> i8 {
    if idea.has_upvote(requester) {
        1
    } else if idea.has_downvote(requester) {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{UserId, VoterId};
    use crate::domain::idea::aggregate::Comment;
    use crate::domain::idea::vote::VoteValue;

    fn owner(id: &str) -> UserRef {
        UserRef::new(UserId::new(id.to_string()).unwrap(), id.to_uppercase())
    }

    fn voter(addr: &str) -> VoterId {
        VoterId::new(addr.to_string()).unwrap()
    }

    fn test_idea() -> Idea {
        Idea::new(
            Some(owner("u1")),
            "Solar Roads".to_string(),
            Some("summary".to_string()),
            Some("content".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn votecount_is_upvotes_minus_downvotes() {
        let mut idea = test_idea();
        idea.apply_vote(voter("a"), VoteValue::Up);
        idea.apply_vote(voter("b"), VoteValue::Up);
        idea.apply_vote(voter("c"), VoteValue::Down);

        let view = IdeaView::project(&idea, &voter("z"));
        assert_eq!(view.votecount, 1);
    }

    #[test]
    fn your_vote_reflects_the_requester_only() {
        let mut idea = test_idea();
        idea.apply_vote(voter("10.0.0.1"), VoteValue::Down);

        assert_eq!(IdeaView::project(&idea, &voter("10.0.0.1")).your_vote, -1);
        assert_eq!(IdeaView::project(&idea, &voter("9.9.9.9")).your_vote, 0);
    }

    #[test]
    fn upvote_takes_precedence_when_both_sets_contain_the_requester() {
        // Unreachable through apply_vote; built via reconstitute to pin the
        // defensive behavior.
        let idea = Idea::reconstitute(
            IdeaId::new(),
            "Broken".to_string(),
            Some(owner("u1")),
            None,
            None,
            vec![voter("10.0.0.1")],
            vec![voter("10.0.0.1")],
            vec![],
            Timestamp::now(),
            Timestamp::now(),
        );

        assert_eq!(IdeaView::project(&idea, &voter("10.0.0.1")).your_vote, 1);
    }

    #[test]
    fn projection_never_leaks_raw_vote_lists() {
        let mut idea = test_idea();
        idea.apply_vote(voter("10.0.0.1"), VoteValue::Up);
        idea.push_addition(Addition::new(
            Some(owner("u2")),
            "ext".to_string(),
            serde_json::json!({}),
        ));
        let addition_id = *idea.additions()[0].id();
        idea.push_comment(&addition_id, Comment::new(Some(owner("u3")), "hi".to_string()));

        let json = serde_json::to_string(&IdeaView::project(&idea, &voter("10.0.0.1"))).unwrap();
        assert!(!json.contains("upvotes"));
        assert!(!json.contains("downvotes"));

        let json = serde_json::to_string(&IdeaSummary::project(&idea, &voter("10.0.0.1"))).unwrap();
        assert!(!json.contains("upvotes"));
        assert!(!json.contains("downvotes"));
    }

    #[test]
    fn summary_omits_content_and_addition_detail() {
        let mut idea = test_idea();
        idea.push_addition(Addition::new(
            Some(owner("u2")),
            "ext".to_string(),
            serde_json::json!({"secret": true}),
        ));

        let summary = IdeaSummary::project(&idea, &voter("z"));
        assert_eq!(summary.addition_count, 1);
        assert_eq!(summary.badge, Badge::Collaborative);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("\"content\""));
    }

    #[test]
    fn detail_view_carries_full_addition_tree() {
        let mut idea = test_idea();
        idea.push_addition(Addition::new(
            Some(owner("u2")),
            "ext".to_string(),
            serde_json::json!({"k": "v"}),
        ));
        let addition_id = *idea.additions()[0].id();
        idea.push_comment(&addition_id, Comment::new(Some(owner("u3")), "hi".to_string()));

        let view = IdeaView::project(&idea, &voter("z"));
        assert_eq!(view.additions.len(), 1);
        assert_eq!(view.additions[0].comments().len(), 1);
        assert_eq!(view.badge, Badge::Collaborative);
    }
}
