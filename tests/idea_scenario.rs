//! End-to-end scenario walking an idea through its whole lifecycle:
//! creation, voting from several addresses, collaborative additions,
//! comments, and the requester-scoped projections after each step.

use std::sync::Arc;

use ideabank::adapters::memory::InMemoryIdeaStore;
use ideabank::application::handlers::idea::{
    AddAdditionCommand, AddAdditionHandler, AddCommentCommand, AddCommentHandler,
    CreateIdeaCommand, CreateIdeaHandler, GetIdeaHandler, GetIdeaQuery, ListIdeasHandler,
    ListIdeasQuery, UpdateIdeaCommand, UpdateIdeaHandler, VoteIdeaCommand, VoteIdeaHandler,
};
use ideabank::domain::foundation::{UserId, VoterId};
use ideabank::domain::idea::IdeaError;
use ideabank::ports::IdeaStore;

use serde_json::json;

struct Fixture {
    create: CreateIdeaHandler,
    update: UpdateIdeaHandler,
    get: GetIdeaHandler,
    list: ListIdeasHandler,
    vote: VoteIdeaHandler,
    add_addition: AddAdditionHandler,
    add_comment: AddCommentHandler,
}

impl Fixture {
    fn new() -> Self {
        let store: Arc<dyn IdeaStore> = Arc::new(InMemoryIdeaStore::new());
        Self {
            create: CreateIdeaHandler::new(store.clone()),
            update: UpdateIdeaHandler::new(store.clone()),
            get: GetIdeaHandler::new(store.clone()),
            list: ListIdeasHandler::new(store.clone()),
            vote: VoteIdeaHandler::new(store.clone()),
            add_addition: AddAdditionHandler::new(store.clone()),
            add_comment: AddCommentHandler::new(store),
        }
    }
}

fn user(id: &str) -> UserId {
    UserId::new(id.to_string()).expect("valid user id")
}

fn voter(addr: &str) -> VoterId {
    VoterId::new(addr.to_string()).expect("valid voter id")
}

#[tokio::test]
async fn solar_roads_lifecycle() {
    let fx = Fixture::new();

    // U1 submits the idea.
    let created = fx
        .create
        .handle(CreateIdeaCommand {
            owner_id: user("u1"),
            title: "Solar Roads".to_string(),
            summary: Some("Pave highways with photovoltaic panels".to_string()),
            content: Some("Panels double as road surface and generator.".to_string()),
            requester: voter("10.0.0.1"),
        })
        .await
        .expect("create succeeds");

    assert_eq!(created.title, "Solar Roads");
    assert_eq!(created.votecount, 0);
    assert_eq!(created.your_vote, 0);
    assert_eq!(created.badge.level(), 1);
    let idea_id = created.id;

    // First upvote from 10.0.0.1.
    let after_up = fx
        .vote
        .handle(VoteIdeaCommand {
            idea_id,
            voter: voter("10.0.0.1"),
            value: 1,
        })
        .await
        .expect("vote succeeds");
    assert_eq!(after_up.votecount, 1);
    assert_eq!(after_up.your_vote, 1);

    // Repeating the same vote changes nothing.
    let repeat = fx
        .vote
        .handle(VoteIdeaCommand {
            idea_id,
            voter: voter("10.0.0.1"),
            value: 1,
        })
        .await
        .expect("repeat vote succeeds");
    assert_eq!(repeat.votecount, 1);

    // A second address downvotes; counts are signed sums.
    let after_down = fx
        .vote
        .handle(VoteIdeaCommand {
            idea_id,
            voter: voter("10.0.0.2"),
            value: -1,
        })
        .await
        .expect("downvote succeeds");
    assert_eq!(after_down.votecount, 0);
    assert_eq!(after_down.your_vote, -1);

    // U2 contributes an addition; the idea becomes collaborative.
    let extended = fx
        .add_addition
        .handle(AddAdditionCommand {
            idea_id,
            contributor_id: user("u2"),
            category: "engineering".to_string(),
            content: json!({"note": "Use tempered glass rated for truck axle loads"}),
            requester: voter("10.0.0.1"),
        })
        .await
        .expect("addition succeeds");
    assert_eq!(extended.badge.level(), 3);
    assert_eq!(extended.additions.len(), 1);
    // Votes are untouched by the append.
    assert_eq!(extended.votecount, 0);

    // U1 comments on U2's addition.
    let addition_id = *extended.additions[0].id();
    let commented = fx
        .add_comment
        .handle(AddCommentCommand {
            idea_id,
            addition_id,
            author_id: user("u1"),
            text: "Axle load rating is the hard part".to_string(),
            requester: voter("10.0.0.1"),
        })
        .await
        .expect("comment succeeds");
    assert_eq!(commented.additions[0].comments().len(), 1);

    // 10.0.0.1 flips to a downvote: leaves up, enters down.
    let flipped = fx
        .vote
        .handle(VoteIdeaCommand {
            idea_id,
            voter: voter("10.0.0.1"),
            value: -1,
        })
        .await
        .expect("flip succeeds");
    assert_eq!(flipped.votecount, -2);
    assert_eq!(flipped.your_vote, -1);

    // A requester who never voted sees a neutral view.
    let neutral = fx
        .get
        .handle(GetIdeaQuery {
            idea_id,
            requester: voter("9.9.9.9"),
        })
        .await
        .expect("get succeeds");
    assert_eq!(neutral.your_vote, 0);
    assert_eq!(neutral.votecount, -2);
    assert_eq!(neutral.badge.level(), 3);
}

#[tokio::test]
async fn owner_gate_and_listing() {
    let fx = Fixture::new();

    let first = fx
        .create
        .handle(CreateIdeaCommand {
            owner_id: user("u1"),
            title: "Tidal Batteries".to_string(),
            summary: None,
            content: None,
            requester: voter("10.0.0.1"),
        })
        .await
        .expect("create succeeds");

    fx.create
        .handle(CreateIdeaCommand {
            owner_id: user("u2"),
            title: "Kelp Carbon Sinks".to_string(),
            summary: Some("Offshore kelp farms".to_string()),
            content: None,
            requester: voter("10.0.0.1"),
        })
        .await
        .expect("second create succeeds");

    // A non-owner cannot edit.
    let denied = fx
        .update
        .handle(UpdateIdeaCommand {
            idea_id: first.id,
            owner_claim: user("u2"),
            summary: Some("hijacked".to_string()),
            content: None,
            requester: voter("10.0.0.1"),
        })
        .await;
    assert_eq!(denied, Err(IdeaError::NotOwner));

    // The owner can.
    let updated = fx
        .update
        .handle(UpdateIdeaCommand {
            idea_id: first.id,
            owner_claim: user("u1"),
            summary: Some("Store tidal energy in flow batteries".to_string()),
            content: None,
            requester: voter("10.0.0.1"),
        })
        .await
        .expect("owner update succeeds");
    assert_eq!(
        updated.summary.as_deref(),
        Some("Store tidal energy in flow batteries")
    );

    // Listing returns both, scoped to the requester.
    fx.vote
        .handle(VoteIdeaCommand {
            idea_id: first.id,
            voter: voter("10.0.0.7"),
            value: 1,
        })
        .await
        .expect("vote succeeds");

    let listing = fx
        .list
        .handle(ListIdeasQuery {
            requester: voter("10.0.0.7"),
        })
        .await
        .expect("list succeeds");
    assert_eq!(listing.len(), 2);

    let tidal = listing
        .iter()
        .find(|s| s.title == "Tidal Batteries")
        .expect("tidal present");
    assert_eq!(tidal.your_vote, 1);
    assert_eq!(tidal.votecount, 1);

    let kelp = listing
        .iter()
        .find(|s| s.title == "Kelp Carbon Sinks")
        .expect("kelp present");
    assert_eq!(kelp.your_vote, 0);
    assert_eq!(kelp.addition_count, 0);
}

#[tokio::test]
async fn invalid_vote_values_never_touch_storage() {
    let fx = Fixture::new();

    let created = fx
        .create
        .handle(CreateIdeaCommand {
            owner_id: user("u1"),
            title: "Algae Paint".to_string(),
            summary: None,
            content: None,
            requester: voter("10.0.0.1"),
        })
        .await
        .expect("create succeeds");

    for bad in [0i64, 2, -2, 100] {
        let result = fx
            .vote
            .handle(VoteIdeaCommand {
                idea_id: created.id,
                voter: voter("10.0.0.1"),
                value: bad,
            })
            .await;
        assert_eq!(result, Err(IdeaError::InvalidVoteValue(bad)));
    }

    let view = fx
        .get
        .handle(GetIdeaQuery {
            idea_id: created.id,
            requester: voter("10.0.0.1"),
        })
        .await
        .expect("get succeeds");
    assert_eq!(view.votecount, 0);
    assert_eq!(view.your_vote, 0);
}
