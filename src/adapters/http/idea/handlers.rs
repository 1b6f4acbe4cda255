//! HTTP handlers for idea endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::{RequesterAddr, RequireUser};
use crate::application::handlers::idea::{
    AddAdditionCommand, AddAdditionHandler, AddCommentCommand, AddCommentHandler,
    CreateIdeaCommand, CreateIdeaHandler, GetIdeaHandler, GetIdeaQuery, ListIdeasHandler,
    ListIdeasQuery, UpdateIdeaCommand, UpdateIdeaHandler, VoteIdeaCommand, VoteIdeaHandler,
};
use crate::domain::foundation::{AdditionId, IdeaId};
use crate::domain::idea::IdeaError;
use crate::ports::IdeaStore;

use super::dto::{
    AddAdditionRequest, AddCommentRequest, CreateIdeaRequest, ErrorResponse, IdeaListResponse,
    IdeaResponse, IdeaSummaryResponse, UpdateIdeaRequest, VoteRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct IdeaHandlers {
    create_handler: Arc<CreateIdeaHandler>,
    update_handler: Arc<UpdateIdeaHandler>,
    get_handler: Arc<GetIdeaHandler>,
    list_handler: Arc<ListIdeasHandler>,
    vote_handler: Arc<VoteIdeaHandler>,
    add_addition_handler: Arc<AddAdditionHandler>,
    add_comment_handler: Arc<AddCommentHandler>,
}

impl IdeaHandlers {
    /// Wires every operation handler against one store.
    pub fn new(store: Arc<dyn IdeaStore>) -> Self {
        Self {
            create_handler: Arc::new(CreateIdeaHandler::new(store.clone())),
            update_handler: Arc::new(UpdateIdeaHandler::new(store.clone())),
            get_handler: Arc::new(GetIdeaHandler::new(store.clone())),
            list_handler: Arc::new(ListIdeasHandler::new(store.clone())),
            vote_handler: Arc::new(VoteIdeaHandler::new(store.clone())),
            add_addition_handler: Arc::new(AddAdditionHandler::new(store.clone())),
            add_comment_handler: Arc::new(AddCommentHandler::new(store)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/ideas - Submit a new idea
pub async fn create_idea(
    State(handlers): State<IdeaHandlers>,
    RequireUser(user_id): RequireUser,
    RequesterAddr(requester): RequesterAddr,
    Json(req): Json<CreateIdeaRequest>,
) -> Response {
    let cmd = CreateIdeaCommand {
        owner_id: user_id,
        title: req.title,
        summary: req.summary,
        content: req.content,
        requester,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(view) => (StatusCode::CREATED, Json(IdeaResponse::from(view))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

/// GET /api/ideas - List every idea in the reduced projection
pub async fn list_ideas(
    State(handlers): State<IdeaHandlers>,
    RequesterAddr(requester): RequesterAddr,
) -> Response {
    match handlers.list_handler.handle(ListIdeasQuery { requester }).await {
        Ok(summaries) => {
            let response = IdeaListResponse {
                ideas: summaries.into_iter().map(IdeaSummaryResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_idea_error(e),
    }
}

/// GET /api/ideas/:id - Single-idea public view
pub async fn get_idea(
    State(handlers): State<IdeaHandlers>,
    RequesterAddr(requester): RequesterAddr,
    Path(idea_id): Path<String>,
) -> Response {
    let idea_id = match parse_idea_id(&idea_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetIdeaQuery { idea_id, requester })
        .await
    {
        Ok(view) => (StatusCode::OK, Json(IdeaResponse::from(view))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

/// PATCH /api/ideas/:id - Owner-gated edit of summary and content
pub async fn update_idea(
    State(handlers): State<IdeaHandlers>,
    RequireUser(user_id): RequireUser,
    RequesterAddr(requester): RequesterAddr,
    Path(idea_id): Path<String>,
    Json(req): Json<UpdateIdeaRequest>,
) -> Response {
    let idea_id = match parse_idea_id(&idea_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateIdeaCommand {
        idea_id,
        owner_claim: user_id,
        summary: req.summary,
        content: req.content,
        requester,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(view) => (StatusCode::OK, Json(IdeaResponse::from(view))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

/// POST /api/ideas/:id/vote - Apply a vote
pub async fn vote_idea(
    State(handlers): State<IdeaHandlers>,
    RequesterAddr(voter): RequesterAddr,
    Path(idea_id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> Response {
    let idea_id = match parse_idea_id(&idea_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = VoteIdeaCommand {
        idea_id,
        voter,
        value: req.value,
    };

    match handlers.vote_handler.handle(cmd).await {
        Ok(view) => (StatusCode::OK, Json(IdeaResponse::from(view))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

/// POST /api/ideas/:id/additions - Append an addition
pub async fn add_addition(
    State(handlers): State<IdeaHandlers>,
    RequireUser(user_id): RequireUser,
    RequesterAddr(requester): RequesterAddr,
    Path(idea_id): Path<String>,
    Json(req): Json<AddAdditionRequest>,
) -> Response {
    let idea_id = match parse_idea_id(&idea_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AddAdditionCommand {
        idea_id,
        contributor_id: user_id,
        category: req.category,
        content: req.content,
        requester,
    };

    match handlers.add_addition_handler.handle(cmd).await {
        Ok(view) => (StatusCode::CREATED, Json(IdeaResponse::from(view))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

/// POST /api/ideas/:id/additions/:aid/comments - Append a comment
pub async fn add_comment(
    State(handlers): State<IdeaHandlers>,
    RequireUser(user_id): RequireUser,
    RequesterAddr(requester): RequesterAddr,
    Path((idea_id, addition_id)): Path<(String, String)>,
    Json(req): Json<AddCommentRequest>,
) -> Response {
    let idea_id = match parse_idea_id(&idea_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let addition_id = match addition_id.parse::<AdditionId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid addition ID"),
    };

    let cmd = AddCommentCommand {
        idea_id,
        addition_id,
        author_id: user_id,
        text: req.comment,
        requester,
    };

    match handlers.add_comment_handler.handle(cmd).await {
        Ok(view) => (StatusCode::CREATED, Json(IdeaResponse::from(view))).into_response(),
        Err(e) => handle_idea_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn parse_idea_id(raw: &str) -> Result<IdeaId, Response> {
    raw.parse::<IdeaId>()
        .map_err(|_| bad_request("Invalid idea ID"))
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("BAD_REQUEST", message)),
    )
        .into_response()
}

fn handle_idea_error(error: IdeaError) -> Response {
    let status = match &error {
        IdeaError::NotFound(_)
        | IdeaError::AdditionNotFound(_)
        | IdeaError::VoteTargetNotFound(_) => StatusCode::NOT_FOUND,
        IdeaError::DuplicateTitle(_) => StatusCode::CONFLICT,
        IdeaError::NotOwner => StatusCode::FORBIDDEN,
        IdeaError::InvalidVoteValue(_) | IdeaError::ValidationFailed { .. } => {
            StatusCode::BAD_REQUEST
        }
        IdeaError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    if status == StatusCode::SERVICE_UNAVAILABLE {
        tracing::error!(code = %error.code(), "store failure surfaced to client");
    }

    (
        status,
        Json(ErrorResponse::new(error.code().to_string(), error.message())),
    )
        .into_response()
}
