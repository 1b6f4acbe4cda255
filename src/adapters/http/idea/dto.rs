//! HTTP DTOs for idea endpoints.
//!
//! These types decouple the wire API from domain types, allowing
//! independent evolution.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::UserRef;
use crate::domain::idea::{Addition, Comment, IdeaSummary, IdeaView};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to submit a new idea.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIdeaRequest {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Request to edit an idea's text fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIdeaRequest {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Request carrying one vote.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub value: i64,
}

/// Request to append an addition.
#[derive(Debug, Clone, Deserialize)]
pub struct AddAdditionRequest {
    pub category: String,
    #[serde(default)]
    pub content: Value,
}

/// Request to append a comment to an addition.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCommentRequest {
    pub comment: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Error payload with the stable error code string.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            error: error.into(),
        }
    }
}

/// Resolved owner subset.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerResponse {
    pub id: String,
    pub name: String,
}

impl From<&UserRef> for OwnerResponse {
    fn from(owner: &UserRef) -> Self {
        Self {
            id: owner.id.to_string(),
            name: owner.name.clone(),
        }
    }
}

/// Comment on an addition.
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerResponse>,
    pub comment: String,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id().to_string(),
            owner: comment.owner().map(OwnerResponse::from),
            comment: comment.text().to_string(),
        }
    }
}

/// Addition with its comment thread.
#[derive(Debug, Clone, Serialize)]
pub struct AdditionResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerResponse>,
    pub category: String,
    pub content: Value,
    pub comments: Vec<CommentResponse>,
}

impl From<&Addition> for AdditionResponse {
    fn from(addition: &Addition) -> Self {
        Self {
            id: addition.id().to_string(),
            owner: addition.owner().map(OwnerResponse::from),
            category: addition.category().to_string(),
            content: addition.content().clone(),
            comments: addition.comments().iter().map(CommentResponse::from).collect(),
        }
    }
}

/// Full single-idea view.
#[derive(Debug, Clone, Serialize)]
pub struct IdeaResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub additions: Vec<AdditionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerResponse>,
    pub votecount: i64,
    pub your_vote: i8,
    pub updated_at: String,
    pub badge: u8,
}

impl From<IdeaView> for IdeaResponse {
    fn from(view: IdeaView) -> Self {
        Self {
            id: view.id.to_string(),
            title: view.title,
            summary: view.summary,
            content: view.content,
            additions: view.additions.iter().map(AdditionResponse::from).collect(),
            owner: view.owner.as_ref().map(OwnerResponse::from),
            votecount: view.votecount,
            your_vote: view.your_vote,
            updated_at: view.updated_at.to_rfc3339(),
            badge: view.badge.level(),
        }
    }
}

/// Reduced list-item view.
#[derive(Debug, Clone, Serialize)]
pub struct IdeaSummaryResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerResponse>,
    pub votecount: i64,
    pub your_vote: i8,
    pub addition_count: usize,
    pub updated_at: String,
    pub badge: u8,
}

impl From<IdeaSummary> for IdeaSummaryResponse {
    fn from(summary: IdeaSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            title: summary.title,
            summary: summary.summary,
            owner: summary.owner.as_ref().map(OwnerResponse::from),
            votecount: summary.votecount,
            your_vote: summary.your_vote,
            addition_count: summary.addition_count,
            updated_at: summary.updated_at.to_rfc3339(),
            badge: summary.badge.level(),
        }
    }
}

/// List response wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct IdeaListResponse {
    pub ideas: Vec<IdeaSummaryResponse>,
}
