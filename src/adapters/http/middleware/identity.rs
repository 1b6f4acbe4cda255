//! Identity extractors.
//!
//! The transport collaborator hands this core already-derived identifiers:
//! the authenticated user id arrives in the `x-user-id` header (placed there
//! by the auth layer in front of this service), and the vote deduplication
//! key is the requester's network address, preferring `x-forwarded-for`
//! over the socket peer. No credential validation happens here.

use axum::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::net::SocketAddr;

use crate::domain::foundation::{UserId, VoterId};

use super::super::idea::ErrorResponse;

/// Extractor for the authenticated user id. Rejects with 401 when absent.
#[derive(Debug, Clone)]
pub struct RequireUser(pub UserId);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get("x-user-id")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);

        match value.and_then(|v| UserId::new(v).ok()) {
            Some(user_id) => Ok(RequireUser(user_id)),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("UNAUTHORIZED", "Missing user identity")),
            )
                .into_response()),
        }
    }
}

/// Extractor for the requester's vote deduplication key.
///
/// Prefers the first `x-forwarded-for` entry; falls back to the socket peer
/// address when the service is reached directly.
#[derive(Debug, Clone)]
pub struct RequesterAddr(pub VoterId);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequesterAddr {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.split(',').next())
            .map(|addr| addr.trim().to_string());

        let addr = forwarded.or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        });

        match addr.and_then(|v| VoterId::new(v).ok()) {
            Some(voter) => Ok(RequesterAddr(voter)),
            None => Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "BAD_REQUEST",
                    "Requester address could not be determined",
                )),
            )
                .into_response()),
        }
    }
}
