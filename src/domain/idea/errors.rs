//! Idea-specific error types.

use crate::domain::foundation::{AdditionId, DomainError, ErrorCode, IdeaId};

/// Errors surfaced by idea operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeaError {
    /// Idea was not found.
    NotFound(IdeaId),
    /// Addition within an idea was not found.
    AdditionNotFound(AdditionId),
    /// The target of a vote does not exist.
    VoteTargetNotFound(IdeaId),
    /// Another idea already carries this title.
    DuplicateTitle(String),
    /// The requester does not own the idea.
    NotOwner,
    /// The wire vote value was neither +1 nor -1.
    InvalidVoteValue(i64),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Opaque persistence failure.
    StoreUnavailable(String),
}

impl IdeaError {
    pub fn not_found(id: IdeaId) -> Self {
        IdeaError::NotFound(id)
    }

    pub fn addition_not_found(id: AdditionId) -> Self {
        IdeaError::AdditionNotFound(id)
    }

    pub fn duplicate_title(title: impl Into<String>) -> Self {
        IdeaError::DuplicateTitle(title.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        IdeaError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        IdeaError::StoreUnavailable(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            IdeaError::NotFound(_) => ErrorCode::IdeaNotFound,
            IdeaError::AdditionNotFound(_) => ErrorCode::AdditionNotFound,
            IdeaError::VoteTargetNotFound(_) => ErrorCode::VoteTargetNotFound,
            IdeaError::DuplicateTitle(_) => ErrorCode::DuplicateTitle,
            IdeaError::NotOwner => ErrorCode::NotOwner,
            IdeaError::InvalidVoteValue(_) => ErrorCode::InvalidVoteValue,
            IdeaError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            IdeaError::StoreUnavailable(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            IdeaError::NotFound(id) => format!("Idea not found: {}", id),
            IdeaError::AdditionNotFound(id) => format!("Addition not found: {}", id),
            IdeaError::VoteTargetNotFound(id) => format!("Vote target not found: {}", id),
            IdeaError::DuplicateTitle(title) => {
                format!("An idea titled '{}' already exists", title)
            }
            IdeaError::NotOwner => "Only the idea's owner may edit it".to_string(),
            IdeaError::InvalidVoteValue(value) => {
                format!("Vote value must be +1 or -1, got {}", value)
            }
            IdeaError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            IdeaError::StoreUnavailable(msg) => format!("Store unavailable: {}", msg),
        }
    }
}

impl std::fmt::Display for IdeaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for IdeaError {}

impl From<DomainError> for IdeaError {
    fn from(err: DomainError) -> Self {
        // Ids travel in the error details; a code arriving without its id
        // detail degrades to an opaque store failure rather than panicking.
        let idea_id: Option<IdeaId> =
            err.details.get("idea_id").and_then(|v| v.parse().ok());
        let addition_id: Option<AdditionId> =
            err.details.get("addition_id").and_then(|v| v.parse().ok());

        match err.code {
            ErrorCode::IdeaNotFound => match idea_id {
                Some(id) => IdeaError::NotFound(id),
                None => IdeaError::StoreUnavailable(err.message),
            },
            ErrorCode::VoteTargetNotFound => match idea_id {
                Some(id) => IdeaError::VoteTargetNotFound(id),
                None => IdeaError::StoreUnavailable(err.message),
            },
            ErrorCode::AdditionNotFound => match addition_id {
                Some(id) => IdeaError::AdditionNotFound(id),
                None => IdeaError::StoreUnavailable(err.message),
            },
            ErrorCode::DuplicateTitle => {
                IdeaError::DuplicateTitle(err.details.get("title").cloned().unwrap_or_default())
            }
            ErrorCode::NotOwner => IdeaError::NotOwner,
            ErrorCode::InvalidVoteValue => IdeaError::InvalidVoteValue(
                err.details
                    .get("value")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_default(),
            ),
            ErrorCode::ValidationFailed => IdeaError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                IdeaError::StoreUnavailable(err.message)
            }
        }
    }
}
