//! Vote value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// A voter's choice on an idea.
///
/// The wire representation is `+1` / `-1`; any other integer is rejected
/// before storage is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    /// Parses the wire integer into a vote value.
    ///
    /// # Errors
    ///
    /// - `InvalidVoteValue` for anything other than `+1` or `-1`
    pub fn from_wire(value: i64) -> Result<Self, DomainError> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(DomainError::new(
                ErrorCode::InvalidVoteValue,
                format!("Vote value must be +1 or -1, got {}", other),
            )),
        }
    }

    /// Returns the wire integer for this vote.
    pub fn as_wire(&self) -> i8 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }

    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            VoteValue::Up => VoteValue::Down,
            VoteValue::Down => VoteValue::Up,
        }
    }
}
