//! Badge classification derived from an idea's extension tree.
//!
//! The badge signals how much collaboration an idea has attracted:
//! level 1 for an unextended idea, 2 once the owner has extended it
//! themselves, 3 once anyone else has contributed an addition.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use super::aggregate::Idea;

/// Tri-level collaboration classification of an idea.
///
/// Serialized as the integer level (1..=3) on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Badge {
    /// No additions yet.
    Unextended,
    /// Additions exist, all authored by the idea's owner.
    OwnerExtended,
    /// At least one addition authored by someone else.
    Collaborative,
}

impl Badge {
    /// Classifies an idea from the shape of its addition list and ownership.
    ///
    /// Ownership comparison tolerates unresolved owner references: an
    /// addition with no resolved owner never counts as foreign, and an idea
    /// with no resolved owner can never reach `Collaborative`.
    pub fn classify(idea: &Idea) -> Badge {
        if idea.additions().is_empty() {
            return Badge::Unextended;
        }

        let has_foreign_addition = match idea.owner() {
            Some(owner) => idea.additions().iter().any(|addition| {
                addition
                    .owner()
                    .map(|contributor| contributor.id != owner.id)
                    .unwrap_or(false)
            }),
            None => false,
        };

        if has_foreign_addition {
            Badge::Collaborative
        } else {
            Badge::OwnerExtended
        }
    }

    /// Returns the numeric level (1..=3).
    pub fn level(&self) -> u8 {
        match self {
            Badge::Unextended => 1,
            Badge::OwnerExtended => 2,
            Badge::Collaborative => 3,
        }
    }

    /// Parses a numeric level back into a badge.
    pub fn from_level(level: u8) -> Option<Badge> {
        match level {
            1 => Some(Badge::Unextended),
            2 => Some(Badge::OwnerExtended),
            3 => Some(Badge::Collaborative),
            _ => None,
        }
    }
}

impl Serialize for Badge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

impl<'de> Deserialize<'de> for Badge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let level = u8::deserialize(deserializer)?;
        Badge::from_level(level)
            .ok_or_else(|| de::Error::custom(format!("badge level out of range: {}", level)))
    }
}
