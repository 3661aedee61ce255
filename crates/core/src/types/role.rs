//! Waitlist role and goal enums.
//!
//! Wire values are the exact strings the waitlist backend accepts, so
//! `Display`, `FromStr` and serde all agree on them.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known [`Role`] or [`Goal`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The value is not one of the four roles.
    #[error("unknown role: {0}")]
    UnknownRole(String),
    /// The value is not one of the four goals.
    #[error("unknown goal: {0}")]
    UnknownGoal(String),
}

/// Who is joining the waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    #[default]
    Creator,
    Brand,
    Seller,
    #[serde(rename = "Just Joining")]
    JustJoining,
}

impl Role {
    /// All roles, in the order the signup form lists them.
    pub const ALL: [Self; 4] = [Self::Creator, Self::Brand, Self::Seller, Self::JustJoining];

    /// Wire value sent to the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creator => "Creator",
            Self::Brand => "Brand",
            Self::Seller => "Seller",
            Self::JustJoining => "Just Joining",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| TagError::UnknownRole(s.to_string()))
    }
}

/// Why someone is joining the waitlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "find brand deals")]
    FindBrandDeals,
    #[serde(rename = "growing as a creator")]
    GrowingAsCreator,
    #[serde(rename = "discovering creators")]
    DiscoveringCreators,
    #[serde(rename = "managing collaboration and deals")]
    ManagingCollaborations,
}

impl Goal {
    /// All goals, in the order the signup form lists them.
    pub const ALL: [Self; 4] = [
        Self::FindBrandDeals,
        Self::GrowingAsCreator,
        Self::DiscoveringCreators,
        Self::ManagingCollaborations,
    ];

    /// Wire value sent to the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FindBrandDeals => "find brand deals",
            Self::GrowingAsCreator => "growing as a creator",
            Self::DiscoveringCreators => "discovering creators",
            Self::ManagingCollaborations => "managing collaboration and deals",
        }
    }

    /// Human-readable checkbox label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FindBrandDeals => "Find brand deals",
            Self::GrowingAsCreator => "Growing as a creator",
            Self::DiscoveringCreators => "Discovering creators",
            Self::ManagingCollaborations => "Managing collaboration and deals",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Goal {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|goal| goal.as_str() == s)
            .ok_or_else(|| TagError::UnknownGoal(s.to_string()))
    }
}
