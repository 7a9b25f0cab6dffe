//! Shared domain enumerations aligned with the backend's wire values.

use serde::{Deserialize, Serialize};

/// Moderation verdict for a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    Wait,
    Resolve,
    Reject,
}

impl ReviewState {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewState::Wait => "wait",
            ReviewState::Resolve => "resolve",
            ReviewState::Reject => "reject",
        }
    }
}

impl TryFrom<&str> for ReviewState {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "wait" => Ok(ReviewState::Wait),
            "resolve" => Ok(ReviewState::Resolve),
            "reject" => Ok(ReviewState::Reject),
            _ => Err(()),
        }
    }
}

/// Console role carried by accounts and route metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Auditor,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Auditor => "auditor",
            Role::User => "user",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "admin" => Ok(Role::Admin),
            "auditor" => Ok(Role::Auditor),
            "user" => Ok(Role::User),
            _ => Err(()),
        }
    }
}
