use thiserror::Error;

use crate::application::gateway::GatewayError;
use crate::domain::types::ReviewState;
use crate::infra::error::InfraError;

#[derive(Debug, Error)]
pub enum ModerationError {
    /// Raised before any network call; the only input validation the
    /// console performs.
    #[error("unknown review state `{value}`")]
    UnknownState { value: String },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Storage(#[from] InfraError),
}

/// Narrowing applied to the visible (non-deleted) release list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReviewState),
}

impl StatusFilter {
    pub fn matches(self, state: ReviewState) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == state,
        }
    }
}

impl TryFrom<&str> for StatusFilter {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value == "all" {
            return Ok(StatusFilter::All);
        }
        ReviewState::try_from(value).map(StatusFilter::Only)
    }
}
