//! Domain entities mirrored from the backend and local persistence.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wayfare_api_types::{ReleaseId, ReleasePayload};

use crate::domain::types::{ReviewState, Role};

/// A user-submitted travel post as the console tracks it.
///
/// `is_deleted` is derived from the server flag at parse time
/// (`delete_status == 0`) and may diverge locally between a soft delete and
/// the next full reload. `reason` is kept only while the state is `Reject`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub release_id: ReleaseId,
    pub state: ReviewState,
    pub reason: Option<String>,
    pub delete_status: i64,
    pub is_deleted: bool,
    /// Free-form submission content (title, body, media, author fields).
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl From<ReleasePayload> for Release {
    fn from(payload: ReleasePayload) -> Self {
        let state = payload
            .state
            .as_deref()
            .and_then(|value| ReviewState::try_from(value).ok())
            .unwrap_or(ReviewState::Wait);
        let reason = match state {
            ReviewState::Reject => payload.reason.filter(|text| !text.is_empty()),
            _ => None,
        };
        let delete_status = payload.delete_status.unwrap_or(1);

        Self {
            release_id: payload.release_id,
            state,
            reason,
            delete_status,
            is_deleted: delete_status == 0,
            extra: payload.extra,
        }
    }
}

/// Entry in the mocked user directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub user_name: String,
    /// Stored in plaintext, as the directory it mocks did. A latent defect,
    /// not an error case.
    pub pass_word: String,
    pub role: Role,
    pub avatar_url: String,
}

/// The authenticated account a session carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub user_name: String,
    pub role: Role,
}
