use wayfare_api_types::ReleaseId;

use crate::domain::entities::Release;

use super::service::ModerationService;
use super::types::StatusFilter;

impl ModerationService {
    /// All non-deleted records, in fetch order.
    pub fn visible(&self) -> Vec<&Release> {
        self.state
            .releases
            .iter()
            .filter(|release| !release.is_deleted)
            .collect()
    }

    /// Non-deleted records narrowed by the current status filter.
    pub fn filtered(&self) -> Vec<&Release> {
        self.state
            .releases
            .iter()
            .filter(|release| !release.is_deleted && self.state.filter.matches(release.state))
            .collect()
    }

    /// The recycle-bin view, in deletion order.
    pub fn deleted(&self) -> &[Release] {
        &self.state.deleted
    }

    pub fn find(&self, id: &ReleaseId) -> Option<&Release> {
        self.state
            .releases
            .iter()
            .find(|release| &release.release_id == id)
    }

    pub fn filter(&self) -> StatusFilter {
        self.state.filter
    }

    pub fn is_loaded(&self) -> bool {
        self.state.loaded
    }

    /// Message of the most recent failed load, for the embedding UI to
    /// surface. Cleared by a successful load.
    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }
}
