use tracing::warn;
use wayfare_api_types::ReleaseId;

use crate::application::gateway::PageWindow;
use crate::domain::entities::Release;
use crate::domain::types::ReviewState;

use super::service::ModerationService;
use super::types::{ModerationError, StatusFilter};

/// Page size of the backend list endpoints.
const PAGE_LIMIT: u32 = 50;
/// The console loads exactly these two windows; rows past 100 are not
/// reachable from this surface.
const PAGE_OFFSETS: [u32; 2] = [0, 50];

impl ModerationService {
    /// Load the release list. A no-op once loaded; a failed load leaves the
    /// guard unset so the next call retries.
    pub async fn fetch_releases(&mut self) -> Result<(), ModerationError> {
        if self.state.loaded {
            return Ok(());
        }

        let mut merged = Vec::new();
        for offset in PAGE_OFFSETS {
            let window = PageWindow {
                limit: PAGE_LIMIT,
                offset,
            };
            match self.gateway.list_releases(window).await {
                Ok(batch) => merged.extend(batch),
                Err(err) => {
                    warn!(offset, error = %err, "release listing failed");
                    self.state.last_error = Some(err.to_string());
                    return Err(err.into());
                }
            }
        }

        self.state.releases = merged;
        self.state.loaded = true;
        self.state.last_error = None;
        Ok(())
    }

    /// Drop the load-once guard so the next fetch hits the backend again.
    pub fn reset_loaded(&mut self) {
        self.state.loaded = false;
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.state.filter = filter;
    }

    /// Change a release's review verdict. The state string is validated
    /// before any network call; a record missing from the live list after a
    /// successful call is silently ignored.
    pub async fn update_status(
        &mut self,
        id: &ReleaseId,
        state: &str,
        reason: Option<&str>,
    ) -> Result<(), ModerationError> {
        let verdict = ReviewState::try_from(state).map_err(|()| ModerationError::UnknownState {
            value: state.to_string(),
        })?;
        let reason = reason.unwrap_or_default();

        self.gateway.update_state(id, verdict, reason).await?;

        if let Some(release) = self.find_mut(id) {
            release.state = verdict;
            release.reason = match verdict {
                ReviewState::Reject if !reason.is_empty() => Some(reason.to_string()),
                _ => None,
            };
        }
        Ok(())
    }

    /// Soft-delete: flip the server flag, mark the live record, and append a
    /// snapshot to the persisted recycle bin. Snapshots are append-only; a
    /// record deleted twice appears twice.
    pub async fn soft_delete(&mut self, id: &ReleaseId) -> Result<(), ModerationError> {
        self.gateway.set_delete_status(id, true).await?;

        let Some(release) = self.find_mut(id) else {
            return Ok(());
        };
        release.is_deleted = true;
        release.delete_status = 0;
        let snapshot = release.clone();
        self.state.deleted.push(snapshot);
        self.persist_deleted()
    }

    /// Bring a release back from the recycle bin. Unknown ids are ignored.
    pub async fn restore(&mut self, id: &ReleaseId) -> Result<(), ModerationError> {
        let Some(index) = self
            .state
            .deleted
            .iter()
            .position(|release| &release.release_id == id)
        else {
            return Ok(());
        };

        self.gateway.set_delete_status(id, false).await?;

        if let Some(release) = self.find_mut(id) {
            release.is_deleted = false;
            release.delete_status = 1;
        }
        self.state.deleted.remove(index);
        self.persist_deleted()
    }

    /// Purge a release from the recycle bin. Idempotent: an id that is not
    /// in the bin is a no-op with no network call.
    pub async fn permanent_delete(
        &mut self,
        id: &ReleaseId,
        user_id: &str,
    ) -> Result<(), ModerationError> {
        let Some(index) = self
            .state
            .deleted
            .iter()
            .position(|release| &release.release_id == id)
        else {
            return Ok(());
        };

        self.gateway.delete_release(id, user_id).await?;

        self.state.deleted.remove(index);
        self.persist_deleted()
    }

    /// Reconcile the live list after an out-of-band restore: clear the flag
    /// in place when the record is present, otherwise reset and refetch.
    pub async fn sync_restore(&mut self, id: &ReleaseId) -> Result<(), ModerationError> {
        if let Some(release) = self.find_mut(id) {
            release.is_deleted = false;
            release.delete_status = 1;
            return Ok(());
        }

        self.state.loaded = false;
        self.state.releases.clear();
        self.fetch_releases().await
    }

    /// Replace the recycle bin with the server's deleted list and persist
    /// the result. Used when the local snapshot has diverged.
    pub async fn reload_deleted(&mut self) -> Result<(), ModerationError> {
        let mut merged = Vec::new();
        for offset in PAGE_OFFSETS {
            let window = PageWindow {
                limit: PAGE_LIMIT,
                offset,
            };
            merged.extend(self.gateway.list_deleted(window).await?);
        }

        self.state.deleted = merged;
        self.persist_deleted()
    }

    fn find_mut(&mut self, id: &ReleaseId) -> Option<&mut Release> {
        self.state
            .releases
            .iter_mut()
            .find(|release| &release.release_id == id)
    }
}
