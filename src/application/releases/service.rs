use std::sync::Arc;

use crate::application::gateway::ReleaseGateway;
use crate::domain::entities::Release;
use crate::infra::storage::{LocalStore, keys};

use super::types::{ModerationError, StatusFilter};

/// Explicit store state: constructor-provided initial values, mutated only
/// through service methods.
#[derive(Debug, Default)]
pub struct ModerationState {
    pub(crate) releases: Vec<Release>,
    pub(crate) deleted: Vec<Release>,
    pub(crate) filter: StatusFilter,
    pub(crate) loaded: bool,
    pub(crate) last_error: Option<String>,
}

impl ModerationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed state for embedding tests; the recycle bin is taken as-is.
    pub fn with_deleted(deleted: Vec<Release>) -> Self {
        Self {
            deleted,
            ..Self::default()
        }
    }
}

pub struct ModerationService {
    pub(crate) gateway: Arc<dyn ReleaseGateway>,
    pub(crate) store: LocalStore,
    pub(crate) state: ModerationState,
}

impl ModerationService {
    /// Build a service whose recycle bin is hydrated from the persisted
    /// snapshot (absent key means an empty bin).
    pub fn new(gateway: Arc<dyn ReleaseGateway>, store: LocalStore) -> Result<Self, ModerationError> {
        let deleted = store
            .get_json::<Vec<Release>>(keys::DELETED_RELEASES)?
            .unwrap_or_default();
        Ok(Self::with_state(
            gateway,
            store,
            ModerationState::with_deleted(deleted),
        ))
    }

    pub fn with_state(
        gateway: Arc<dyn ReleaseGateway>,
        store: LocalStore,
        state: ModerationState,
    ) -> Self {
        Self {
            gateway,
            store,
            state,
        }
    }

    pub(crate) fn persist_deleted(&self) -> Result<(), ModerationError> {
        self.store
            .set_json(keys::DELETED_RELEASES, &self.state.deleted)?;
        Ok(())
    }
}
