//! Gateway traits describing the backend surface the console consumes.
//!
//! Services depend on these traits rather than on the HTTP adapter, so they
//! can be exercised against in-memory fakes in tests.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use thiserror::Error;
use wayfare_api_types::ReleaseId;

use crate::domain::entities::{Release, SessionUser};
use crate::domain::types::ReviewState;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server replied with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Offset window for the paginated list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: u32,
    pub offset: u32,
}

/// Shared slot for the bearer token the transport injects once a session
/// exists. Cloning shares the slot.
#[derive(Debug, Clone, Default)]
pub struct BearerToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl BearerToken {
    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_name: String,
    pub pass_word: String,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user_name: String,
    pub pass_word: String,
    pub avatar_url: Option<String>,
}

/// What a successful login yields.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: Option<SessionUser>,
}

#[async_trait]
pub trait ReleaseGateway: Send + Sync {
    async fn list_releases(&self, page: PageWindow) -> Result<Vec<Release>, GatewayError>;

    async fn update_state(
        &self,
        id: &ReleaseId,
        state: ReviewState,
        reason: &str,
    ) -> Result<(), GatewayError>;

    async fn set_delete_status(&self, id: &ReleaseId, deleted: bool) -> Result<(), GatewayError>;

    async fn list_deleted(&self, page: PageWindow) -> Result<Vec<Release>, GatewayError>;

    async fn delete_release(&self, id: &ReleaseId, user_id: &str) -> Result<(), GatewayError>;
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_up(&self, account: NewAccount) -> Result<(), GatewayError>;

    async fn login(&self, credentials: Credentials) -> Result<AuthSession, GatewayError>;
}
