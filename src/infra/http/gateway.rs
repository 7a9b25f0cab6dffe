//! REST implementation of the application gateways.
//!
//! Wire payloads are parsed into domain records here, at the boundary, so
//! the services never touch raw JSON shapes.

use std::sync::Arc;

use async_trait::async_trait;
use wayfare_api_types::{
    ApiEnvelope, DeleteReleaseRequest, DeleteStatusRequest, LoginData, LoginRequest, ReleaseId,
    ReleaseListData, SignUpRequest, UpdateStateRequest,
};

use crate::application::gateway::{
    AuthGateway, AuthSession, Credentials, GatewayError, NewAccount, PageWindow, ReleaseGateway,
};
use crate::domain::entities::{Release, SessionUser};
use crate::domain::types::{ReviewState, Role};

use super::transport::Transport;

pub struct HttpGateway {
    transport: Arc<Transport>,
}

impl HttpGateway {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    async fn fetch_release_page(
        &self,
        path: &str,
        page: PageWindow,
    ) -> Result<Vec<Release>, GatewayError> {
        let query = [
            ("limit", page.limit.to_string()),
            ("offset", page.offset.to_string()),
        ];
        let envelope: ApiEnvelope<ReleaseListData> =
            self.transport.get_json(path, &query).await?;

        let mut releases: Vec<Release> = envelope
            .data
            .releases
            .into_iter()
            .map(Release::from)
            .collect();
        // A misbehaving backend must not widen the requested window.
        releases.truncate(page.limit as usize);
        Ok(releases)
    }
}

#[async_trait]
impl ReleaseGateway for HttpGateway {
    async fn list_releases(&self, page: PageWindow) -> Result<Vec<Release>, GatewayError> {
        self.fetch_release_page("api/releases", page).await
    }

    async fn update_state(
        &self,
        id: &ReleaseId,
        state: ReviewState,
        reason: &str,
    ) -> Result<(), GatewayError> {
        let body = UpdateStateRequest {
            state: state.as_str().to_string(),
            reason: reason.to_string(),
        };
        self.transport
            .put(&format!("api/release/{id}/state"), &body)
            .await
    }

    async fn set_delete_status(&self, id: &ReleaseId, deleted: bool) -> Result<(), GatewayError> {
        let body = DeleteStatusRequest {
            delete_status: if deleted { 0 } else { 1 },
        };
        self.transport
            .put(&format!("api/release/{id}/delete-status"), &body)
            .await
    }

    async fn list_deleted(&self, page: PageWindow) -> Result<Vec<Release>, GatewayError> {
        self.fetch_release_page("api/releases/deleted", page).await
    }

    async fn delete_release(&self, id: &ReleaseId, user_id: &str) -> Result<(), GatewayError> {
        let body = DeleteReleaseRequest {
            user_id: user_id.to_string(),
        };
        self.transport
            .delete(&format!("api/release/{id}"), &body)
            .await
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn sign_up(&self, account: NewAccount) -> Result<(), GatewayError> {
        let body = SignUpRequest {
            user_name: account.user_name,
            pass_word: account.pass_word,
            avatar_url: account.avatar_url,
        };
        self.transport.post("api/signUp", &body).await
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthSession, GatewayError> {
        let body = LoginRequest {
            user_name: credentials.user_name,
            pass_word: credentials.pass_word,
        };
        let envelope: ApiEnvelope<LoginData> =
            self.transport.post_json("api/checkLogin", &body).await?;

        let LoginData { token, account } = envelope.data;
        let user = account.map(|account| SessionUser {
            id: account.id.unwrap_or_default(),
            user_name: account.user_name,
            role: account
                .role
                .as_deref()
                .and_then(|value| Role::try_from(value).ok())
                .unwrap_or(Role::User),
        });

        Ok(AuthSession { token, user })
    }
}
