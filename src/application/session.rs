//! Session store: the authenticated user and bearer token.
//!
//! Both halves are persisted under their own keys and rehydrated at
//! construction; clearing removes the keys and uninstalls the token from
//! the transport slot.

use tracing::warn;

use crate::application::gateway::BearerToken;
use crate::domain::entities::SessionUser;
use crate::domain::types::Role;
use crate::infra::error::InfraError;
use crate::infra::storage::{LocalStore, keys};

pub struct SessionStore {
    store: LocalStore,
    bearer: BearerToken,
    token: Option<String>,
    user: Option<SessionUser>,
}

impl SessionStore {
    /// Rehydrate the session from storage. Unreadable entries are treated
    /// as logged out rather than failing construction.
    pub fn new(store: LocalStore, bearer: BearerToken) -> Self {
        let token = match store.get(keys::SESSION_TOKEN) {
            Ok(token) => token.filter(|value| !value.is_empty()),
            Err(err) => {
                warn!(error = %err, "persisted token unreadable");
                None
            }
        };
        let user = match store.get_json::<SessionUser>(keys::SESSION_USER) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "persisted session user unreadable");
                None
            }
        };

        if let Some(token) = &token {
            bearer.set(token.clone());
        }

        Self {
            store,
            bearer,
            token,
            user,
        }
    }

    pub fn set_user(&mut self, user: SessionUser) -> Result<(), InfraError> {
        self.store.set_json(keys::SESSION_USER, &user)?;
        self.user = Some(user);
        Ok(())
    }

    pub fn set_token(&mut self, token: String) -> Result<(), InfraError> {
        self.store.set(keys::SESSION_TOKEN, &token)?;
        self.bearer.set(token.clone());
        self.token = Some(token);
        Ok(())
    }

    /// Log out: drop both halves from memory and storage.
    pub fn clear(&mut self) -> Result<(), InfraError> {
        self.store.remove(keys::SESSION_TOKEN)?;
        self.store.remove(keys::SESSION_USER)?;
        self.bearer.clear();
        self.token = None;
        self.user = None;
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
