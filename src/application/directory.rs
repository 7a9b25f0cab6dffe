//! Mocked user directory over the local store.
//!
//! A lookup table of credentials and roles, persisted as one JSON array.
//! Reads that fail (missing key, unreadable JSON) fall back to the seeded
//! accounts rather than erroring, so a wiped or corrupted store behaves
//! like a fresh install.

use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::UserRecord;
use crate::domain::types::Role;
use crate::infra::error::InfraError;
use crate::infra::storage::{LocalStore, keys};

const SEED_ADMIN_ID: Uuid = Uuid::from_u128(0xb2a1_7c54_0e11_4f7e_9d42_6f0a_3c58_1a01);
const SEED_AUDITOR_ID: Uuid = Uuid::from_u128(0xb2a1_7c54_0e11_4f7e_9d42_6f0a_3c58_1a02);

fn seed_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: SEED_ADMIN_ID,
            user_name: "admin".to_string(),
            pass_word: "123456".to_string(),
            role: Role::Admin,
            avatar_url: String::new(),
        },
        UserRecord {
            id: SEED_AUDITOR_ID,
            user_name: "auditor".to_string(),
            pass_word: "123456".to_string(),
            role: Role::Auditor,
            avatar_url: String::new(),
        },
    ]
}

/// Details for a self-registered account; role always defaults to `User`.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub pass_word: String,
    pub avatar_url: Option<String>,
}

pub struct UserDirectory {
    store: LocalStore,
}

impl UserDirectory {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Every known account, falling back to the seeds when the persisted
    /// array is absent or unreadable.
    pub fn all(&self) -> Vec<UserRecord> {
        match self.store.get_json::<Vec<UserRecord>>(keys::USER_DIRECTORY) {
            Ok(Some(users)) => users,
            Ok(None) => seed_users(),
            Err(err) => {
                warn!(error = %err, "user directory unreadable, serving seeds");
                seed_users()
            }
        }
    }

    /// Exact username + password match. Plaintext comparison, as the
    /// directory it mocks did.
    pub fn validate(&self, user_name: &str, pass_word: &str) -> Option<UserRecord> {
        self.all()
            .into_iter()
            .find(|user| user.user_name == user_name && user.pass_word == pass_word)
    }

    pub fn exists(&self, user_name: &str) -> bool {
        self.all().iter().any(|user| user.user_name == user_name)
    }

    /// Register a new account with a freshly generated id and persist the
    /// whole directory.
    pub fn add(&self, details: NewUser) -> Result<UserRecord, InfraError> {
        let record = UserRecord {
            id: Uuid::new_v4(),
            user_name: details.user_name,
            pass_word: details.pass_word,
            role: Role::User,
            avatar_url: details.avatar_url.unwrap_or_default(),
        };

        let mut users = self.all();
        users.push(record.clone());
        self.store.set_json(keys::USER_DIRECTORY, &users)?;
        Ok(record)
    }

    /// Restore the seeded accounts, discarding registrations.
    pub fn reset(&self) -> Result<(), InfraError> {
        self.store.set_json(keys::USER_DIRECTORY, &seed_users())
    }
}
