//! Moderation console client for user-submitted travel journals.
//!
//! A thin client over the review backend: typed REST gateways, an explicit
//! moderation store with a persisted recycle bin, a mocked user directory,
//! a session store, and a route-guard predicate. Rendering and navigation
//! belong to the embedding UI; this crate owns state and decisions.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use wayfare::application::gateway::BearerToken;
//! use wayfare::application::releases::ModerationService;
//! use wayfare::config::Settings;
//! use wayfare::infra::http::{HttpGateway, Transport};
//! use wayfare::infra::storage::LocalStore;
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load(None)?;
//! let bearer = BearerToken::default();
//! let transport = Arc::new(Transport::new(
//!     settings.api.base_url.clone(),
//!     settings.api.timeout,
//!     bearer.clone(),
//! )?);
//! let gateway = Arc::new(HttpGateway::new(transport));
//! let store = LocalStore::open(&settings.storage.directory)?;
//!
//! let mut releases = ModerationService::new(gateway, store)?;
//! releases.fetch_releases().await?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
