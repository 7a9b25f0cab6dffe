//! Moderation store: the reviewed release list and its recycle bin.

mod commands;
mod queries;
mod service;
mod types;

pub use service::{ModerationService, ModerationState};
pub use types::{ModerationError, StatusFilter};
