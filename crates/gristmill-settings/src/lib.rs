//! Gristmill Settings
//!
//! This crate reconciles the local sync configuration (`gristmill.yaml`)
//! against a workspace's server-side git-sync settings.
//!
//! The canonical record is [`SyncOptions`], derived deterministically from
//! the per-repository [`UiState`] the workspace editor stores. Pull and
//! push share one behavior matrix: `diff` compares the two sides, `dry run`
//! computes without applying, and the default mode writes the local file
//! (pull) or replaces the backend settings (push). Every failure path is
//! folded into a structured [`SyncOutcome`] so callers never deal with
//! panics or raw errors.

mod backend;
mod error;
mod options;
mod reconcile;
mod ui_state;

pub use backend::{SettingsBackend, StaticSettings};
pub use error::SettingsError;
pub use options::{SyncOptions, DEFAULT_INCLUDES};
pub use reconcile::{pull, push, SyncFlags, SyncOutcome, CONFIG_FILENAME};
pub use ui_state::{GitSyncConfig, GitSyncRepository, GitSyncSettings, UiState};
