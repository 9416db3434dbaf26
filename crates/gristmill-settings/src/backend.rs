use async_trait::async_trait;

use crate::error::SettingsError;
use crate::ui_state::{GitSyncSettings, UiState};

/// Server-side settings surface the reconciler talks to.
///
/// The HTTP client lives outside this crate; tests and the `--from-json`
/// CLI path plug in [`StaticSettings`] instead.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
  /// Fetch the workspace git-sync settings.
  async fn get_settings(&self) -> Result<GitSyncSettings, SettingsError>;

  /// Replace the primary repository's sync filters.
  async fn edit_git_sync_config(&self, state: &UiState) -> Result<(), SettingsError>;
}

/// Backend stand-in holding a fixed settings payload, typically parsed
/// from a `--from-json` argument. Edits are accepted and discarded.
#[derive(Debug)]
pub struct StaticSettings {
  settings: GitSyncSettings,
}

impl StaticSettings {
  pub fn new(state: UiState) -> Self {
    StaticSettings {
      settings: GitSyncSettings::single(state),
    }
  }

  /// Parse a JSON payload holding either a full settings document or a
  /// bare `{include_path, include_type}` state.
  pub fn from_json(json: &str) -> Result<Self, SettingsError> {
    let settings: GitSyncSettings = serde_json::from_str(json)?;
    if settings.git_sync.is_some() {
      return Ok(StaticSettings { settings });
    }
    let state: UiState = serde_json::from_str(json)?;
    Ok(StaticSettings::new(state))
  }
}

#[async_trait]
impl SettingsBackend for StaticSettings {
  async fn get_settings(&self) -> Result<GitSyncSettings, SettingsError> {
    Ok(self.settings.clone())
  }

  async fn edit_git_sync_config(&self, _state: &UiState) -> Result<(), SettingsError> {
    Ok(())
  }
}
