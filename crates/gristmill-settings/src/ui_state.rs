use serde::{Deserialize, Serialize};

/// Per-repository sync filters as the workspace editor stores them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiState {
  #[serde(default)]
  pub include_path: Vec<String>,
  #[serde(default)]
  pub include_type: Vec<String>,
}

/// Workspace settings payload as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitSyncSettings {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub git_sync: Option<GitSyncConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitSyncConfig {
  #[serde(default)]
  pub repositories: Vec<GitSyncRepository>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitSyncRepository {
  #[serde(default)]
  pub script_path: String,
  #[serde(default)]
  pub git_repo_resource_path: String,
  #[serde(default)]
  pub use_individual_branch: bool,
  #[serde(default)]
  pub group_by_folder: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub settings: Option<UiState>,
}

impl GitSyncSettings {
  /// Wrap a single UI state as a one-repository settings payload.
  pub fn single(state: UiState) -> Self {
    GitSyncSettings {
      git_sync: Some(GitSyncConfig {
        repositories: vec![GitSyncRepository {
          settings: Some(state),
          ..GitSyncRepository::default()
        }],
      }),
    }
  }

  /// Filters of the first configured repository.
  pub fn primary(&self) -> Option<&UiState> {
    self
      .git_sync
      .as_ref()?
      .repositories
      .first()?
      .settings
      .as_ref()
  }
}
