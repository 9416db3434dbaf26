use gristmill_flow::TsRuntime;
use serde::{Deserialize, Serialize};

use crate::ui_state::UiState;

/// Glob applied when a workspace has no explicit path filters.
pub const DEFAULT_INCLUDES: &str = "f/**";

/// Canonical sync configuration, persisted locally as YAML.
///
/// Constructed fresh per invocation and never mutated in place; the file
/// on disk is the only thing carried between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOptions {
  pub default_ts: TsRuntime,
  pub includes: Vec<String>,
  pub excludes: Vec<String>,
  pub codebases: Vec<String>,
  pub skip_variables: bool,
  pub skip_resources: bool,
  pub skip_resource_types: bool,
  pub skip_secrets: bool,
  pub include_schedules: bool,
  pub include_triggers: bool,
  pub include_users: bool,
  pub include_groups: bool,
  pub include_settings: bool,
  pub include_key: bool,
}

impl SyncOptions {
  /// Derive the canonical configuration from a repository's UI state.
  pub fn from_ui_state(ui: &UiState) -> Self {
    let has = |tag: &str| ui.include_type.iter().any(|t| t == tag);
    SyncOptions {
      default_ts: TsRuntime::Bun,
      includes: if ui.include_path.is_empty() {
        vec![DEFAULT_INCLUDES.to_string()]
      } else {
        ui.include_path.clone()
      },
      excludes: Vec::new(),
      codebases: Vec::new(),
      skip_variables: !has("variable"),
      skip_resources: !has("resource"),
      skip_resource_types: !has("resourcetype"),
      skip_secrets: !has("secret"),
      include_schedules: has("schedule"),
      include_triggers: has("trigger"),
      include_users: has("user"),
      include_groups: has("group"),
      include_settings: has("settings"),
      include_key: has("key"),
    }
  }

  /// Rebuild the UI-state payload these options came from; the push
  /// direction of [`from_ui_state`](Self::from_ui_state).
  pub fn to_ui_state(&self) -> UiState {
    let mut include_type = Vec::new();
    if !self.skip_variables {
      include_type.push("variable".to_string());
    }
    if !self.skip_resources {
      include_type.push("resource".to_string());
    }
    if !self.skip_resource_types {
      include_type.push("resourcetype".to_string());
    }
    if !self.skip_secrets {
      include_type.push("secret".to_string());
    }
    if self.include_schedules {
      include_type.push("schedule".to_string());
    }
    if self.include_triggers {
      include_type.push("trigger".to_string());
    }
    if self.include_users {
      include_type.push("user".to_string());
    }
    if self.include_groups {
      include_type.push("group".to_string());
    }
    if self.include_settings {
      include_type.push("settings".to_string());
    }
    if self.include_key {
      include_type.push("key".to_string());
    }
    UiState {
      include_path: self.includes.clone(),
      include_type,
    }
  }
}
