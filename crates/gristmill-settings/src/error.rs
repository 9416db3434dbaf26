use thiserror::Error;

/// Errors from settings reconciliation.
///
/// These never escape [`crate::pull`] / [`crate::push`]; the orchestrator
/// folds them into a failed [`crate::SyncOutcome`] at its boundary.
#[derive(Debug, Error)]
pub enum SettingsError {
  #[error("invalid settings JSON: {0}")]
  InvalidJson(#[from] serde_json::Error),

  #[error("failed to read {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid sync configuration {path}: {source}")]
  InvalidConfig {
    path: String,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("could not serialize sync configuration: {0}")]
  Serialize(#[from] serde_yaml::Error),

  #[error("workspace has no git-sync repositories configured")]
  NoRepositories,
}
