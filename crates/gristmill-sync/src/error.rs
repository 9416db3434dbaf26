use thiserror::Error;

/// Errors from resolving a script's on-disk path.
#[derive(Debug, Error)]
pub enum AssignError {
  #[error("unsupported script language: {0}")]
  UnsupportedLanguage(String),
}

/// Errors from decomposing a flow tree into files.
#[derive(Debug, Error)]
pub enum ExtractError {
  #[error("modules '{first}' and '{second}' both resolve to path '{path}'")]
  PathCollision {
    path: String,
    first: String,
    second: String,
  },

  #[error(transparent)]
  Assign(#[from] AssignError),
}

/// Errors from mirroring a flow to or from the filesystem.
#[derive(Debug, Error)]
pub enum SyncIoError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write {path}: {source}")]
  Write {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid flow document {path}: {source}")]
  InvalidFlow {
    path: String,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("could not serialize flow document: {0}")]
  Serialize(#[from] serde_yaml::Error),

  #[error(transparent)]
  Extract(#[from] ExtractError),
}
