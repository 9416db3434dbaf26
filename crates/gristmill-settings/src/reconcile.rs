use std::fmt::Display;
use std::path::Path;

use serde::Serialize;
use tokio::fs;

use crate::backend::SettingsBackend;
use crate::error::SettingsError;
use crate::options::SyncOptions;

/// Name of the local sync configuration file.
pub const CONFIG_FILENAME: &str = "gristmill.yaml";

/// Text reported when local and remote configurations disagree.
const FILES_DIFFER: &str = "Files differ";

/// Mode flags shared by pull and push.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncFlags {
  /// Compare local and remote without applying anything.
  pub diff: bool,
  /// Compute the result without touching disk or the backend.
  pub dry_run: bool,
}

/// Structured result of a pull or push. Failures are values carried in
/// `error`, never panics or errors propagated past this boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncOutcome {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub yaml: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub settings: Option<SyncOptions>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub diff: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl SyncOutcome {
  fn ok() -> Self {
    SyncOutcome {
      success: true,
      ..SyncOutcome::default()
    }
  }

  pub fn failed(error: impl Display) -> Self {
    SyncOutcome {
      success: false,
      error: Some(error.to_string()),
      ..SyncOutcome::default()
    }
  }
}

/// Bring the workspace's git-sync settings into the local configuration.
///
/// `diff` compares against the existing local file, `dry_run` reports the
/// YAML that would be written, otherwise the file is written to `root`.
pub async fn pull(backend: &dyn SettingsBackend, root: &Path, flags: SyncFlags) -> SyncOutcome {
  match pull_inner(backend, root, flags).await {
    Ok(outcome) => outcome,
    Err(err) => SyncOutcome::failed(err),
  }
}

/// Send the local configuration back to the workspace.
///
/// `diff` compares without applying, `dry_run` reports the payload that
/// would be sent, otherwise the backend's settings are replaced.
pub async fn push(backend: &dyn SettingsBackend, root: &Path, flags: SyncFlags) -> SyncOutcome {
  match push_inner(backend, root, flags).await {
    Ok(outcome) => outcome,
    Err(err) => SyncOutcome::failed(err),
  }
}

async fn pull_inner(
  backend: &dyn SettingsBackend,
  root: &Path,
  flags: SyncFlags,
) -> Result<SyncOutcome, SettingsError> {
  let remote = remote_options(backend).await?;

  if flags.diff {
    let local = read_local(root).await?;
    return Ok(SyncOutcome {
      diff: Some(compare(&local, &remote)?),
      ..SyncOutcome::ok()
    });
  }

  let yaml = serde_yaml::to_string(&remote)?;
  if flags.dry_run {
    return Ok(SyncOutcome {
      yaml: Some(yaml),
      settings: Some(remote),
      ..SyncOutcome::ok()
    });
  }

  let path = root.join(CONFIG_FILENAME);
  fs::write(&path, &yaml).await.map_err(|source| SettingsError::Io {
    path: path.display().to_string(),
    source,
  })?;
  Ok(SyncOutcome {
    yaml: Some(yaml),
    message: Some(format!("wrote {CONFIG_FILENAME}")),
    ..SyncOutcome::ok()
  })
}

async fn push_inner(
  backend: &dyn SettingsBackend,
  root: &Path,
  flags: SyncFlags,
) -> Result<SyncOutcome, SettingsError> {
  let local = read_local(root).await?;

  if flags.diff {
    let remote = remote_options(backend).await?;
    return Ok(SyncOutcome {
      diff: Some(compare(&local, &remote)?),
      ..SyncOutcome::ok()
    });
  }

  let payload = local.to_ui_state();
  if flags.dry_run {
    return Ok(SyncOutcome {
      settings: Some(local),
      message: Some("dry run, settings not pushed".to_string()),
      ..SyncOutcome::ok()
    });
  }

  backend.edit_git_sync_config(&payload).await?;
  Ok(SyncOutcome {
    message: Some("pushed git-sync settings".to_string()),
    ..SyncOutcome::ok()
  })
}

async fn remote_options(backend: &dyn SettingsBackend) -> Result<SyncOptions, SettingsError> {
  let settings = backend.get_settings().await?;
  let ui = settings.primary().ok_or(SettingsError::NoRepositories)?;
  Ok(SyncOptions::from_ui_state(ui))
}

async fn read_local(root: &Path) -> Result<SyncOptions, SettingsError> {
  let path = root.join(CONFIG_FILENAME);
  let content = fs::read_to_string(&path).await.map_err(|source| SettingsError::Io {
    path: path.display().to_string(),
    source,
  })?;
  serde_yaml::from_str(&content).map_err(|source| SettingsError::InvalidConfig {
    path: path.display().to_string(),
    source,
  })
}

/// Structural comparison of two configurations.
///
/// Both sides are serialized to JSON and compared as strings; array order
/// (notably `includes`) stays significant.
fn compare(local: &SyncOptions, remote: &SyncOptions) -> Result<String, SettingsError> {
  let local = serde_json::to_string(local)?;
  let remote = serde_json::to_string(remote)?;
  Ok(if local == remote {
    String::new()
  } else {
    FILES_DIFFER.to_string()
  })
}
