use std::path::Path;

use tokio::fs;

use gristmill_flow::{FlowModule, FlowModuleValue, FlowValue, OpenFlow, TsRuntime};

use crate::error::SyncIoError;
use crate::extract::{extract_inline_scripts, parse_marker, Extraction};
use crate::mapping::{extract_current_mapping, PathMapping};

/// Name of the flow document inside a mirrored flow directory.
pub const FLOW_FILENAME: &str = "flow.yaml";

/// Summary of one flow materialization.
#[derive(Debug)]
pub struct WrittenFlow {
  /// The rewritten flow as persisted, markers in place of script bodies.
  pub flow: OpenFlow,
  /// Relative paths written this pass.
  pub written: Vec<String>,
  /// Relative paths whose on-disk content already matched.
  pub skipped: Vec<String>,
}

/// Mirror a flow document into `dir` as `flow.yaml` plus one file per
/// embedded script body (and lock).
///
/// Paths are seeded from the markers of an existing `flow.yaml` in `dir`,
/// so re-syncing an unchanged flow rewrites nothing and renames nothing.
/// Each file is written to a `.tmp` sibling and renamed into place;
/// files whose content already matches are not touched at all.
pub async fn write_flow(
  dir: &Path,
  flow: OpenFlow,
  default_ts: TsRuntime,
) -> Result<WrittenFlow, SyncIoError> {
  let mapping = existing_mapping(dir).await;
  let OpenFlow {
    summary,
    description,
    value,
    schema,
  } = flow;
  let Extraction { modules, files } =
    extract_inline_scripts(value.modules, &mapping, '/', default_ts)?;
  let flow = OpenFlow {
    summary,
    description,
    value: FlowValue { modules },
    schema,
  };

  fs::create_dir_all(dir).await.map_err(|source| SyncIoError::Write {
    path: dir.display().to_string(),
    source,
  })?;

  let mut written = Vec::new();
  let mut skipped = Vec::new();
  for file in &files {
    if write_if_changed(&dir.join(&file.path), &file.content).await? {
      written.push(file.path.clone());
    } else {
      skipped.push(file.path.clone());
    }
  }

  let yaml = serde_yaml::to_string(&flow)?;
  if write_if_changed(&dir.join(FLOW_FILENAME), &yaml).await? {
    written.push(FLOW_FILENAME.to_string());
  } else {
    skipped.push(FLOW_FILENAME.to_string());
  }

  Ok(WrittenFlow {
    flow,
    written,
    skipped,
  })
}

/// Reassemble a flow document from a mirrored directory, resolving every
/// inline marker by reading the referenced file back into the tree.
pub async fn assemble_flow(dir: &Path) -> Result<OpenFlow, SyncIoError> {
  let path = dir.join(FLOW_FILENAME);
  let content = fs::read_to_string(&path).await.map_err(|source| SyncIoError::Read {
    path: path.display().to_string(),
    source,
  })?;
  let mut flow: OpenFlow =
    serde_yaml::from_str(&content).map_err(|source| SyncIoError::InvalidFlow {
      path: path.display().to_string(),
      source,
    })?;

  flow.value.modules = resolve_modules(dir, flow.value.modules).await?;
  Ok(flow)
}

/// Recover the id→path mapping from a previously mirrored `flow.yaml`,
/// or an empty mapping when none exists yet.
async fn existing_mapping(dir: &Path) -> PathMapping {
  let path = dir.join(FLOW_FILENAME);
  let Ok(content) = fs::read_to_string(&path).await else {
    return PathMapping::new();
  };
  match serde_yaml::from_str::<OpenFlow>(&content) {
    Ok(flow) => extract_current_mapping(&flow.value.modules),
    Err(err) => {
      tracing::warn!(
        path = %path.display(),
        %err,
        "existing flow document unreadable, assigning fresh paths"
      );
      PathMapping::new()
    }
  }
}

/// Write `content` to `path` via a `.tmp` sibling and rename, unless the
/// file already holds exactly `content`. Returns whether a write happened.
async fn write_if_changed(path: &Path, content: &str) -> Result<bool, SyncIoError> {
  if let Ok(existing) = fs::read_to_string(path).await
    && existing == content
  {
    return Ok(false);
  }

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).await.map_err(|source| SyncIoError::Write {
      path: parent.display().to_string(),
      source,
    })?;
  }

  let mut tmp = path.as_os_str().to_os_string();
  tmp.push(".tmp");
  let tmp = Path::new(&tmp);
  fs::write(tmp, content).await.map_err(|source| SyncIoError::Write {
    path: tmp.display().to_string(),
    source,
  })?;
  fs::rename(tmp, path).await.map_err(|source| SyncIoError::Write {
    path: path.display().to_string(),
    source,
  })?;
  Ok(true)
}

async fn resolve_modules(
  dir: &Path,
  modules: Vec<FlowModule>,
) -> Result<Vec<FlowModule>, SyncIoError> {
  let mut out = Vec::with_capacity(modules.len());
  for mut module in modules {
    module.value = match module.value {
      FlowModuleValue::RawScript {
        content,
        lock,
        language,
      } => {
        let content = match parse_marker(&content).map(str::to_string) {
          Some(path) => read_relative(dir, &path).await?,
          None => content,
        };
        let lock = match lock {
          Some(lock) => match parse_marker(&lock).map(str::to_string) {
            Some(path) => Some(read_relative(dir, &path).await?),
            None => Some(lock),
          },
          None => None,
        };
        FlowModuleValue::RawScript {
          content,
          lock,
          language,
        }
      }
      FlowModuleValue::ForloopFlow { modules } => FlowModuleValue::ForloopFlow {
        modules: Box::pin(resolve_modules(dir, modules)).await?,
      },
      FlowModuleValue::WhileloopFlow { modules } => FlowModuleValue::WhileloopFlow {
        modules: Box::pin(resolve_modules(dir, modules)).await?,
      },
      FlowModuleValue::BranchAll { mut branches } => {
        for branch in &mut branches {
          let modules = std::mem::take(&mut branch.modules);
          branch.modules = Box::pin(resolve_modules(dir, modules)).await?;
        }
        FlowModuleValue::BranchAll { branches }
      }
      FlowModuleValue::BranchOne {
        mut branches,
        default,
      } => {
        for branch in &mut branches {
          let modules = std::mem::take(&mut branch.modules);
          branch.modules = Box::pin(resolve_modules(dir, modules)).await?;
        }
        FlowModuleValue::BranchOne {
          branches,
          default: Box::pin(resolve_modules(dir, default)).await?,
        }
      }
      other => other,
    };
    out.push(module);
  }
  Ok(out)
}

async fn read_relative(dir: &Path, rel: &str) -> Result<String, SyncIoError> {
  let path = dir.join(rel);
  fs::read_to_string(&path).await.map_err(|source| SyncIoError::Read {
    path: path.display().to_string(),
    source,
  })
}
