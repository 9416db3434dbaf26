use std::collections::HashMap;

use gristmill_flow::{Branch, FlowModule, FlowModuleValue, TsRuntime};

use crate::assign::assign_path;
use crate::error::ExtractError;
use crate::mapping::PathMapping;

/// Sentinel prefix marking a `content`/`lock` field as extracted to a file.
pub const INLINE_PREFIX: &str = "!inline ";

/// A file to be written alongside the flow document.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
  pub path: String,
  pub content: String,
}

/// Result of decomposing a flow tree: the rewritten tree plus the files
/// its script bodies were extracted into.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
  pub modules: Vec<FlowModule>,
  pub files: Vec<FileRecord>,
}

/// Decompose `modules` into a flat list of files, rewriting every
/// `rawscript` leaf to reference its file through an inline marker.
///
/// Paths already present in `mapping` are reused, so re-extracting a flow
/// that was synced before assigns no new paths and produces no spurious
/// renames. Leaves absent from the mapping get `assign_path(id)` paths.
/// A non-empty `lock` is extracted to a sibling file sharing the script's
/// base path with `lock` appended.
///
/// The input tree is consumed and a rewritten copy returned; the caller's
/// view of the flow never changes underneath it. Two modules resolving to
/// the same path abort the whole extraction.
pub fn extract_inline_scripts(
  modules: Vec<FlowModule>,
  mapping: &PathMapping,
  separator: char,
  default_ts: TsRuntime,
) -> Result<Extraction, ExtractError> {
  let mut extractor = Extractor {
    mapping,
    separator,
    default_ts,
    files: Vec::new(),
    claimed: HashMap::new(),
  };
  let modules = extractor.extract_modules(modules)?;
  Ok(Extraction {
    modules,
    files: extractor.files,
  })
}

struct Extractor<'a> {
  mapping: &'a PathMapping,
  separator: char,
  default_ts: TsRuntime,
  files: Vec<FileRecord>,
  /// path -> id of the module that claimed it.
  claimed: HashMap<String, String>,
}

impl Extractor<'_> {
  fn extract_modules(
    &mut self,
    modules: Vec<FlowModule>,
  ) -> Result<Vec<FlowModule>, ExtractError> {
    modules
      .into_iter()
      .map(|m| self.extract_module(m))
      .collect()
  }

  fn extract_module(&mut self, mut module: FlowModule) -> Result<FlowModule, ExtractError> {
    module.value = match module.value {
      FlowModuleValue::RawScript {
        content,
        lock,
        language,
      } => {
        let (base, ext) = assign_path(&module.id, &language, self.default_ts)?;
        let path = match self.mapping.get(&module.id) {
          Some(existing) => existing.clone(),
          None => format!("{base}{ext}"),
        };
        self.claim(&module.id, &path)?;
        self.files.push(FileRecord {
          path: path.clone(),
          content,
        });
        let content = self.marker(&path);

        let lock = match lock {
          Some(lock) if !lock.is_empty() => {
            let lock_path = format!("{base}lock");
            self.claim(&module.id, &lock_path)?;
            self.files.push(FileRecord {
              path: lock_path.clone(),
              content: lock,
            });
            Some(self.marker(&lock_path))
          }
          other => other,
        };

        FlowModuleValue::RawScript {
          content,
          lock,
          language,
        }
      }
      FlowModuleValue::ForloopFlow { modules } => FlowModuleValue::ForloopFlow {
        modules: self.extract_modules(modules)?,
      },
      FlowModuleValue::WhileloopFlow { modules } => FlowModuleValue::WhileloopFlow {
        modules: self.extract_modules(modules)?,
      },
      FlowModuleValue::BranchAll { branches } => FlowModuleValue::BranchAll {
        branches: self.extract_branches(branches)?,
      },
      FlowModuleValue::BranchOne { branches, default } => FlowModuleValue::BranchOne {
        branches: self.extract_branches(branches)?,
        default: self.extract_modules(default)?,
      },
      other => other,
    };
    Ok(module)
  }

  fn extract_branches(&mut self, branches: Vec<Branch>) -> Result<Vec<Branch>, ExtractError> {
    branches
      .into_iter()
      .map(|mut branch| {
        branch.modules = self.extract_modules(branch.modules)?;
        Ok(branch)
      })
      .collect()
  }

  fn claim(&mut self, id: &str, path: &str) -> Result<(), ExtractError> {
    if let Some(previous) = self.claimed.insert(path.to_string(), id.to_string())
      && previous != id
    {
      return Err(ExtractError::PathCollision {
        path: path.to_string(),
        first: previous,
        second: id.to_string(),
      });
    }
    Ok(())
  }

  fn marker(&self, path: &str) -> String {
    let normalized = path.replace(self.separator, "/");
    format!("{INLINE_PREFIX}{normalized}")
  }
}

/// Parse the path out of an inline marker, if `content` is one.
pub fn parse_marker(content: &str) -> Option<&str> {
  content
    .trim()
    .strip_prefix(INLINE_PREFIX)?
    .split_whitespace()
    .next()
}

#[cfg(test)]
mod tests {
  use gristmill_flow::ScriptLang;

  use super::*;

  fn raw_module(id: &str, content: &str, lock: Option<&str>) -> FlowModule {
    FlowModule {
      id: id.to_string(),
      summary: None,
      value: FlowModuleValue::RawScript {
        content: content.to_string(),
        lock: lock.map(str::to_string),
        language: ScriptLang::Python3,
      },
    }
  }

  #[test]
  fn test_single_leaf_extraction() {
    let modules = vec![raw_module("a", "print(1)", None)];
    let extraction =
      extract_inline_scripts(modules, &PathMapping::new(), '/', TsRuntime::Bun).unwrap();

    assert_eq!(
      extraction.files,
      vec![FileRecord {
        path: "a.py".to_string(),
        content: "print(1)".to_string(),
      }]
    );
    match &extraction.modules[0].value {
      FlowModuleValue::RawScript { content, .. } => assert_eq!(content, "!inline a.py"),
      other => panic!("expected rawscript, got {other:?}"),
    }
  }

  #[test]
  fn test_lock_extracted_next_to_script() {
    let modules = vec![raw_module("a", "print(1)", Some("locked-deps"))];
    let extraction =
      extract_inline_scripts(modules, &PathMapping::new(), '/', TsRuntime::Bun).unwrap();

    let paths: Vec<&str> = extraction.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, ["a.py", "a.lock"]);
    match &extraction.modules[0].value {
      FlowModuleValue::RawScript { lock, .. } => {
        assert_eq!(lock.as_deref(), Some("!inline a.lock"));
      }
      other => panic!("expected rawscript, got {other:?}"),
    }
  }

  #[test]
  fn test_empty_lock_is_left_alone() {
    let modules = vec![raw_module("a", "print(1)", Some(""))];
    let extraction =
      extract_inline_scripts(modules, &PathMapping::new(), '/', TsRuntime::Bun).unwrap();

    assert_eq!(extraction.files.len(), 1);
    match &extraction.modules[0].value {
      FlowModuleValue::RawScript { lock, .. } => assert_eq!(lock.as_deref(), Some("")),
      other => panic!("expected rawscript, got {other:?}"),
    }
  }

  #[test]
  fn test_mapping_overrides_assigned_path() {
    let mut mapping = PathMapping::new();
    mapping.insert("a".to_string(), "legacy_name.py".to_string());

    let modules = vec![raw_module("a", "print(1)", None)];
    let extraction = extract_inline_scripts(modules, &mapping, '/', TsRuntime::Bun).unwrap();
    assert_eq!(extraction.files[0].path, "legacy_name.py");
  }

  #[test]
  fn test_path_collision_is_fatal() {
    let mut mapping = PathMapping::new();
    mapping.insert("a".to_string(), "same.py".to_string());
    mapping.insert("b".to_string(), "same.py".to_string());

    let modules = vec![
      raw_module("a", "print(1)", None),
      raw_module("b", "print(2)", None),
    ];
    let err = extract_inline_scripts(modules, &mapping, '/', TsRuntime::Bun).unwrap_err();
    match err {
      ExtractError::PathCollision {
        path,
        first,
        second,
      } => {
        assert_eq!(path, "same.py");
        assert_eq!((first.as_str(), second.as_str()), ("a", "b"));
      }
      other => panic!("expected collision, got {other:?}"),
    }
  }

  #[test]
  fn test_separator_normalized_in_marker() {
    let mut mapping = PathMapping::new();
    mapping.insert("a".to_string(), "steps\\a.py".to_string());

    let modules = vec![raw_module("a", "print(1)", None)];
    let extraction = extract_inline_scripts(modules, &mapping, '\\', TsRuntime::Bun).unwrap();
    match &extraction.modules[0].value {
      FlowModuleValue::RawScript { content, .. } => {
        assert_eq!(content, "!inline steps/a.py");
      }
      other => panic!("expected rawscript, got {other:?}"),
    }
  }

  #[test]
  fn test_references_pass_through_untouched() {
    let modules = vec![
      FlowModule {
        id: "s".to_string(),
        summary: None,
        value: FlowModuleValue::Script {
          path: "f/shared/util".to_string(),
        },
      },
      FlowModule {
        id: "i".to_string(),
        summary: None,
        value: FlowModuleValue::Identity,
      },
    ];
    let extraction =
      extract_inline_scripts(modules.clone(), &PathMapping::new(), '/', TsRuntime::Bun).unwrap();
    assert!(extraction.files.is_empty());
    assert_eq!(extraction.modules, modules);
  }

  #[test]
  fn test_parse_marker() {
    assert_eq!(parse_marker("!inline a.py"), Some("a.py"));
    assert_eq!(parse_marker("  !inline steps/a.py  "), Some("steps/a.py"));
    assert_eq!(parse_marker("!inline "), None);
    assert_eq!(parse_marker("print(1)"), None);
  }
}
