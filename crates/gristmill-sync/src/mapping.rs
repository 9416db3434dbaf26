use std::collections::BTreeMap;

use gristmill_flow::{FlowModule, FlowModuleValue};

use crate::extract::INLINE_PREFIX;
use crate::walk::visit_modules;

/// id → relative path table that keeps extraction stable across syncs.
pub type PathMapping = BTreeMap<String, String>;

/// Rebuild the id→path table from inline markers already present in a
/// synced tree.
///
/// The markers are the only persistence mechanism for the mapping; there
/// is no manifest on the side. Feeding the result back into
/// [`crate::extract_inline_scripts`] on the next sync preserves the paths
/// already on disk even if path-assignment rules have since changed.
///
/// Leaves whose content is not a marker, and markers missing their path
/// token, are skipped; the latter with a warning.
pub fn extract_current_mapping(modules: &[FlowModule]) -> PathMapping {
  let mut mapping = PathMapping::new();
  visit_modules(modules, &mut |module| {
    if let FlowModuleValue::RawScript { content, .. } = &module.value
      && let Some(rest) = content.trim().strip_prefix(INLINE_PREFIX)
    {
      match rest.split_whitespace().next() {
        Some(path) => {
          mapping.insert(module.id.clone(), path.to_string());
        }
        None => {
          tracing::warn!(module = %module.id, "inline marker without a path, skipping");
        }
      }
    }
  });
  mapping
}

#[cfg(test)]
mod tests {
  use gristmill_flow::{FlowModule, FlowModuleValue, ScriptLang};

  use super::*;

  fn raw_module(id: &str, content: &str) -> FlowModule {
    FlowModule {
      id: id.to_string(),
      summary: None,
      value: FlowModuleValue::RawScript {
        content: content.to_string(),
        lock: None,
        language: ScriptLang::Python3,
      },
    }
  }

  #[test]
  fn test_markers_are_recovered() {
    let modules = vec![
      raw_module("a", "!inline a.py"),
      raw_module("b", "print(2)"),
    ];
    let mapping = extract_current_mapping(&modules);
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.get("a").map(String::as_str), Some("a.py"));
  }

  #[test]
  fn test_marker_without_path_is_skipped() {
    let modules = vec![raw_module("a", "!inline ")];
    assert!(extract_current_mapping(&modules).is_empty());
  }

  #[test]
  fn test_recovery_descends_into_containers() {
    let modules = vec![FlowModule {
      id: "loop".to_string(),
      summary: None,
      value: FlowModuleValue::ForloopFlow {
        modules: vec![raw_module("inner", "!inline inner.py")],
      },
    }];
    let mapping = extract_current_mapping(&modules);
    assert_eq!(mapping.get("inner").map(String::as_str), Some("inner.py"));
  }

  #[test]
  fn test_input_is_not_mutated() {
    let modules = vec![raw_module("a", "!inline a.py")];
    let before = modules.clone();
    extract_current_mapping(&modules);
    assert_eq!(modules, before);
  }
}
