//! End-to-end properties of extraction, mapping recovery, and the
//! filesystem mirror: stable paths across repeated syncs, exact
//! reassembly, and no churn on unchanged flows.

use gristmill_flow::{
  Branch, FlowModule, FlowModuleValue, FlowValue, OpenFlow, ScriptLang, TsRuntime,
};
use gristmill_sync::{
  assemble_flow, extract_current_mapping, extract_inline_scripts, write_flow, PathMapping,
};

fn raw(id: &str, language: ScriptLang, content: &str, lock: Option<&str>) -> FlowModule {
  FlowModule {
    id: id.to_string(),
    summary: None,
    value: FlowModuleValue::RawScript {
      content: content.to_string(),
      lock: lock.map(str::to_string),
      language,
    },
  }
}

/// A tree exercising every container kind: a loop, parallel branches,
/// and conditional branches with a default. Six leaves, two locks.
fn nested_tree() -> Vec<FlowModule> {
  vec![
    raw("fetch", ScriptLang::Python3, "print('fetch')", Some("requests==2.31")),
    FlowModule {
      id: "per_item".to_string(),
      summary: Some("loop over results".to_string()),
      value: FlowModuleValue::ForloopFlow {
        modules: vec![raw("transform", ScriptLang::Bun, "export {}", None)],
      },
    },
    FlowModule {
      id: "fan_out".to_string(),
      summary: None,
      value: FlowModuleValue::BranchAll {
        branches: vec![
          Branch {
            summary: None,
            modules: vec![raw("left", ScriptLang::Go, "package inner", None)],
          },
          Branch {
            summary: None,
            modules: vec![raw("right", ScriptLang::Bash, "echo hi", None)],
          },
        ],
      },
    },
    FlowModule {
      id: "route".to_string(),
      summary: None,
      value: FlowModuleValue::BranchOne {
        branches: vec![Branch {
          summary: Some("matched".to_string()),
          modules: vec![raw("matched", ScriptLang::Deno, "Deno.exit(0)", None)],
        }],
        default: vec![raw(
          "fallback",
          ScriptLang::Snowflake,
          "select 1",
          Some("snowflake-lock"),
        )],
      },
    },
  ]
}

#[test]
fn recovered_mapping_matches_extraction() {
  let extraction =
    extract_inline_scripts(nested_tree(), &PathMapping::new(), '/', TsRuntime::Bun).unwrap();

  let expected: PathMapping = [
    ("fetch", "fetch.py"),
    ("transform", "transform.ts"),
    ("left", "left.go"),
    ("right", "right.sh"),
    ("matched", "matched.deno.ts"),
    ("fallback", "fallback.sf.sql"),
  ]
  .into_iter()
  .map(|(id, path)| (id.to_string(), path.to_string()))
  .collect();

  assert_eq!(extract_current_mapping(&extraction.modules), expected);
}

#[test]
fn second_pass_reassigns_nothing() {
  let first =
    extract_inline_scripts(nested_tree(), &PathMapping::new(), '/', TsRuntime::Bun).unwrap();
  let recovered = extract_current_mapping(&first.modules);

  let second =
    extract_inline_scripts(first.modules.clone(), &recovered, '/', TsRuntime::Bun).unwrap();

  let first_paths: Vec<&str> = first.files.iter().map(|f| f.path.as_str()).collect();
  let second_paths: Vec<&str> = second.files.iter().map(|f| f.path.as_str()).collect();
  assert_eq!(first_paths, second_paths);
  assert_eq!(second.modules, first.modules);
}

#[test]
fn mapping_keeps_paths_stable_when_rules_change() {
  // A path recovered from disk wins over whatever assign_path would
  // produce today, so renames never happen behind the user's back.
  let mut recovered = PathMapping::new();
  recovered.insert("fetch".to_string(), "fetch.python".to_string());

  let modules = vec![raw("fetch", ScriptLang::Python3, "print(1)", None)];
  let extraction = extract_inline_scripts(modules, &recovered, '/', TsRuntime::Bun).unwrap();
  assert_eq!(extraction.files[0].path, "fetch.python");
}

#[test]
fn file_count_is_bounded_by_leaves_and_locks() {
  let extraction =
    extract_inline_scripts(nested_tree(), &PathMapping::new(), '/', TsRuntime::Bun).unwrap();

  // Six leaves, two of which carry locks.
  assert_eq!(extraction.files.len(), 8);
  let lock_files = extraction
    .files
    .iter()
    .filter(|f| f.path.ends_with(".lock"))
    .count();
  assert_eq!(lock_files, 2);
}

#[tokio::test]
async fn mirror_and_reassemble_round_trip() {
  let dir = tempfile::tempdir().unwrap();
  let flow = OpenFlow {
    summary: "nightly import".to_string(),
    description: None,
    value: FlowValue {
      modules: nested_tree(),
    },
    schema: None,
  };

  let result = write_flow(dir.path(), flow.clone(), TsRuntime::Bun)
    .await
    .unwrap();
  // 8 extracted files plus the flow document itself.
  assert_eq!(result.written.len(), 9);
  assert!(result.skipped.is_empty());

  let on_disk = std::fs::read_to_string(dir.path().join("fetch.py")).unwrap();
  assert_eq!(on_disk, "print('fetch')");
  let doc = std::fs::read_to_string(dir.path().join("flow.yaml")).unwrap();
  assert!(doc.contains("!inline fetch.py"));
  assert!(doc.contains("!inline fallback.lock"));

  let assembled = assemble_flow(dir.path()).await.unwrap();
  assert_eq!(assembled, flow);
}

#[tokio::test]
async fn resync_of_unchanged_flow_writes_nothing() {
  let dir = tempfile::tempdir().unwrap();
  let flow = OpenFlow {
    summary: "nightly import".to_string(),
    description: None,
    value: FlowValue {
      modules: nested_tree(),
    },
    schema: None,
  };

  write_flow(dir.path(), flow.clone(), TsRuntime::Bun)
    .await
    .unwrap();
  let second = write_flow(dir.path(), flow, TsRuntime::Bun).await.unwrap();

  assert!(second.written.is_empty(), "second sync rewrote {:?}", second.written);
  assert_eq!(second.skipped.len(), 9);
}
