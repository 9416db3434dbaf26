use serde::{Deserialize, Serialize};

use crate::language::ScriptLang;

/// One step of a flow.
///
/// `id` is unique within a flow document; the sync engine keys its id→path
/// mapping on it. After extraction, a `rawscript` leaf's `content` (and
/// `lock`, when present) hold inline markers instead of source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowModule {
  pub id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
  pub value: FlowModuleValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlowModuleValue {
  /// A leaf embedding a script body directly in the flow document.
  RawScript {
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lock: Option<String>,
    language: ScriptLang,
  },
  /// A bounded loop over a single ordered child sequence.
  ForloopFlow { modules: Vec<FlowModule> },
  /// An unbounded loop over a single ordered child sequence.
  WhileloopFlow { modules: Vec<FlowModule> },
  /// N parallel child sequences, all of which run.
  BranchAll { branches: Vec<Branch> },
  /// N conditional child sequences plus the sequence run when none match.
  BranchOne {
    branches: Vec<Branch>,
    default: Vec<FlowModule>,
  },
  /// Reference to a workspace script; nothing is embedded.
  Script { path: String },
  /// Reference to another flow; nothing is embedded.
  Flow { path: String },
  /// Pass-through step.
  Identity,
}

/// One arm of a `branchall` or `branchone` module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
  pub modules: Vec<FlowModule>,
}
