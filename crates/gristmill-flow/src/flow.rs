use serde::{Deserialize, Serialize};

use crate::module::FlowModule;

/// A complete flow document as exchanged with the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenFlow {
  pub summary: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub value: FlowValue,
  /// Input schema of the flow; opaque to the sync engine.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub schema: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowValue {
  pub modules: Vec<FlowModule>,
}
