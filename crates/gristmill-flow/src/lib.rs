//! Gristmill Flow
//!
//! This crate contains the serializable flow document types for gristmill.
//! A flow is a tree of control-flow modules (loops, branches) whose leaves
//! embed raw script bodies in one of the platform's supported languages.
//!
//! Flow documents are exchanged with the server as JSON and persisted
//! locally as YAML. The sync engine rewrites `rawscript` leaves to inline
//! markers when mirroring a flow to disk; these types carry either form.

mod flow;
mod language;
mod module;

pub use flow::{FlowValue, OpenFlow};
pub use language::{ScriptLang, TsRuntime};
pub use module::{Branch, FlowModule, FlowModuleValue};
