//! Gristmill Sync
//!
//! This crate is the filesystem mirroring core of gristmill. It decomposes
//! a flow document's nested control-flow tree into flat, independently
//! editable files, one per embedded script body, and reassembles the
//! document from those files on the way back.
//!
//! Extraction replaces each script body with an inline marker
//! (`"!inline <path>"`) referencing the extracted file. The markers are the
//! only persisted record of the id→path assignment: on the next sync the
//! mapping is recovered from them, so paths stay stable across repeated
//! sync cycles and an unchanged flow produces zero diffs.
//!
//! The tree transforms are pure and synchronous; only the materialization
//! layer touches the filesystem.

mod assign;
mod error;
mod extract;
mod mapping;
mod materialize;
mod walk;

pub use assign::assign_path;
pub use error::{AssignError, ExtractError, SyncIoError};
pub use extract::{extract_inline_scripts, parse_marker, Extraction, FileRecord, INLINE_PREFIX};
pub use mapping::{extract_current_mapping, PathMapping};
pub use materialize::{assemble_flow, write_flow, WrittenFlow, FLOW_FILENAME};
pub use walk::visit_modules;
