use gristmill_flow::{FlowModule, FlowModuleValue};

/// Visit every module in the tree depth-first, pre-order, in declaration
/// order: loop bodies after their loop, each branch in listed order,
/// `branchone` branches before its default sequence.
///
/// Both mapping recovery and extraction follow this traversal shape, so
/// paths recovered from a synced tree line up with the order they were
/// assigned in.
pub fn visit_modules<'a, F>(modules: &'a [FlowModule], f: &mut F)
where
  F: FnMut(&'a FlowModule),
{
  for module in modules {
    f(module);
    match &module.value {
      FlowModuleValue::ForloopFlow { modules } | FlowModuleValue::WhileloopFlow { modules } => {
        visit_modules(modules, f);
      }
      FlowModuleValue::BranchAll { branches } => {
        for branch in branches {
          visit_modules(&branch.modules, f);
        }
      }
      FlowModuleValue::BranchOne { branches, default } => {
        for branch in branches {
          visit_modules(&branch.modules, f);
        }
        visit_modules(default, f);
      }
      FlowModuleValue::RawScript { .. }
      | FlowModuleValue::Script { .. }
      | FlowModuleValue::Flow { .. }
      | FlowModuleValue::Identity => {}
    }
  }
}
