//! `@name` constant substitution.
//!
//! A leaf whose key starts with `@` defines a constant. Resolution runs two
//! full passes over the tree: the first collects every definition, the second
//! replaces every textual value equal to a constant name with a copy of that
//! constant's value. Because the passes do not interleave, a use may appear
//! before its definition.
//!
//! ```text
//! @pi = 3.14
//! shape = { radius_factor = @pi }    # becomes the decimal 3.14
//! ```
//!
//! Substitution is not transitive: after `@a = @b` and `@b = 1`, the leaf
//! `@a` holds `1`, but a use of `@a` receives the text `@b` that `@a` held
//! when definitions were collected.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::tree::{Child, Node};
use crate::value::Value;

/// Constant values by name, `@` included.
pub type ConstantTable = HashMap<String, Value>;

/// Collect and substitute constants across the whole tree. Returns the
/// number of values replaced.
pub fn resolve_constants(root: &mut Node) -> usize {
    let constants = collect_constants(root);
    if constants.is_empty() {
        return 0;
    }
    let replaced = substitute_constants(root, &constants);
    debug!(constants = constants.len(), replaced, "resolved constants");
    replaced
}

/// Every `@name` leaf in the tree, in document order; a later definition of
/// the same name overrides an earlier one.
pub fn collect_constants(root: &Node) -> ConstantTable {
    let mut constants = ConstantTable::new();
    collect_into(root, &mut constants);
    constants
}

fn collect_into(node: &Node, constants: &mut ConstantTable) {
    for child in node.children() {
        match child {
            Child::Leaf(leaf) if leaf.key_item().is_constant() => {
                trace!(name = leaf.key(), value = %leaf.value(), "constant defined");
                if let Some(previous) = constants.insert(leaf.key().to_string(), leaf.value().clone()) {
                    warn!(name = leaf.key(), %previous, value = %leaf.value(), "constant redefined");
                }
            }
            Child::Node(inner) => collect_into(inner, constants),
            _ => {}
        }
    }
}

/// Replace every leaf and bare value whose text names a constant. Returns the
/// number of values replaced.
pub fn substitute_constants(node: &mut Node, constants: &ConstantTable) -> usize {
    let mut replaced = 0;

    for leaf in node.leaves_mut() {
        if let Some(value) = lookup(leaf.value(), constants) {
            leaf.set_value(value.clone());
            replaced += 1;
        }
    }
    for item in node.leaf_values_mut() {
        if let Some(value) = lookup(item.value(), constants) {
            item.set_value(value.clone());
            replaced += 1;
        }
    }
    for inner in node.nodes_mut() {
        replaced += substitute_constants(inner, constants);
    }

    replaced
}

fn lookup<'a>(value: &Value, constants: &'a ConstantTable) -> Option<&'a Value> {
    // Constant names start with '@', so only textual values can match.
    value.as_text().and_then(|text| constants.get(text))
}
