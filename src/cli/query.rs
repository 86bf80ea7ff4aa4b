//! Dotted key-path lookups (`state.history.owner`)

use crate::{output, Child, Node};
use super::CliError;

/// Every child reached by following `path` from `root`. Each segment fans out
/// over duplicate keys, so `history.buildings` finds the `buildings` blocks of
/// every `history` block.
pub fn find_path<'a>(root: &'a Node, path: &str) -> Vec<&'a Child> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        return vec![];
    };

    let mut nodes = vec![root];
    for segment in parents {
        nodes = nodes
            .into_iter()
            .flat_map(|node| node.children_with_key(segment))
            .collect();
    }

    nodes
        .into_iter()
        .flat_map(|node| {
            node.tag_positions(last)
                .iter()
                .filter_map(move |&slot| node.child_at(slot))
        })
        .collect()
}

/// Render every match of `path`: raw text for leaves, compact JSON for blocks.
pub fn execute_get(root: &Node, path: &str) -> Result<Vec<String>, CliError> {
    let found: Vec<String> = find_path(root, path)
        .into_iter()
        .filter_map(|child| match child {
            Child::Leaf(leaf) => Some(leaf.value_text()),
            Child::Node(node) => Some(output::to_json(node)),
            _ => None,
        })
        .collect();

    if found.is_empty() {
        return Err(CliError::NotFound(path.to_string()));
    }
    Ok(found)
}
