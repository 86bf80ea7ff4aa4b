//! Load a script file and summarize its tree

use crate::{encoding, parse_document_bytes, Child, Node, ParseOptions};
use super::CliError;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Path reported in errors and used to name the root node
    pub file_path: String,
    /// Raw file contents
    pub input: Option<Vec<u8>>,
    /// Parser configuration
    pub parse: ParseOptions,
}

/// Element counts of a whole tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub nodes: usize,
    pub leaves: usize,
    pub leaf_values: usize,
    pub comments: usize,
}

impl Summary {
    pub fn of(node: &Node) -> Self {
        let mut summary = Summary::default();
        summary.add(node);
        summary
    }

    fn add(&mut self, node: &Node) {
        for child in node.children() {
            match child {
                Child::Leaf(_) => self.leaves += 1,
                Child::LeafValue(_) => self.leaf_values += 1,
                Child::Comment(_) => self.comments += 1,
                Child::Node(inner) => {
                    self.nodes += 1;
                    self.add(inner);
                }
            }
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes, {} leaves, {} values, {} comments",
            self.nodes, self.leaves, self.leaf_values, self.comments
        )
    }
}

/// Decode and parse the input described by `options`.
pub fn load_document(options: &CheckOptions) -> Result<Node, CliError> {
    let bytes = options.input.as_ref().ok_or(CliError::NoInput)?;
    encoding::register_legacy_encodings();
    Ok(parse_document_bytes(&options.file_path, bytes, &options.parse)?)
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<Summary, CliError> {
    let root = load_document(options)?;
    Ok(Summary::of(&root))
}
