//! Statement processor: turns raw statements into a [`Node`] tree.

use std::sync::Arc;

use tracing::trace;

use crate::{
    ast::{Key, KeyValueItem, Statement},
    error::ProcessError,
    position::Position,
    tree::{Comment, Leaf, LeafValue, Node},
    value::Value,
};

/// Build the root node of a file from its statements.
///
/// The root is keyed by `file_name`; its position names `file_path`. Each
/// child is indexed as it is appended, so the returned tree is fully indexed.
///
/// # Examples
///
/// ```
/// use paradox_script::{parse, process};
///
/// let statements = parse("test.txt", "# c\nkey1 = value1\nnode1 = { key2 = value2 }").unwrap();
/// let root = process("test.txt", "common/test.txt", statements).unwrap();
///
/// assert_eq!(root.key(), "test.txt");
/// assert_eq!(root.leaves().count(), 1);
/// assert_eq!(root.comments().next().map(|c| c.text()), Some(" c"));
/// ```
pub fn process(
    file_name: &str,
    file_path: &str,
    statements: Vec<Statement>,
) -> Result<Node, ProcessError> {
    let mut root = Node::with_position(
        file_name,
        Default::default(),
        Position::file_start(Arc::from(file_path)),
    );
    process_block(&mut root, statements)?;
    Ok(root)
}

fn process_block(node: &mut Node, statements: Vec<Statement>) -> Result<(), ProcessError> {
    trace!(key = node.key(), statements = statements.len(), "processing block");

    for statement in statements {
        match statement {
            Statement::Comment { position, text } => {
                node.add_child(Comment::new(text, position));
            }
            Statement::KeyValue { position, item } => {
                if item.key.name.is_empty() {
                    return Err(ProcessError::EmptyKey { position });
                }
                match item {
                    KeyValueItem {
                        key,
                        value: Value::Clause(inner),
                        operator,
                    } => {
                        let mut child = Node::with_position(key, operator, position);
                        process_block(&mut child, inner)?;
                        node.add_child(child);
                    }
                    item => {
                        node.add_child(Leaf::create(item, position));
                    }
                }
            }
            Statement::Value {
                position,
                value: Value::Clause(inner),
            } => {
                let mut child = Node::with_position(Key::new(""), Default::default(), position);
                process_block(&mut child, inner)?;
                node.add_child(child);
            }
            Statement::Value { position, value } => {
                node.add_child(LeafValue::new(value, position));
            }
        }
    }

    Ok(())
}
