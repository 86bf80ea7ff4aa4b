//! The processed document tree.
//!
//! A [`Node`] owns an ordered sequence of [`Child`] slots and a [`TagIndex`]
//! over them. The sequence is the only source of document order; the index is
//! patched by every method that changes the sequence, so the two never
//! disagree.

use std::mem;

use crate::ast::{Key, KeyValueItem, Operator};
use crate::position::Position;
use crate::tag_index::TagIndex;
use crate::value::Value;

/// A `key OP value` statement.
///
/// The key and operator are fixed at construction; only the value can be
/// updated, in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    item: KeyValueItem,
    position: Position,
}

impl Leaf {
    pub fn new(key: impl Into<Key>, value: impl Into<Value>, operator: Operator) -> Self {
        Self::create(KeyValueItem::new(key, value.into(), operator), Position::zero())
    }

    pub fn create(item: KeyValueItem, position: Position) -> Self {
        Leaf { item, position }
    }

    pub fn key(&self) -> &str {
        self.item.key.as_str()
    }

    pub fn key_item(&self) -> &Key {
        &self.item.key
    }

    pub fn value(&self) -> &Value {
        &self.item.value
    }

    /// Raw text of the value
    pub fn value_text(&self) -> String {
        self.item.value.to_raw_string()
    }

    pub fn operator(&self) -> Operator {
        self.item.operator
    }

    pub fn item(&self) -> &KeyValueItem {
        &self.item
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Replace the value, returning the previous one.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Value {
        mem::replace(&mut self.item.value, value.into())
    }
}

/// A bare list item, such as each number in `provinces = { 1004 1139 }`.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafValue {
    value: Value,
    position: Position,
}

impl LeafValue {
    pub fn new(value: impl Into<Value>, position: Position) -> Self {
        LeafValue {
            value: value.into(),
            position,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_text(&self) -> String {
        self.value.to_raw_string()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn set_value(&mut self, value: impl Into<Value>) -> Value {
        mem::replace(&mut self.value, value.into())
    }
}

/// A line comment. It belongs to the statement that follows it in the same
/// block (see [`Node::leading_comments`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    text: String,
    position: Position,
}

impl Comment {
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Comment {
            text: text.into(),
            position,
        }
    }

    /// Text after the `#`, leading whitespace included.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
}

/// One slot of a node's child sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Leaf(Leaf),
    Node(Node),
    Comment(Comment),
    LeafValue(LeafValue),
}

impl Child {
    /// `key = value` leaf with the `=` operator.
    pub fn leaf(key: impl Into<Key>, value: impl Into<Value>) -> Self {
        Child::Leaf(Leaf::new(key, value, Operator::Equals))
    }

    pub fn leaf_with(key: impl Into<Key>, value: impl Into<Value>, operator: Operator) -> Self {
        Child::Leaf(Leaf::new(key, value, operator))
    }

    /// An empty block.
    pub fn node(key: impl Into<Key>) -> Self {
        Child::Node(Node::new(key))
    }

    /// The key the tag index files this child under. Comments and bare
    /// values have none.
    pub fn key(&self) -> Option<&str> {
        match self {
            Child::Leaf(leaf) => Some(leaf.key()),
            Child::Node(node) => Some(node.key()),
            Child::Comment(_) | Child::LeafValue(_) => None,
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Child::Leaf(leaf) => leaf.position(),
            Child::Node(node) => node.position(),
            Child::Comment(comment) => comment.position(),
            Child::LeafValue(value) => value.position(),
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Child::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Child::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    pub fn as_leaf_value(&self) -> Option<&LeafValue> {
        match self {
            Child::LeafValue(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Leaf> for Child {
    fn from(leaf: Leaf) -> Self {
        Child::Leaf(leaf)
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<Comment> for Child {
    fn from(comment: Comment) -> Self {
        Child::Comment(comment)
    }
}

impl From<LeafValue> for Child {
    fn from(value: LeafValue) -> Self {
        Child::LeafValue(value)
    }
}

/// A named block and everything in it.
///
/// # Examples
///
/// ```
/// use paradox_script::{Child, Node};
///
/// let mut node = Node::new("state");
/// node.add_child(Child::leaf("id", 607));
/// node.add_child(Child::leaf("owner", "CHI"));
///
/// assert_eq!(node.leaf("id").and_then(|l| l.value().as_int()), Some(607));
/// assert!(node.leaf("missing").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    key: Key,
    operator: Operator,
    position: Position,
    children: Vec<Child>,
    index: TagIndex,
}

impl Node {
    pub fn new(key: impl Into<Key>) -> Self {
        Self::with_position(key, Operator::Equals, Position::zero())
    }

    pub fn with_position(key: impl Into<Key>, operator: Operator, position: Position) -> Self {
        Node {
            key: key.into(),
            operator,
            position,
            children: vec![],
            index: TagIndex::new(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn key_item(&self) -> &Key {
        &self.key
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Every child in document order.
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn child_at(&self, slot: usize) -> Option<&Child> {
        self.children.get(slot)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn tag_index(&self) -> &TagIndex {
        &self.index
    }

    /// Slots of the children carrying `key`, in document order.
    pub fn tag_positions(&self, key: &str) -> &[usize] {
        self.index.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Leaf> {
        self.children.iter().filter_map(Child::as_leaf)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Child::as_node)
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.children.iter().filter_map(Child::as_comment)
    }

    pub fn leaf_values(&self) -> impl Iterator<Item = &LeafValue> {
        self.children.iter().filter_map(Child::as_leaf_value)
    }

    /// First leaf with `key`.
    pub fn leaf(&self, key: &str) -> Option<&Leaf> {
        self.leaves_with_key(key).next()
    }

    pub fn leaves_with_key<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Leaf> + use<'a> {
        self.index
            .get(key)
            .iter()
            .filter_map(move |&slot| self.children[slot].as_leaf())
    }

    /// First child block with `key`.
    pub fn child(&self, key: &str) -> Option<&Node> {
        self.children_with_key(key).next()
    }

    pub fn children_with_key<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Node> + use<'a> {
        self.index
            .get(key)
            .iter()
            .filter_map(move |&slot| self.children[slot].as_node())
    }

    /// Mutable access to the first leaf with `key`. A leaf's key cannot be
    /// changed through it, so the index stays valid.
    pub fn leaf_mut(&mut self, key: &str) -> Option<&mut Leaf> {
        let slot = self
            .index
            .get(key)
            .iter()
            .copied()
            .find(|&slot| matches!(self.children[slot], Child::Leaf(_)))?;
        match &mut self.children[slot] {
            Child::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Mutable access to the first child block with `key`.
    ///
    /// Edit the block through its own methods; assigning a whole new `Node`
    /// with a different key here would leave this node's index stale. Use
    /// [`Node::set_tag_opt`] to swap children.
    pub fn child_mut(&mut self, key: &str) -> Option<&mut Node> {
        let slot = self
            .index
            .get(key)
            .iter()
            .copied()
            .find(|&slot| matches!(self.children[slot], Child::Node(_)))?;
        match &mut self.children[slot] {
            Child::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn leaves_mut(&mut self) -> impl Iterator<Item = &mut Leaf> {
        self.children.iter_mut().filter_map(|child| match child {
            Child::Leaf(leaf) => Some(leaf),
            _ => None,
        })
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.children.iter_mut().filter_map(|child| match child {
            Child::Node(node) => Some(node),
            _ => None,
        })
    }

    pub fn leaf_values_mut(&mut self) -> impl Iterator<Item = &mut LeafValue> {
        self.children.iter_mut().filter_map(|child| match child {
            Child::LeafValue(value) => Some(value),
            _ => None,
        })
    }

    /// The comments directly above the child at `slot`.
    pub fn leading_comments(&self, slot: usize) -> impl Iterator<Item = &Comment> {
        let end = slot.min(self.children.len());
        let start = self.children[..end]
            .iter()
            .rposition(|child| !matches!(child, Child::Comment(_)))
            .map_or(0, |last| last + 1);
        self.children[start..end].iter().filter_map(Child::as_comment)
    }

    // ── Mutation ────────────────────────────────────────────────────

    /// Append a child and index it. Returns its slot.
    pub fn add_child(&mut self, child: impl Into<Child>) -> usize {
        let child = child.into();
        let slot = self.children.len();
        if let Some(key) = child.key() {
            self.index.push(key, slot);
        }
        self.children.push(child);
        slot
    }

    /// Set the value of the first leaf with `key` in place. Returns false
    /// when there is no such leaf.
    pub fn set_leaf_value(&mut self, key: &str, value: impl Into<Value>) -> bool {
        match self.leaf_mut(key) {
            Some(leaf) => {
                leaf.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Replace every child carrying `key` with `child`, finding them by a
    /// front-to-back scan and rebuilding the index afterwards.
    ///
    /// Returns the number of replaced slots; nothing changes if none matched.
    pub fn set_value(&mut self, key: &str, child: impl Into<Child>) -> usize {
        let slots: Vec<usize> = self
            .children
            .iter()
            .enumerate()
            .filter(|(_, c)| c.key() == Some(key))
            .map(|(slot, _)| slot)
            .collect();
        let child = child.into();
        let rekeyed = child.key() != Some(key);

        let replaced = self.replace_slots(&slots, child);
        if replaced > 0 && rekeyed {
            self.index = TagIndex::build(&self.children);
        }
        replaced
    }

    /// Same result as [`Node::set_value`], but finds the slots through the tag
    /// index and patches only the affected entries.
    pub fn set_tag_opt(&mut self, key: &str, child: impl Into<Child>) -> usize {
        let slots = self.index.get(key).to_vec();
        let child = child.into();
        let new_key = child.key().map(str::to_string);

        let replaced = self.replace_slots(&slots, child);
        for &slot in &slots {
            self.index.rekey(slot, Some(key), new_key.as_deref());
        }
        replaced
    }

    fn replace_slots(&mut self, slots: &[usize], child: Child) -> usize {
        let Some((&last, rest)) = slots.split_last() else {
            return 0;
        };
        for &slot in rest {
            self.children[slot] = child.clone();
        }
        self.children[last] = child;
        slots.len()
    }

    /// Remove the child at `slot`, shifting everything after it down by one.
    pub fn remove_child(&mut self, slot: usize) -> Option<Child> {
        if slot >= self.children.len() {
            return None;
        }
        let child = self.children.remove(slot);
        self.index.remove_slot(child.key(), slot);
        Some(child)
    }

    /// Remove every child carrying `key`, returning them in document order.
    pub fn remove_all(&mut self, key: &str) -> Vec<Child> {
        let slots = self.index.get(key).to_vec();
        let mut removed: Vec<Child> = slots
            .into_iter()
            .rev()
            .filter_map(|slot| self.remove_child(slot))
            .collect();
        removed.reverse();
        removed
    }
}
