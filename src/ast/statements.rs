use std::fmt;

use crate::ast::Operator;
use crate::position::Position;
use crate::value::Value;

/// Statement key.
///
/// Lookups only ever compare [`Key::name`]; the quoting is remembered so the
/// key can be written back the way it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub name: String,
    pub quoted: bool,
}

impl Key {
    pub fn new(name: impl Into<String>) -> Self {
        Key {
            name: name.into(),
            quoted: false,
        }
    }

    pub fn quoted(name: impl Into<String>) -> Self {
        Key {
            name: name.into(),
            quoted: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// `@name` keys define constants.
    pub fn is_constant(&self) -> bool {
        self.name.starts_with('@')
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::new(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::new(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "\"{}\"", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// The content of one `key OP value` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueItem {
    pub key: Key,
    pub value: Value,
    pub operator: Operator,
}

impl KeyValueItem {
    pub fn new(key: impl Into<Key>, value: Value, operator: Operator) -> Self {
        KeyValueItem {
            key: key.into(),
            value,
            operator,
        }
    }
}

impl fmt::Display for KeyValueItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.operator, self.value)
    }
}

/// Raw statement produced by the parser.
///
/// Blocks are not a statement kind of their own: `key = { ... }` is a
/// [`Statement::KeyValue`] whose value is a [`Value::Clause`], and a bare
/// `{ ... }` is a [`Statement::Value`] holding one.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Line comment
    ///
    /// # Example
    /// ```text
    /// # was: 5
    /// ```
    Comment { position: Position, text: String },

    /// Assignment or comparison
    ///
    /// # Example
    /// ```text
    /// owner = CHI
    /// history = { ... }
    /// ```
    KeyValue {
        position: Position,
        item: KeyValueItem,
    },

    /// Bare list item
    ///
    /// # Example
    /// ```text
    /// provinces = { 1004 1139 1603 }
    /// ```
    Value { position: Position, value: Value },
}

impl Statement {
    pub fn position(&self) -> &Position {
        match self {
            Statement::Comment { position, .. }
            | Statement::KeyValue { position, .. }
            | Statement::Value { position, .. } => position,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Comment { text, .. } => write!(f, "#{}", text),
            Statement::KeyValue { item, .. } => write!(f, "{}", item),
            Statement::Value { value, .. } => write!(f, "{}", value),
        }
    }
}
