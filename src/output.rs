//! JSON dump of a processed tree, for inspection.
//!
//! Scripts repeat keys and interleave comments, so a node is not a JSON
//! object keyed by child keys. Each node becomes an object holding its key,
//! operator and an ordered `children` array:
//!
//! ```text
//! {"key":"state","operator":"=","children":[
//!   {"comment":" was: 5"},
//!   {"key":"id","operator":"=","value":607},
//!   {"value":1004}
//! ]}
//! ```
//!
//! Decimals are emitted as JSON numbers and may lose precision there; use
//! [`crate::Value::to_raw_string`] for the exact text.

use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value as Json};

use crate::tree::{Child, Node};
use crate::value::Value;

pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::String(s) | Value::QString(s) => Json::String(s.clone()),
        Value::Int(n) => Json::Number((*n).into()),
        Value::Float(d) => d
            .to_f64()
            .and_then(Number::from_f64)
            .map(Json::Number)
            .unwrap_or_else(|| Json::String(d.to_string())),
        Value::Bool(b) => Json::Bool(*b),
        Value::Clause(_) => Json::String(value.to_string()),
    }
}

pub fn child_to_json(child: &Child) -> Json {
    let mut object = Map::new();
    match child {
        Child::Leaf(leaf) => {
            object.insert("key".into(), Json::String(leaf.key().to_string()));
            object.insert("operator".into(), Json::String(leaf.operator().to_string()));
            object.insert("value".into(), value_to_json(leaf.value()));
        }
        Child::Node(node) => return node_to_json(node),
        Child::Comment(comment) => {
            object.insert("comment".into(), Json::String(comment.text().to_string()));
        }
        Child::LeafValue(item) => {
            object.insert("value".into(), value_to_json(item.value()));
        }
    }
    Json::Object(object)
}

pub fn node_to_json(node: &Node) -> Json {
    let mut object = Map::new();
    object.insert("key".into(), Json::String(node.key().to_string()));
    object.insert("operator".into(), Json::String(node.operator().to_string()));
    object.insert(
        "children".into(),
        Json::Array(node.children().iter().map(child_to_json).collect()),
    );
    Json::Object(object)
}

/// Compact JSON string.
pub fn to_json(node: &Node) -> String {
    node_to_json(node).to_string()
}

/// JSON string with 2-space indentation.
pub fn to_json_pretty(node: &Node) -> String {
    format!("{:#}", node_to_json(node))
}
