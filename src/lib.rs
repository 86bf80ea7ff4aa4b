//! # paradox-script
//!
//! Parser and mutable document tree for Paradox-style (Clausewitz) script
//! files: nested `key = value` blocks, bare lists, `#` comments and `@name`
//! constants.
//!
//! The pipeline is `text -> parse -> statements -> process -> Node`, with an
//! optional constant-resolution pass at the end. [`parse_document`] runs all
//! of it.
//!
//! ```
//! use paradox_script::{parse_document, Child, ParseOptions};
//!
//! let text = "state = {\n  id = 607\n  local_supplies = 3.0\n}";
//! let mut root = parse_document("states/607.txt", text, &ParseOptions::default()).unwrap();
//!
//! let state = root.child_mut("state").unwrap();
//! state.set_tag_opt("local_supplies", Child::leaf("local_supplies", 5));
//! assert_eq!(state.leaf("local_supplies").unwrap().value_text(), "5");
//! ```
pub mod ast;
pub mod constants;
pub mod document;
pub mod encoding;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod position;
pub mod process;
pub mod tag_index;
pub mod tree;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Key, KeyValueItem, Operator, Statement, Token};
pub use constants::{collect_constants, resolve_constants, substitute_constants, ConstantTable};
pub use document::{parse_document, parse_document_bytes, ParseOptions};
pub use encoding::register_legacy_encodings;
pub use error::{EncodingError, ParserError, ProcessError};
pub use lexer::Lexer;
pub use parser::{parse, Parser};
pub use position::{Location, Position};
pub use process::process;
pub use tag_index::TagIndex;
pub use tree::{Child, Comment, Leaf, LeafValue, Node};
pub use value::{Value, ValueKind};
