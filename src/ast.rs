//! # Paradox Script - Raw Syntax
//!
//! Types produced by the lexer and parser before a document is turned into a
//! [`crate::tree::Node`] tree.
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - The closed set of operators joining keys to values
//! - **[statements]** - Keys, key/value items and raw statements
//!
//! ## The Format
//!
//! ```text
//! # a comment runs to the end of the line
//! state = {
//!     id = 607
//!     name = "STATE_607"
//!     buildings_max_level_factor = 1.000
//!     impassable = no
//!     provinces = { 1004 1139 1603 }
//!     history = {
//!         owner = CHI
//!         1938.10.25 = { owner = JAP }
//!     }
//!     local_supplies >= @supply_floor
//! }
//! ```
//!
//! - `key OP value` where `OP` is one of `=`, `==`, `<`, `<=`, `>`, `>=`, `!=`
//! - values are integers, decimals, `yes`/`no`, bare or quoted strings, or a
//!   `{ ... }` block
//! - blocks hold statements, bare list items, nested anonymous blocks and
//!   comments in any mix
//! - keys starting with `@` define constants referenced elsewhere by name
pub mod operators;
pub mod statements;
pub mod tokens;

pub use operators::Operator;
pub use statements::{Key, KeyValueItem, Statement};
pub use tokens::{Spanned, Token};
