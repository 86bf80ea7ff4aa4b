//! CLI support for paradox-script
//!
//! File reading, decoding and reporting for the `pdx` binary. The library
//! core never touches the file system; everything that does lives here.

mod check;
mod query;

pub use check::{execute_check, load_document, CheckOptions, Summary};
pub use query::{execute_get, find_path};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Parser error
    Parse(crate::ParserError),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
    /// Key path matched nothing
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Pass a file or pipe a script to stdin."),
            CliError::NotFound(path) => write!(f, "Nothing found at '{}'", path),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::ParserError> for CliError {
    fn from(e: crate::ParserError) -> Self {
        CliError::Parse(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
