//! Error types shared by the parsing pipeline.
//!
//! Every failure a caller of [`crate::parse_document`] can observe is folded
//! into a single [`ParserError`]. The more specific errors below exist so the
//! individual stages stay honest about how they can fail.

use thiserror::Error;

use crate::position::{Location, Position};

/// A lexical or structural failure, or a normalized fault from a later stage.
///
/// Positions are 1-based. A fault with no meaningful position is reported at
/// line 0, column 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file_name}:{line}:{column}: {message}")]
pub struct ParserError {
    pub file_name: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParserError {
    pub fn new(
        file_name: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        ParserError {
            file_name: file_name.into(),
            line,
            column,
            message: message.into(),
        }
    }

    /// An error located at a specific point of the source.
    pub fn at(file_name: &str, location: Location, message: impl Into<String>) -> Self {
        Self::new(file_name, location.line, location.column, message)
    }

    /// Wraps a failure that carries no source position.
    pub fn fault(file_name: &str, message: impl Into<String>) -> Self {
        Self::new(file_name, 0, 0, message)
    }

    pub fn has_position(&self) -> bool {
        self.line != 0 || self.column != 0
    }
}

/// Failures of the statement processor.
///
/// The processor trusts the shape of the statements it receives, but a caller
/// can build statements by hand, so the few shapes the type system cannot
/// rule out are rejected here instead of producing a corrupt tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("{position}: statement has an empty key")]
    EmptyKey { position: Position },
}

impl ProcessError {
    pub fn position(&self) -> &Position {
        match self {
            ProcessError::EmptyKey { position } => position,
        }
    }

    /// Converts into the pipeline's single failure shape, keeping the position.
    pub fn into_parser_error(self, file_name: &str) -> ParserError {
        let location = self.position().start;
        ParserError::at(file_name, location, self.to_string())
    }
}

/// Failures while turning raw bytes into text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Legacy code pages were used before `register_legacy_encodings` ran
    #[error("legacy encodings have not been registered")]
    NotRegistered,

    #[error("unknown encoding label '{0}'")]
    UnknownLabel(String),

    #[error("input is not valid {0}")]
    Malformed(String),
}
