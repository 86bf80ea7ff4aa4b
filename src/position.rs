use std::fmt;
use std::sync::Arc;

/// A 1-based line/column pair in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A source range attached to every statement and tree element.
///
/// The file name is shared between all positions produced from one file, so
/// cloning a position never copies the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub file: Arc<str>,
    pub start: Location,
    /// End of the range (exclusive)
    pub end: Location,
}

impl Position {
    pub fn new(file: Arc<str>, start: Location, end: Location) -> Self {
        Position { file, start, end }
    }

    /// The position used for programmatically created elements.
    pub fn zero() -> Self {
        Position {
            file: Arc::from(""),
            start: Location::default(),
            end: Location::default(),
        }
    }

    /// An empty range at the start of `file`.
    pub fn file_start(file: Arc<str>) -> Self {
        Position {
            file,
            start: Location::default(),
            end: Location::default(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.start == Location::default() && self.end == Location::default()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}:{}", self.file, self.start)
        } else {
            write!(f, "{}:{}-{}", self.file, self.start, self.end)
        }
    }
}
