use std::mem;

use tracing::debug;

use crate::{
    ast::{Key, KeyValueItem, Operator, Spanned, Statement, Token},
    error::ParserError,
    lexer::Lexer,
    position::{Location, Position},
    value::Value,
};

/// Parse a script file into its raw statements.
///
/// Malformed input is reported as a [`ParserError`]; this never panics.
///
/// # Examples
///
/// ```
/// use paradox_script::{parse, Statement};
///
/// let statements = parse("test.txt", "key1 = value1 # trailing").unwrap();
/// assert_eq!(statements.len(), 2);
/// assert!(matches!(statements[1], Statement::Comment { .. }));
///
/// let err = parse("test.txt", "node = {\n  key = value\n").unwrap_err();
/// assert_eq!((err.line, err.column), (1, 8));
/// ```
pub fn parse(file_name: &str, text: &str) -> Result<Vec<Statement>, ParserError> {
    debug!(file_name, len = text.len(), "parsing");
    let mut parser = Parser::new(Lexer::new(file_name, text))?;
    let statements = parser.parse_statements()?;
    debug!(file_name, statements = statements.len(), "parsed");
    Ok(statements)
}

/// Deepest block nesting accepted. Every later stage walks blocks
/// recursively, so this also bounds their stack use.
pub const MAX_DEPTH: usize = 128;

pub struct Parser {
    lexer: Lexer,
    current: Spanned,
    previous_end: Location,
    depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParserError> {
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            previous_end: Location::new(1, 1),
            depth: 0,
        })
    }

    /// Consume the current token and return it.
    fn advance(&mut self) -> Result<Spanned, ParserError> {
        let next = self.lexer.next_token()?;
        let consumed = mem::replace(&mut self.current, next);
        self.previous_end = consumed.end;
        Ok(consumed)
    }

    fn position(&self, start: Location, end: Location) -> Position {
        Position::new(self.lexer.file_name().clone(), start, end)
    }

    fn error(&self, location: Location, message: impl Into<String>) -> ParserError {
        ParserError::at(self.lexer.file_name(), location, message)
    }

    /// Parse a complete file
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>, ParserError> {
        self.parse_body(None)
    }

    /// Parse statements up to the end of input, or up to the `}` matching the
    /// `{` at `opener`.
    fn parse_body(&mut self, opener: Option<Location>) -> Result<Vec<Statement>, ParserError> {
        if let Some(open) = opener {
            if self.depth == MAX_DEPTH {
                return Err(self.error(open, "Blocks nested too deeply"));
            }
            self.depth += 1;
        }
        let mut statements = vec![];

        loop {
            match (&self.current.token, opener) {
                (Token::Eof, None) => break,
                (Token::Eof, Some(open)) => {
                    return Err(self.error(open, "Unterminated block: missing closing '}'"));
                }
                (Token::RBrace, Some(_)) => {
                    self.advance()?;
                    break;
                }
                (Token::RBrace, None) => {
                    return Err(self.error(self.current.start, "Unexpected '}' without matching '{'"));
                }
                _ => statements.push(self.parse_statement()?),
            }
        }

        if opener.is_some() {
            self.depth -= 1;
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        let Spanned { token, start, end } = self.advance()?;

        match token {
            Token::Comment(text) => Ok(Statement::Comment {
                position: self.position(start, end),
                text,
            }),
            Token::LBrace => {
                let statements = self.parse_body(Some(start))?;
                Ok(Statement::Value {
                    position: self.position(start, self.previous_end),
                    value: Value::Clause(statements),
                })
            }
            Token::Bare(text) => match self.current.token {
                Token::Operator(op) => self.parse_key_value(Key::new(text), op, start),
                _ => Ok(Statement::Value {
                    position: self.position(start, end),
                    value: Value::from_bare(&text),
                }),
            },
            Token::Quoted(text) => match self.current.token {
                Token::Operator(_) if text.is_empty() => Err(self.error(start, "Empty quoted key")),
                Token::Operator(op) => self.parse_key_value(Key::quoted(text), op, start),
                _ => Ok(Statement::Value {
                    position: self.position(start, end),
                    value: Value::QString(text),
                }),
            },
            Token::Operator(op) => Err(self.error(start, format!("Expected a key before '{}'", op))),
            other => Err(self.error(start, format!("Unexpected {}", other.describe()))),
        }
    }

    /// Parse `OP value` after `key`; the operator is the current token.
    fn parse_key_value(
        &mut self,
        key: Key,
        operator: Operator,
        start: Location,
    ) -> Result<Statement, ParserError> {
        self.advance()?; // Consume operator
        let Spanned {
            token,
            start: value_start,
            ..
        } = self.advance()?;

        let value = match token {
            Token::Bare(text) => Value::from_bare(&text),
            Token::Quoted(text) => Value::QString(text),
            Token::LBrace => Value::Clause(self.parse_body(Some(value_start))?),
            other => {
                return Err(self.error(
                    value_start,
                    format!("Expected a value after '{}', found {}", operator, other.describe()),
                ));
            }
        };

        Ok(Statement::KeyValue {
            position: self.position(start, self.previous_end),
            item: KeyValueItem {
                key,
                value,
                operator,
            },
        })
    }
}
