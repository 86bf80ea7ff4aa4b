use std::sync::Arc;

use crate::ast::{Operator, Spanned, Token};
use crate::error::ParserError;
use crate::position::Location;

/// Characters that end an unquoted token.
fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '{' | '}' | '=' | '<' | '>' | '!' | '#' | '"' | '\u{feff}')
}

pub struct Lexer {
    file_name: Arc<str>,
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(file_name: &str, input: &str) -> Self {
        Lexer {
            file_name: Arc::from(file_name),
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn file_name(&self) -> &Arc<str> {
        &self.file_name
    }

    /// Where the next character will be read from.
    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.position += 1;
        }
    }

    fn error(&self, location: Location, message: impl Into<String>) -> ParserError {
        ParserError::at(&self.file_name, location, message)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() || ch == '\u{feff}' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_comment(&mut self) -> String {
        self.advance(); // Consume '#'
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            result.push(ch);
            self.advance();
        }
        if result.ends_with('\r') {
            result.pop();
        }
        result
    }

    fn read_quoted(&mut self) -> Result<String, ParserError> {
        let start = self.location();
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance(); // Consume backslash
                    match self.current_char() {
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        Some(other) => {
                            result.push('\\');
                            result.push(other);
                        }
                        None => break,
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(self.error(start, "Unterminated string: missing closing quote"))
    }

    fn read_bare(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if is_delimiter(ch) {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }

    /// Reads a one- or two-character operator whose first character is current.
    fn read_operator(&mut self, single: Operator, with_equals: Operator) -> Token {
        self.advance();
        if self.current_char() == Some('=') {
            self.advance();
            Token::Operator(with_equals)
        } else {
            Token::Operator(single)
        }
    }

    pub fn next_token(&mut self) -> Result<Spanned, ParserError> {
        self.skip_whitespace();
        let start = self.location();

        let token = match self.current_char() {
            None => Token::Eof,
            Some('#') => Token::Comment(self.read_comment()),
            Some('{') => {
                self.advance();
                Token::LBrace
            }
            Some('}') => {
                self.advance();
                Token::RBrace
            }
            Some('=') => self.read_operator(Operator::Equals, Operator::EqualEqual),
            Some('<') => self.read_operator(Operator::LessThan, Operator::LessThanOrEqual),
            Some('>') => self.read_operator(Operator::GreaterThan, Operator::GreaterThanOrEqual),
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::Operator(Operator::NotEqual)
                } else {
                    return Err(self.error(start, "Unexpected '!' (did you mean '!='?)"));
                }
            }
            Some('"') => Token::Quoted(self.read_quoted()?),
            Some(_) => Token::Bare(self.read_bare()),
        };

        Ok(Spanned {
            token,
            start,
            end: self.location(),
        })
    }
}

#[test]
fn test_operators() {
    let mut lexer = Lexer::new("test.txt", "= == < <= > >= !=");
    for expected in Operator::ALL {
        assert_eq!(lexer.next_token().unwrap().token, Token::Operator(expected));
    }
    assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
}

#[test]
fn test_locations() {
    let mut lexer = Lexer::new("test.txt", "a = b\n  c");
    let a = lexer.next_token().unwrap();
    assert_eq!((a.start, a.end), (Location::new(1, 1), Location::new(1, 2)));
    lexer.next_token().unwrap();
    let b = lexer.next_token().unwrap();
    assert_eq!(b.start, Location::new(1, 5));
    let c = lexer.next_token().unwrap();
    assert_eq!(c.start, Location::new(2, 3));
}
