use crate::ast::Operator;
use crate::position::Location;

/// Lexical token of a script file.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Unquoted token: a key, a literal or a list item
    ///
    /// # Examples
    /// ```text
    /// state_category
    /// 34289800
    /// 1938.10.25
    /// @pi
    /// ```
    Bare(String),

    /// Double-quoted string, without the quotes and with `\"` and `\\` unescaped
    ///
    /// # Examples
    /// ```text
    /// "STATE_607"
    /// "two words"
    /// ```
    Quoted(String),

    /// Comparison or assignment operator
    Operator(Operator),

    /// Line comment; holds the text after `#` up to the line break
    ///
    /// # Examples
    /// ```text
    /// # comment1
    /// infrastructure = 3 #was: 5
    /// ```
    Comment(String),

    /// Block opener
    LBrace,

    /// Block closer
    RBrace,

    /// End of input
    Eof,
}

impl Token {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Bare(s) => format!("'{}'", s),
            Token::Quoted(s) => format!("\"{}\"", s),
            Token::Operator(op) => format!("'{}'", op),
            Token::Comment(_) => "comment".to_string(),
            Token::LBrace => "'{'".to_string(),
            Token::RBrace => "'}'".to_string(),
            Token::Eof => "end of file".to_string(),
        }
    }
}

/// A token together with the source range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub start: Location,
    /// End of the token (exclusive)
    pub end: Location,
}
