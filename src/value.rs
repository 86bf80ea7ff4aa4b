use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::ast::Statement;

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

// Exponents are capped at three digits; anything larger is out of range for
// `Decimal` and stays a string.
static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]*\.[0-9]+(?:[eE][+-]?[0-9]{1,3})?|[0-9]+[eE][+-]?[0-9]{1,3})$").unwrap()
});

fn fraction_digits(text: &str) -> usize {
    text.split_once('.').map_or(0, |(_, fraction)| fraction.len())
}

/// Parse a numeric token into a `Decimal` that holds every written digit.
///
/// `Decimal` rounds what it cannot hold; such tokens return `None` and stay
/// text. Exponent forms get at least one fractional digit, so `1e3` reads
/// back as `1000.0` and is still a decimal when re-parsed.
fn parse_exact_decimal(text: &str) -> Option<Decimal> {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(at) => (&text[..at], Some(&text[at + 1..])),
        None => (text, None),
    };

    let parsed = Decimal::from_str(mantissa).ok()?;
    let fraction = fraction_digits(mantissa);
    if parsed.scale() as usize != fraction {
        return None;
    }
    let Some(exponent) = exponent else {
        return Some(parsed);
    };

    let exponent: i64 = exponent.parse().ok()?;
    let mut value = Decimal::from_scientific(text).ok()?;
    if i64::from(value.scale()) != (fraction as i64 - exponent).max(0) {
        return None;
    }
    if value.scale() == 0 {
        value.rescale(1);
        if value.scale() != 1 {
            return None;
        }
    }
    Some(value)
}

/// A literal value of a script file.
///
/// Integers and decimals are kept apart, and decimals are arbitrary-precision
/// so that `1.000` reads back as `1.000`.
///
/// # Examples
///
/// ```
/// use paradox_script::Value;
///
/// assert_eq!(Value::from_bare("607"), Value::Int(607));
/// assert_eq!(Value::from_bare("yes"), Value::Bool(true));
/// assert_eq!(Value::from_bare("1.000").to_raw_string(), "1.000");
/// assert_eq!(Value::from_bare("1938.10.25"), Value::String("1938.10.25".into()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unquoted text
    String(String),

    /// Double-quoted text (content without the quotes)
    QString(String),

    /// Decimal number
    Float(Decimal),

    /// Integer number
    Int(i64),

    /// `yes` / `no`
    Bool(bool),

    /// `{ ... }` block
    Clause(Vec<Statement>),
}

/// The variant of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    QString,
    Float,
    Int,
    Bool,
    Clause,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::QString => "quoted string",
            ValueKind::Float => "float",
            ValueKind::Int => "integer",
            ValueKind::Bool => "boolean",
            ValueKind::Clause => "clause",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Classify an unquoted token.
    ///
    /// Numbers that do not fit their type fall back to the next wider kind
    /// (integer, then decimal, then string). A decimal that would be rounded
    /// stays a string.
    pub fn from_bare(text: &str) -> Value {
        match text {
            "yes" => return Value::Bool(true),
            "no" => return Value::Bool(false),
            _ => {}
        }

        if INTEGER.is_match(text) {
            if let Ok(n) = text.parse::<i64>() {
                return Value::Int(n);
            }
        }
        if INTEGER.is_match(text) || DECIMAL.is_match(text) {
            if let Some(d) = parse_exact_decimal(text) {
                return Value::Float(d);
            }
        }

        Value::String(text.to_string())
    }

    pub fn qstring(text: impl Into<String>) -> Value {
        Value::QString(text.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::QString(_) => ValueKind::QString,
            Value::Float(_) => ValueKind::Float,
            Value::Int(_) => ValueKind::Int,
            Value::Bool(_) => ValueKind::Bool,
            Value::Clause(_) => ValueKind::Clause,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_clause(&self) -> bool {
        matches!(self, Value::Clause(_))
    }

    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as decimal; integers widen losslessly
    pub fn as_float(&self) -> Option<Decimal> {
        match self {
            Value::Float(d) => Some(*d),
            Value::Int(n) => Some(Decimal::from(*n)),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text of a quoted or unquoted string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::QString(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_clause(&self) -> Option<&[Statement]> {
        match self {
            Value::Clause(statements) => Some(statements),
            _ => None,
        }
    }

    /// The textual form of the value as it would be written, minus the quotes
    /// of a quoted string.
    pub fn to_raw_string(&self) -> String {
        match self {
            Value::String(s) | Value::QString(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::QString(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            Value::Float(d) => write!(f, "{}", d),
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(true) => f.write_str("yes"),
            Value::Bool(false) => f.write_str("no"),
            Value::Clause(statements) => {
                f.write_str("{")?;
                for statement in statements {
                    write!(f, " {}", statement)?;
                    if matches!(statement, Statement::Comment { .. }) {
                        f.write_str("\n")?;
                    }
                }
                f.write_str(" }")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Float(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
