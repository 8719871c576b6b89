//! Pattern-string parser.
//!
//! Grammar (informal):
//!
//! ```text
//! pattern  := wildcard | literal | ident | list | cons
//! wildcard := "_"
//! literal  := '"' TEXT '"'
//! ident    := IDENTIFIER
//! list     := "[" pattern (", " pattern)* "]"
//! cons     := "(" pattern (":" pattern)* ")"
//! ```
//!
//! [`parse`] never fails: malformed input degrades to the closest reading
//! (usually a bare identifier), which then simply fails to match. Callers who
//! want rejection use [`parse_strict`].
use once_cell::sync::Lazy;
use ordered_float::OrderedFloat;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PatternSpec {
    Wildcard,
    Literal(Literal),
    /// Bare identifier. A binding in list positions, a type name at the
    /// top level of an object match.
    Ident(String),
    List(Vec<PatternSpec>),
    /// `(x:y:_)`: positional form, only meaningful for arity dispatch.
    Cons(Vec<PatternSpec>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Literal {
    /// Unquoted source text.
    pub text: String,
    pub value: LiteralValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("empty pattern")]
    Empty,
    #[error("unterminated quote in `{0}`")]
    UnterminatedQuote(String),
    #[error("unbalanced brackets in `{0}`")]
    UnbalancedBrackets(String),
    #[error("empty element in `{0}`")]
    EmptyElement(String),
    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(String),
}

pub const WILDCARD: &str = "_";

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*$").expect("static regex")
});

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl PatternSpec {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, PatternSpec::Wildcard)
    }

    /// Name this pattern binds when it sits in a list position.
    pub fn as_binding(&self) -> Option<&str> {
        match self {
            PatternSpec::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Type name this pattern refers to when used as an object-match key.
    pub fn as_type_name(&self) -> Option<&str> {
        self.as_binding()
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            PatternSpec::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Elements of a `[...]` pattern.
    pub fn as_list(&self) -> Option<&[PatternSpec]> {
        match self {
            PatternSpec::List(xs) => Some(xs),
            _ => None,
        }
    }
}

impl Literal {
    /// Strip nothing, coerce: integer first, then float, else text.
    pub fn coerce(text: &str) -> Self {
        let value = if let Ok(i) = text.parse::<i64>() {
            LiteralValue::Int(i)
        } else if looks_numeric(text) {
            match text.parse::<f64>() {
                Ok(f) => LiteralValue::Float(OrderedFloat(f)),
                Err(_) => LiteralValue::Str(text.to_string()),
            }
        } else {
            LiteralValue::Str(text.to_string())
        };
        Literal { text: text.to_string(), value }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.value {
            LiteralValue::Int(i) => Some(i as f64),
            LiteralValue::Float(f) => Some(f.0),
            LiteralValue::Str(_) => None,
        }
    }
}

/// Rust's float parser also accepts `inf`/`nan`; pattern literals don't.
fn looks_numeric(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
        && s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

/// Parse a pattern string. Never fails.
pub fn parse(src: &str) -> PatternSpec {
    let s = src.trim();
    if s == WILDCARD {
        return PatternSpec::Wildcard;
    }
    if let Some(inner) = unquote(s) {
        return PatternSpec::Literal(Literal::coerce(inner));
    }
    if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        return PatternSpec::List(split_elements(inner.trim(), ", ").into_iter().map(parse).collect());
    }
    if let Some(inner) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        return PatternSpec::Cons(split_elements(inner.trim(), ":").into_iter().map(parse).collect());
    }
    PatternSpec::Ident(s.to_string())
}

/// Parse a pattern string, rejecting anything outside the grammar.
pub fn parse_strict(src: &str) -> Result<PatternSpec, PatternError> {
    validate(src.trim())?;
    Ok(parse(src))
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn unquote(s: &str) -> Option<&str> {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

/// Split on `sep` at nesting depth zero, outside quotes. Empty input yields
/// no elements.
fn split_elements<'a>(s: &'a str, sep: &str) -> Vec<&'a str> {
    if s.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut depth: i32 = 0;
    let mut in_quote = false;
    let mut start = 0;
    let mut i = 0;
    let bytes = s.as_bytes();
    while i < bytes.len() {
        match bytes[i] {
            b'"' => in_quote = !in_quote,
            b'[' | b'(' if !in_quote => depth += 1,
            b']' | b')' if !in_quote => depth -= 1,
            _ if !in_quote && depth == 0 && bytes[i..].starts_with(sep.as_bytes()) => {
                out.push(&s[start..i]);
                i += sep.len();
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    out.push(&s[start..]);
    out
}

fn validate(s: &str) -> Result<(), PatternError> {
    if s.is_empty() {
        return Err(PatternError::Empty);
    }
    if s == WILDCARD {
        return Ok(());
    }
    if s.starts_with('"') {
        let closed = s.len() >= 2 && s.ends_with('"') && !s[1..s.len() - 1].contains('"');
        return if closed { Ok(()) } else { Err(PatternError::UnterminatedQuote(s.to_string())) };
    }
    let (open, close, sep) = match s.as_bytes()[0] {
        b'[' => ('[', ']', ", "),
        b'(' => ('(', ')', ":"),
        _ => {
            return if IDENTIFIER.is_match(s) {
                Ok(())
            } else if s.contains(['[', ']', '(', ')']) {
                Err(PatternError::UnbalancedBrackets(s.to_string()))
            } else if s.contains('"') {
                Err(PatternError::UnterminatedQuote(s.to_string()))
            } else {
                Err(PatternError::InvalidIdentifier(s.to_string()))
            };
        }
    };
    if !balanced(s) || !s.ends_with(close) {
        return Err(PatternError::UnbalancedBrackets(s.to_string()));
    }
    let inner = s[open.len_utf8()..s.len() - close.len_utf8()].trim();
    if inner.is_empty() {
        return Ok(());
    }
    for element in split_elements(inner, sep) {
        if element.trim().is_empty() {
            return Err(PatternError::EmptyElement(s.to_string()));
        }
        validate(element.trim())?;
    }
    Ok(())
}

fn balanced(s: &str) -> bool {
    let mut stack = Vec::new();
    let mut in_quote = false;
    for c in s.chars() {
        match c {
            '"' => in_quote = !in_quote,
            '[' | '(' if !in_quote => stack.push(c),
            ']' if !in_quote => {
                if stack.pop() != Some('[') { return false; }
            }
            ')' if !in_quote => {
                if stack.pop() != Some('(') { return false; }
            }
            _ => {}
        }
    }
    stack.is_empty() && !in_quote
}

// ------------------------------- Tests ------------------------------------ //
