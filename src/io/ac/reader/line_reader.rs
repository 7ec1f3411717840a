//! Line-level access to the token stream, with one line of look-ahead

use super::lexer::{malformed_number, Lexer, Line, Token};
use crate::error::{AcError, Result};

/// Reads `.ac` input one directive line at a time.
pub struct LineReader<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Line>,
}

impl<'a> LineReader<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            peeked: None,
        }
    }

    /// Read the next non-blank line
    pub fn read_line(&mut self) -> Result<Option<Line>> {
        if let Some(line) = self.peeked.take() {
            return Ok(Some(line));
        }
        self.lexer.next_line()
    }

    /// Push a line back to be read again on next `read_line` call
    pub fn push_back(&mut self, line: Line) {
        self.peeked = Some(line);
    }

    /// Read a raw block that starts right after the last line read
    pub fn read_raw(&mut self, len: usize) -> Result<String> {
        if let Some(line) = &self.peeked {
            return Err(AcError::structural(
                line.number,
                "raw block requested after a pushed-back line",
            ));
        }
        self.lexer.read_raw(len)
    }

    /// Current line of the underlying lexer
    pub fn line(&self) -> usize {
        match &self.peeked {
            Some(line) => line.number,
            None => self.lexer.line(),
        }
    }
}

/// Fail with a [`AcError::Lex`] if a numeric slot holds a word like `1.2.3`
pub fn check_numbers(tokens: &[Token], line: usize) -> Result<()> {
    match tokens.iter().find_map(malformed_number) {
        Some(word) => Err(AcError::lex(line, format!("invalid numeric literal {:?}", word))),
        None => Ok(()),
    }
}

/// Numeric value of a token
pub fn token_number(token: &Token) -> Option<f64> {
    match token {
        Token::Number { value, .. } => Some(*value),
        _ => None,
    }
}

/// Non-negative integer value of a token (`3`, not `3.5` or `-1`)
pub fn token_count(token: &Token) -> Option<usize> {
    match token_number(token)? {
        v if v >= 0.0 && v.fract() == 0.0 && v <= usize::MAX as f64 => Some(v as usize),
        _ => None,
    }
}

/// Integer value of a token, sign allowed
pub fn token_int(token: &Token) -> Option<i64> {
    match token_number(token)? {
        v if v.fract() == 0.0 && v.abs() <= i64::MAX as f64 => Some(v as i64),
        _ => None,
    }
}

/// Exactly `N` numbers starting at `tokens[0]`; `None` on any other arity
pub fn exact_numbers<const N: usize>(tokens: &[Token]) -> Option<[f64; N]> {
    if tokens.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = token_number(token)?;
    }
    Some(out)
}

/// Text of a name-like argument: quoted string, or bare word for old files
pub fn token_text(token: &Token) -> String {
    match token {
        Token::Identifier(s) | Token::QuotedString(s) => s.clone(),
        other => other.raw(),
    }
}
