//! AC3D text lexer
//!
//! The format is line oriented: every directive sits on its own line and the
//! line break is significant. Tokens are whitespace separated words, numeric
//! literals and double-quoted strings. Quotes cannot be escaped; the first
//! closing quote ends the string. `data` blocks are read as raw bytes by the
//! parser through [`Lexer::read_raw`].

use crate::error::{AcError, Result};
use encoding_rs::Encoding;

/// A token of an `.ac` file.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word (`OBJECT`, `numvert`, `0x20`, ...)
    Identifier(String),
    /// Contents of a double-quoted string, without the quotes
    QuotedString(String),
    /// Numeric literal, with the text it was read from
    Number { value: f64, text: String },
    /// End of a line
    Newline,
}

impl Token {
    /// Token text as it appeared in the file
    pub fn raw(&self) -> String {
        match self {
            Token::Identifier(s) => s.clone(),
            Token::QuotedString(s) => format!("\"{}\"", s),
            Token::Number { text, .. } => text.clone(),
            Token::Newline => "\n".to_string(),
        }
    }

    /// Text of a word or a string, `None` for numbers and line breaks
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Token::Identifier(s) | Token::QuotedString(s) => Some(s),
            _ => None,
        }
    }
}

/// A token with the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub line: usize,
}

/// All tokens of one non-blank line.
#[derive(Debug, Clone)]
pub struct Line {
    /// 1-based line number
    pub number: usize,
    pub tokens: Vec<Token>,
    /// Text after the first token, trimmed
    pub rest: String,
}

impl Line {
    /// First token when it is a bare word
    pub fn keyword(&self) -> Option<&str> {
        match self.tokens.first() {
            Some(Token::Identifier(s)) => Some(s),
            _ => None,
        }
    }

    /// Tokens after the first one
    pub fn args(&self) -> &[Token] {
        self.tokens.get(1..).unwrap_or(&[])
    }
}

/// Lexer over the raw bytes of an `.ac` file.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    /// Used for strings that are not valid UTF-8
    encoding: &'static Encoding,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            encoding: encoding_rs::WINDOWS_1252,
        }
    }

    /// Set the fallback encoding for non UTF-8 text.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Line the lexer is currently on.
    pub fn line(&self) -> usize {
        self.line
    }

    /// True once every byte has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<SpannedToken>> {
        self.skip_blanks();

        let start_line = self.line;
        let ch = match self.peek_byte() {
            Some(ch) => ch,
            None => return Ok(None),
        };

        let token = match ch {
            b'\n' => {
                self.advance();
                Token::Newline
            }
            b'"' => self.read_quoted()?,
            _ => self.read_word()?,
        };

        Ok(Some(SpannedToken {
            token,
            line: start_line,
        }))
    }

    /// Read the next non-blank line, consuming its line break.
    pub fn next_line(&mut self) -> Result<Option<Line>> {
        loop {
            self.skip_blanks();
            match self.peek_byte() {
                None => return Ok(None),
                Some(b'\n') => {
                    self.advance();
                }
                Some(_) => break,
            }
        }

        let number = self.line;
        let mut tokens = Vec::new();
        let mut rest_start = None;

        while let Some(spanned) = self.next_token()? {
            if spanned.token == Token::Newline {
                break;
            }
            tokens.push(spanned.token);
            if tokens.len() == 1 {
                rest_start = Some(self.pos);
            }
        }

        let rest = match rest_start {
            Some(start) => {
                let end = self.line_end(start);
                self.decode(&self.input[start..end]).trim().to_string()
            }
            None => String::new(),
        };

        Ok(Some(Line {
            number,
            tokens,
            rest,
        }))
    }

    /// Read exactly `len` raw bytes (a `data` block) followed by a line break
    /// or end of input.
    pub fn read_raw(&mut self, len: usize) -> Result<String> {
        let start_line = self.line;
        let available = self.input.len() - self.pos;
        if len > available {
            return Err(AcError::structural(
                start_line,
                format!(
                    "data length mismatch: {} bytes declared, {} available",
                    len, available
                ),
            ));
        }

        let bytes = &self.input[self.pos..self.pos + len];
        let text = self.decode(bytes);
        self.line += bytes.iter().filter(|b| **b == b'\n').count();
        self.pos += len;

        if self.peek_byte() == Some(b'\r') {
            self.pos += 1;
        }
        match self.peek_byte() {
            None => {}
            Some(b'\n') => {
                self.advance();
            }
            Some(_) => {
                return Err(AcError::structural(
                    self.line,
                    format!("data length mismatch: text continues after {} bytes", len),
                ));
            }
        }

        Ok(text)
    }

    /// Tokenize the whole input (used by tests and diagnostics).
    pub fn tokenize(&mut self) -> Result<Vec<SpannedToken>> {
        let mut tokens = Vec::new();
        while let Some(tok) = self.next_token()? {
            tokens.push(tok);
        }
        Ok(tokens)
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.input.get(self.pos).copied()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn skip_blanks(&mut self) {
        while let Some(ch) = self.peek_byte() {
            if ch != b'\n' && ch.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Byte offset of the end of the line containing `from`, without `\r\n`
    fn line_end(&self, from: usize) -> usize {
        let mut end = from;
        while end < self.input.len() && self.input[end] != b'\n' {
            end += 1;
        }
        end
    }

    fn read_quoted(&mut self) -> Result<Token> {
        let start_line = self.line;
        self.advance();
        let start = self.pos;
        loop {
            match self.peek_byte() {
                Some(b'"') => break,
                Some(b'\n') | None => {
                    return Err(AcError::lex(start_line, "unterminated quoted string"));
                }
                Some(_) => {
                    self.pos += 1;
                }
            }
        }
        let text = self.decode(&self.input[start..self.pos]);
        self.advance();
        Ok(Token::QuotedString(text))
    }

    fn read_word(&mut self) -> Result<Token> {
        let start = self.pos;
        while let Some(ch) = self.peek_byte() {
            if ch.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        let word = self.decode(&self.input[start..self.pos]);
        Ok(classify_word(word))
    }

    fn decode(&self, bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => {
                let (decoded, _) = self.encoding.decode_without_bom_handling(bytes);
                decoded.into_owned()
            }
        }
    }
}

/// Hexadecimal words such as SURF flags stay identifiers.
fn is_hex_literal(word: &str) -> bool {
    word.starts_with("0x") || word.starts_with("0X")
}

fn looks_numeric(word: &str) -> bool {
    match word.as_bytes() {
        [first, ..] if first.is_ascii_digit() => true,
        [b'+' | b'-' | b'.', next, ..] => next.is_ascii_digit() || *next == b'.',
        _ => false,
    }
}

/// Words that fail to parse as numbers stay identifiers; only a numeric
/// slot turns them into a [`AcError::Lex`], see [`malformed_number`].
fn classify_word(word: String) -> Token {
    if !looks_numeric(&word) || is_hex_literal(&word) {
        return Token::Identifier(word);
    }
    match word.parse::<f64>() {
        Ok(value) => Token::Number { value, text: word },
        Err(_) => Token::Identifier(word),
    }
}

/// The bare word if `token` starts like a number but is not one (`1.2.3`)
pub fn malformed_number(token: &Token) -> Option<&str> {
    match token {
        Token::Identifier(word) if looks_numeric(word) && !is_hex_literal(word) => Some(word),
        _ => None,
    }
}
