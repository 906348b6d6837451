use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, TokenValue};

lazy_static! {
    /// Horizontal whitespace; newlines are tokens.
    static ref WHITESPACE: Regex = Regex::new(r"^[^\S\n]+").unwrap();
    /// Names and keywords, once the numeric case has been ruled out.
    static ref WORD: Regex = Regex::new(r"^[_\p{L}\p{Nd}]+").unwrap();
}

/// Pull-based tokenizer over a single source file.
///
/// The cursor is three values: byte offset, line and column. Peeking
/// snapshots the cursor, lexes one token and restores it, so nothing is
/// ever buffered.
#[derive(Clone)]
pub struct Lexer<'source> {
    source: &'source str,
    file: Rc<String>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str, file: Option<String>) -> Lexer<'source> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            file: file_name,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Where the next character will be read from.
    pub fn position(&self) -> Position {
        Position::new(Rc::clone(&self.file), self.pos, self.line, self.column)
    }

    fn remainder(&self) -> &'source str {
        &self.source[self.pos..]
    }

    fn current(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let current = self.current()?;
        self.pos += current.len_utf8();
        self.column += 1;
        if current == '\n' {
            self.line += 1;
            self.column = 1;
        }
        Some(current)
    }

    /// Advances over `length` bytes of already-matched text.
    fn advance_n(&mut self, length: usize) {
        let end = self.pos + length;
        while self.pos < end && self.advance().is_some() {}
    }

    /// Returns the next token without consuming it.
    pub fn peek_token(&mut self) -> Result<Token, Error> {
        let (pos, line, column) = (self.pos, self.line, self.column);
        let token = self.next_token();
        self.pos = pos;
        self.line = line;
        self.column = column;
        token
    }

    pub fn peek_kind(&mut self) -> Result<TokenKind, Error> {
        Ok(self.peek_token()?.kind)
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            if let Some(whitespace) = WHITESPACE.find(self.remainder()) {
                self.advance_n(whitespace.end());
            }

            let start = self.position();

            let Some(current) = self.current() else {
                return Ok(MK_TOKEN!(TokenKind::EndOfFile, start, 0));
            };

            if current == '"' {
                return self.string_literal(start);
            }

            if current.is_ascii_digit() {
                return self.number_literal(start);
            }

            if let Some(word) = WORD.find(self.remainder()) {
                let text = word.as_str();
                self.advance_n(text.len());
                return Ok(MK_TOKEN!(
                    TokenKind::from_word(text),
                    start,
                    text.len(),
                    TokenValue::Name(String::from(text))
                ));
            }

            self.advance();
            let next = self.current();

            if current == '/' && next == Some('/') {
                while !matches!(self.current(), Some('\n') | None) {
                    self.advance();
                }
                continue;
            }

            if current == '/' && next == Some('*') {
                return Err(Error::unsupported("Block comments", start));
            }

            if let Some(kind) = next.and_then(|second| TokenKind::from_double_char(current, second)) {
                self.advance();
                let length = self.pos - start.offset;
                return Ok(MK_TOKEN!(kind, start, length));
            }

            if let Some(kind) = TokenKind::from_char(current) {
                let length = self.pos - start.offset;
                return Ok(MK_TOKEN!(kind, start, length));
            }

            return Err(Error::new(
                ErrorImpl::UnexpectedCharacter { character: current },
                start,
            ));
        }
    }

    fn string_literal(&mut self, start: Position) -> Result<Token, Error> {
        self.advance();

        let mut value = String::new();
        loop {
            match self.advance() {
                None => return Err(Error::new(ErrorImpl::UnterminatedString, start)),
                Some('"') => break,
                Some('\\') => {
                    let escaped = match self.advance() {
                        Some('0') => '\0',
                        Some('t') => '\t',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some(other) => {
                            return Err(Error::new(
                                ErrorImpl::UnknownEscape {
                                    character: other.to_string(),
                                },
                                start,
                            ))
                        }
                        None => return Err(Error::new(ErrorImpl::UnterminatedString, start)),
                    };
                    value.push(escaped);
                }
                Some(chr) => value.push(chr),
            }
        }

        let length = self.pos - start.offset;
        Ok(MK_TOKEN!(TokenKind::String, start, length, TokenValue::String(value)))
    }

    fn number_literal(&mut self, start: Position) -> Result<Token, Error> {
        let mut base = 10;
        if self.current() == Some('0') {
            self.advance();
            let prefix = match self.current() {
                Some('b') => Some(2),
                Some('o') => Some(8),
                Some('d') => Some(10),
                Some('x') => Some(16),
                _ => None,
            };
            if let Some(prefix) = prefix {
                self.advance();
                base = prefix;
            }
        }

        // The float accumulator keeps large integer parts exact enough for
        // literals that turn out to have a fraction.
        let mut int_value: i64 = 0;
        let mut whole_value: f64 = 0.0;
        let mut overflowed = false;
        while let Some(digit) = self.digit(base)? {
            whole_value = whole_value * base as f64 + digit as f64;
            match int_value
                .checked_mul(base as i64)
                .and_then(|value| value.checked_add(digit as i64))
            {
                Some(value) => int_value = value,
                None => overflowed = true,
            }
        }

        if self.current() == Some('.') {
            self.advance();

            let mut float_value = whole_value;
            let mut discriminant = 1.0;
            while let Some(digit) = self.digit(base)? {
                discriminant *= base as f64;
                float_value += digit as f64 / discriminant;
            }

            let length = self.pos - start.offset;
            return Ok(MK_TOKEN!(TokenKind::Float, start, length, TokenValue::Float(float_value)));
        }

        if overflowed {
            return Err(Error::new(
                ErrorImpl::IntegerOverflow {
                    literal: String::from(&self.source[start.offset..self.pos]),
                },
                start,
            ));
        }

        let length = self.pos - start.offset;
        Ok(MK_TOKEN!(TokenKind::Integer, start, length, TokenValue::Integer(int_value)))
    }

    /// Consumes the next digit of a numeric literal, skipping `_` separators.
    /// Returns `None` once the literal ends.
    fn digit(&mut self, base: u32) -> Result<Option<u32>, Error> {
        loop {
            match self.current() {
                Some('_') => {
                    self.advance();
                }
                Some(chr) if chr.is_ascii_alphanumeric() => {
                    let position = self.position();
                    self.advance();
                    return match chr.to_digit(36) {
                        Some(value) if value < base => Ok(Some(value)),
                        _ => Err(Error::new(ErrorImpl::DigitTooBig { digit: chr, base }, position)),
                    };
                }
                _ => return Ok(None),
            }
        }
    }
}

/// Lexes a whole file into a token vector, ending with the end-of-file token.
///
/// The parser pulls tokens from a [`Lexer`] directly; this is for tooling
/// that wants to look at the raw token stream.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        trace!(token = %token.debug(), "lexed");
        let done = token.kind == TokenKind::EndOfFile;
        tokens.push(token);
        if done {
            break;
        }
    }

    debug!(count = tokens.len(), "tokenized {}", lex.file());
    Ok(tokens)
}
