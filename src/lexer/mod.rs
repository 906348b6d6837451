//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into tokens on demand for the parser. It handles:
//!
//! - Keywords, names and the `_` wildcard
//! - Integer and float literals with `0b`/`0o`/`0d`/`0x` base prefixes
//! - String literals with `\0 \t \n \r` escapes
//! - One- and two-character operators and punctuation
//! - Line comments; newlines are significant and returned as tokens
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
