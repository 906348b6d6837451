//! Error types and error handling for the compiler.
//!
//! This module defines the error type shared by every stage of the
//! pipeline. It includes:
//!
//! - A single error structure carrying a source position
//! - Specific error variants for the lexer, parser and both resolvers
//! - A category telling invalid programs apart from unsupported features
//! - Short hints shown next to the rendered diagnostic

pub mod errors;

#[cfg(test)]
mod tests;
