//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that pulls tokens from the lexer and
//! builds the node arena. It uses precedence climbing for expressions and
//! handles:
//!
//! - Newline separated expression sequences (files and blocks)
//! - Prefix, binary and postfix (call, generic instantiation, field access)
//!   operators
//! - Declarations, const declarations, routines, `if` and `return`
//! - Type positions, which only admit primary and postfix forms
//!
//! Primary forms are dispatched through NUD (null denotation) handlers;
//! binary operators are looked up by binding power.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
