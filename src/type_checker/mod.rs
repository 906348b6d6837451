//! Type resolution module.
//!
//! Gives every node of a name-resolved tree exactly one type. Types live in
//! a [`types::TypeArena`]; unknown types start out as placeholders that are
//! linked to concrete types as assignments and const values are resolved.
//! Type expressions are interpreted by the compile-time evaluator.

pub mod evaluator;
pub mod type_checker;
pub mod types;
