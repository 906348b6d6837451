//! Name resolution.
//!
//! Binds every `Name` node to the node that declares it. Consts and generic
//! parameters live in the eager namespace and can be referenced before they
//! appear; parameters and declarations live in the lexical namespace.
pub mod const_search;
pub mod name_resolver;
pub mod scopes;
