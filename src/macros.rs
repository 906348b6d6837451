//! Utility macros for the compiler.
//!
//! This module defines helper macros used throughout the compiler:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_ID!` - Declares a typed arena index (node ids, type ids)
//!
//! These macros reduce boilerplate in the lexer and in the arenas.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$position` - Where the token starts
/// * `$length` - The token's length in bytes
/// * `$value` - The token's payload (optional, defaults to `TokenValue::None`)
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, start, 2, TokenValue::Integer(42));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $position:expr, $length:expr) => {
        $crate::MK_TOKEN!($kind, $position, $length, $crate::lexer::tokens::TokenValue::None)
    };
    ($kind:expr, $position:expr, $length:expr, $value:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            position: $position,
            length: $length,
            value: $value,
        }
    };
}

/// Declares a typed index into one of the compiler's arenas.
///
/// The generated type is `Copy`, ordered and hashable, and converts to and
/// from `usize`.
///
/// # Example
///
/// ```ignore
/// MK_ID!(NodeId, "Index of a node in the syntax tree arena.");
/// ```
#[macro_export]
macro_rules! MK_ID {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(index: usize) -> Self {
                $name(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                $name::new(index)
            }
        }

        impl From<$name> for usize {
            fn from(id: $name) -> usize {
                id.index()
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}
