use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// What an error says about the program being compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The source program is invalid.
    Diagnostic,
    /// The program uses a language feature the compiler does not handle yet.
    Unsupported,
    /// A compiler invariant was broken; never caused by the program alone.
    Internal,
}

#[derive(Error, Debug, Clone)]
#[error("{position}: {internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Shorthand for an unsupported-feature error.
    pub fn unsupported(feature: impl Into<String>, position: Position) -> Self {
        Error::new(
            ErrorImpl::Unsupported {
                feature: feature.into(),
            },
            position,
        )
    }

    /// Shorthand for a broken-invariant error.
    pub fn internal(message: impl Into<String>, position: Position) -> Self {
        Error::new(
            ErrorImpl::Internal {
                message: message.into(),
            },
            position,
        )
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The message without the location prefix.
    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::Unsupported { .. } => ErrorCategory::Unsupported,
            ErrorImpl::Internal { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Diagnostic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::UnknownEscape { .. } => "UnknownEscape",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::DigitTooBig { .. } => "DigitTooBig",
            ErrorImpl::IntegerOverflow { .. } => "IntegerOverflow",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::UnresolvedName { .. } => "UnresolvedName",
            ErrorImpl::NameCollision { .. } => "NameCollision",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::NotAType { .. } => "NotAType",
            ErrorImpl::NotACompileTimeType { .. } => "NotACompileTimeType",
            ErrorImpl::RecursiveTypeDefinition { .. } => "RecursiveTypeDefinition",
            ErrorImpl::TypeNotYetKnown { .. } => "TypeNotYetKnown",
            ErrorImpl::UnresolvedType => "UnresolvedType",
            ErrorImpl::Unsupported { .. } => "Unsupported",
            ErrorImpl::Internal { .. } => "Internal",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnknownEscape { .. } => ErrorTip::Suggestion(String::from(
                "Supported escapes are \\0, \\t, \\n and \\r",
            )),
            ErrorImpl::DigitTooBig { base, .. } => ErrorTip::Suggestion(format!(
                "Digits in base {} range from 0 to {}",
                base,
                std::char::from_digit(base - 1, *base).unwrap_or('?')
            )),
            ErrorImpl::UnresolvedName { name } => ErrorTip::Suggestion(format!(
                "Declare `{}` before using it, or make it a `const`",
                name
            )),
            ErrorImpl::NameCollision { name } => ErrorTip::Suggestion(format!(
                "`{}` is already bound in this scope, pick another name",
                name
            )),
            ErrorImpl::TypeNotYetKnown { name } => ErrorTip::Suggestion(format!(
                "`{}` is referenced inside its own declaration",
                name
            )),
            ErrorImpl::Unsupported { .. } => ErrorTip::Suggestion(String::from(
                "This feature is expected to be handled, but has not yet been implemented",
            )),
            _ => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Unexpected character '{character}'")]
    UnexpectedCharacter { character: char },
    #[error("Unknown escape character '{character}'")]
    UnknownEscape { character: String },
    #[error("String literal unclosed at end of file")]
    UnterminatedString,
    #[error("Digit '{digit}' is too big for base {base}")]
    DigitTooBig { digit: char, base: u32 },
    #[error("Integer literal '{literal}' does not fit in 64 bits")]
    IntegerOverflow { literal: String },
    #[error("Expected {expected}, but got '{found}'")]
    UnexpectedToken { expected: String, found: String },
    #[error("Expected an expression, but got '{found}'")]
    ExpectedExpression { found: String },
    #[error("Unable to find name '{name}'")]
    UnresolvedName { name: String },
    #[error("Name '{name}' is already declared in this scope")]
    NameCollision { name: String },
    #[error("Cannot assign type '{from}' to type '{to}'")]
    TypeMatchError { from: String, to: String },
    #[error("The declaration type must be a type but got type '{found}'")]
    NotAType { found: String },
    #[error("'{name}' is not known at compile time and cannot be used as a type")]
    NotACompileTimeType { name: String },
    #[error("Type '{name}' is defined in terms of itself")]
    RecursiveTypeDefinition { name: String },
    #[error("The type of '{name}' is not known at this point")]
    TypeNotYetKnown { name: String },
    #[error("Unable to resolve type")]
    UnresolvedType,
    #[error("{feature} is not supported yet")]
    Unsupported { feature: String },
    #[error("Internal compiler error: {message}")]
    Internal { message: String },
}
