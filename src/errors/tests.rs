//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorCategory, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn position(line: usize, column: usize) -> Position {
    Position::new(Rc::new("test.lang".to_string()), 0, line, column)
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnexpectedCharacter { character: '$' },
        position(1, 1),
    );

    assert_eq!(error.get_error_name(), "UnexpectedCharacter");
    assert_eq!(error.message(), "Unexpected character '$'");
}

#[test]
fn test_error_display_has_location_prefix() {
    let error = Error::new(
        ErrorImpl::UnresolvedName {
            name: "Int".to_string(),
        },
        position(2, 4),
    );

    assert_eq!(error.to_string(), "test.lang:2:4: Unable to find name 'Int'");
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 4);
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "'{newline}'".to_string(),
            found: "<".to_string(),
        },
        position(1, 3),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.message(), "Expected '{newline}', but got '<'");
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMatchError {
            from: "string".to_string(),
            to: "int".to_string(),
        },
        position(1, 1),
    );

    assert_eq!(error.get_error_name(), "TypeMatchError");
    assert_eq!(error.message(), "Cannot assign type 'string' to type 'int'");
}

#[test]
fn test_name_collision_error() {
    let error = Error::new(
        ErrorImpl::NameCollision {
            name: "x".to_string(),
        },
        position(1, 1),
    );

    assert_eq!(error.get_error_name(), "NameCollision");
    assert_eq!(error.category(), ErrorCategory::Diagnostic);
}

#[test]
fn test_unsupported_error() {
    let error = Error::unsupported("Block comments", position(1, 1));

    assert_eq!(error.get_error_name(), "Unsupported");
    assert_eq!(error.category(), ErrorCategory::Unsupported);
    assert_eq!(error.message(), "Block comments is not supported yet");
}

#[test]
fn test_internal_error() {
    let error = Error::internal("type assigned twice", position(1, 1));

    assert_eq!(error.get_error_name(), "Internal");
    assert_eq!(error.category(), ErrorCategory::Internal);
    assert_eq!(error.message(), "Internal compiler error: type assigned twice");
}

#[test]
fn test_digit_too_big_tip() {
    let error = Error::new(
        ErrorImpl::DigitTooBig {
            digit: '2',
            base: 2,
        },
        position(1, 3),
    );

    assert_eq!(error.get_tip().to_string(), "Digits in base 2 range from 0 to 1");

    let error = Error::new(
        ErrorImpl::DigitTooBig {
            digit: 'g',
            base: 16,
        },
        position(1, 3),
    );

    assert_eq!(error.get_tip().to_string(), "Digits in base 16 range from 0 to f");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(ErrorImpl::UnterminatedString, position(1, 1));

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnknownEscape {
            character: "q".to_string(),
        },
        position(1, 1),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_unresolved_type_error() {
    let error = Error::new(ErrorImpl::UnresolvedType, position(1, 1));

    assert_eq!(error.get_error_name(), "UnresolvedType");
    assert_eq!(error.message(), "Unable to resolve type");
}
