//! Unit tests for the lexer module.
//!
//! Covers keywords and names, numeric literals in every base, string
//! escapes, operators, comments, newline tracking and the error cases.

use super::{
    lexer::{tokenize, Lexer},
    tokens::{TokenKind, TokenValue},
};
use crate::errors::errors::{ErrorCategory, ErrorImpl};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.lang".to_string()))
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = kinds("const func proc return if else __builtin __builtin_array _");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Const,
            TokenKind::Func,
            TokenKind::Proc,
            TokenKind::Return,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Builtin,
            TokenKind::BuiltinArray,
            TokenKind::Wildcard,
            TokenKind::EndOfFile,
        ]
    );
}

#[test]
fn test_tokenize_names() {
    let source = "foo baz_123 _under true héllo";
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Name);
    assert_eq!(tokens[0].text(), Some("foo"));
    assert_eq!(tokens[1].text(), Some("baz_123"));
    assert_eq!(tokens[2].kind, TokenKind::Name);
    assert_eq!(tokens[2].text(), Some("_under"));
    // Booleans are plain names until they are resolved.
    assert_eq!(tokens[3].kind, TokenKind::Name);
    assert_eq!(tokens[3].text(), Some("true"));
    assert_eq!(tokens[4].kind, TokenKind::Name);
    assert_eq!(tokens[4].text(), Some("héllo"));
    assert_eq!(tokens[5].kind, TokenKind::EndOfFile);
}

#[test]
fn test_tokenize_integers_in_every_base() {
    let source = "42 0b1010 0o17 0d99 0xFF 1_000_000 0";
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    let values: Vec<TokenValue> = tokens.iter().map(|token| token.value.clone()).collect();
    assert_eq!(
        values,
        vec![
            TokenValue::Integer(42),
            TokenValue::Integer(10),
            TokenValue::Integer(15),
            TokenValue::Integer(99),
            TokenValue::Integer(255),
            TokenValue::Integer(1_000_000),
            TokenValue::Integer(0),
            TokenValue::None,
        ]
    );
    assert!(tokens[..7].iter().all(|token| token.kind == TokenKind::Integer));
}

#[test]
fn test_tokenize_floats() {
    let source = "1.5 0x1.8 0b10.1 7.";
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Float);
    assert_eq!(tokens[0].value, TokenValue::Float(1.5));
    assert_eq!(tokens[1].value, TokenValue::Float(1.5));
    assert_eq!(tokens[2].value, TokenValue::Float(2.5));
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[3].value, TokenValue::Float(7.0));
    assert_eq!(tokens[4].kind, TokenKind::EndOfFile);
}

#[test]
fn test_tokenize_digit_too_big() {
    let error = tokenize("x = 0b102", Some("test.lang".to_string())).unwrap_err();

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::DigitTooBig { digit: '2', base: 2 }
    );
    assert_eq!(error.get_position().column, 9);
    assert_eq!(error.get_position().offset, 8);
}

#[test]
fn test_tokenize_letter_in_decimal_literal() {
    let error = tokenize("12abc", None).unwrap_err();

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::DigitTooBig { digit: 'a', base: 10 }
    );
}

#[test]
fn test_tokenize_integer_overflow() {
    let tokens = tokenize("9223372036854775807", None).unwrap();
    assert_eq!(tokens[0].value, TokenValue::Integer(i64::MAX));

    let error = tokenize("9223372036854775808", None).unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::IntegerOverflow {
            literal: "9223372036854775808".to_string()
        }
    );
    assert_eq!(error.category(), ErrorCategory::Diagnostic);
}

#[test]
fn test_tokenize_float_with_large_whole_part() {
    let tokens = tokenize("99999999999999999999.5 0x1_0000_0000_0000_0000.8", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Float);
    let TokenValue::Float(value) = tokens[0].value else {
        panic!("Expected a float payload");
    };
    assert!((value - 1e20).abs() / 1e20 < 1e-12);

    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value, TokenValue::Float(18446744073709551616.5));
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" "" "tab\there" "nul\0 cr\r nl\n""#;
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, TokenValue::String("hello".to_string()));
    assert_eq!(tokens[1].value, TokenValue::String(String::new()));
    assert_eq!(tokens[2].value, TokenValue::String("tab\there".to_string()));
    assert_eq!(
        tokens[3].value,
        TokenValue::String("nul\0 cr\r nl\n".to_string())
    );
    assert_eq!(tokens[4].kind, TokenKind::EndOfFile);
}

#[test]
fn test_tokenize_unknown_escape() {
    let error = tokenize(r#"a = "bad\q""#, None).unwrap_err();

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnknownEscape {
            character: "q".to_string()
        }
    );
    // Reported at the opening quote.
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_tokenize_unterminated_string() {
    let error = tokenize("x = \"abc", Some("test.lang".to_string())).unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_position().offset, 4);
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 5);

    let error = tokenize("\"abc\\", None).unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::UnterminatedString);
}

#[test]
fn test_tokenize_operators() {
    let tokens = kinds("<- -> == != <= >= < > = ! + - * / % @ . , : ( ) { } [ ]");

    assert_eq!(
        tokens,
        vec![
            TokenKind::LeftArrow,
            TokenKind::RightArrow,
            TokenKind::EqualEqual,
            TokenKind::ExclamationMarkEqual,
            TokenKind::LessThanEqual,
            TokenKind::GreaterThanEqual,
            TokenKind::LessThan,
            TokenKind::GreaterThan,
            TokenKind::Equal,
            TokenKind::ExclamationMark,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::At,
            TokenKind::Period,
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::OpenParenthesis,
            TokenKind::CloseParenthesis,
            TokenKind::OpenBrace,
            TokenKind::CloseBrace,
            TokenKind::OpenSquareBracket,
            TokenKind::CloseSquareBracket,
            TokenKind::EndOfFile,
        ]
    );
}

#[test]
fn test_tokenize_operators_without_spaces() {
    assert_eq!(
        kinds("a<-b->c"),
        vec![
            TokenKind::Name,
            TokenKind::LeftArrow,
            TokenKind::Name,
            TokenKind::RightArrow,
            TokenKind::Name,
            TokenKind::EndOfFile,
        ]
    );
}

#[test]
fn test_tokenize_line_comments() {
    assert_eq!(
        kinds("a // first\nb"),
        vec![
            TokenKind::Name,
            TokenKind::Newline,
            TokenKind::Name,
            TokenKind::EndOfFile,
        ]
    );

    // A comment running into the end of the file terminates.
    assert_eq!(kinds("a // trailing"), vec![TokenKind::Name, TokenKind::EndOfFile]);
}

#[test]
fn test_tokenize_block_comment_is_unsupported() {
    let error = tokenize("a /* b */", None).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Unsupported);
    assert_eq!(error.get_position().column, 3);
}

#[test]
fn test_tokenize_unexpected_character() {
    let error = tokenize("a $ b", Some("test.lang".to_string())).unwrap_err();

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedCharacter { character: '$' }
    );
    assert_eq!(error.get_position().column, 3);
    assert_eq!(error.to_string(), "test.lang:1:3: Unexpected character '$'");
}

#[test]
fn test_tokenize_non_decimal_numerics_are_not_names() {
    for source in ["a\u{b2}", "a\u{bd}"] {
        let error = tokenize(source, Some("test.lang".to_string())).unwrap_err();

        assert!(matches!(
            error.get_impl(),
            ErrorImpl::UnexpectedCharacter { .. }
        ));
        assert_eq!(error.get_position().column, 2);
    }

    let tokens = tokenize("x\u{0663}", None).unwrap();
    assert_eq!(tokens[0].text(), Some("x\u{0663}"));
}

#[test]
fn test_tokenize_newlines_and_positions() {
    let source = "a\n  bc\n\n";
    let tokens = tokenize(source, Some("test.lang".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Name);
    assert_eq!(tokens[1].kind, TokenKind::Newline);
    assert_eq!(tokens[1].position.column, 2);

    assert_eq!(tokens[2].text(), Some("bc"));
    assert_eq!(tokens[2].position.offset, 4);
    assert_eq!(tokens[2].position.line, 2);
    assert_eq!(tokens[2].position.column, 3);

    assert_eq!(tokens[3].kind, TokenKind::Newline);
    assert_eq!(tokens[4].kind, TokenKind::Newline);
    assert_eq!(tokens[4].position.line, 3);
    assert_eq!(tokens[5].kind, TokenKind::EndOfFile);
    assert_eq!(tokens[5].position.line, 4);
    assert_eq!(tokens[5].length, 0);
}

#[test]
fn test_columns_count_characters_not_bytes() {
    let tokens = tokenize("héllo x", None).unwrap();

    assert_eq!(tokens[1].position.offset, 7);
    assert_eq!(tokens[1].position.column, 7);
}

#[test]
fn test_token_length_covers_source_span() {
    let source = "const name = \"a\\n\" <- 0x1F";
    let tokens = tokenize(source, None).unwrap();

    for token in &tokens {
        let span = &source[token.position.offset..token.position.offset + token.length];
        match token.kind {
            TokenKind::Const => assert_eq!(span, "const"),
            TokenKind::Name => assert_eq!(span, "name"),
            TokenKind::Equal => assert_eq!(span, "="),
            TokenKind::String => assert_eq!(span, "\"a\\n\""),
            TokenKind::LeftArrow => assert_eq!(span, "<-"),
            TokenKind::Integer => assert_eq!(span, "0x1F"),
            TokenKind::EndOfFile => assert_eq!(span, ""),
            other => panic!("unexpected token {}", other),
        }
    }
}

#[test]
fn test_default_file_name() {
    let tokens = tokenize("x", None).unwrap();

    assert_eq!(tokens[0].position.file.as_str(), "shell");
}

#[test]
fn test_peek_does_not_consume() {
    let mut lexer = Lexer::new("const x", Some("test.lang".to_string()));

    assert_eq!(lexer.peek_kind().unwrap(), TokenKind::Const);
    assert_eq!(lexer.peek_kind().unwrap(), TokenKind::Const);
    assert_eq!(lexer.position().offset, 0);

    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Const);
    let name = lexer.next_token().unwrap();
    assert_eq!(name.kind, TokenKind::Name);
    assert_eq!(name.position.column, 7);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfFile);
    // End of file is sticky.
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfFile);
}
