use std::collections::HashMap;

use crate::{ast::ast::NodeId, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, weakest first.
///
/// `Least` is never assigned to an operator. Parsing at `Least` admits no
/// binary operator at all, which is how type positions are restricted to
/// primary and postfix forms.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Equality,
    Additive,
    Multiplicative,
    Composition,
    Unary,
    Least,
}

pub type NUDHandler = fn(&mut Parser<'_>) -> Result<NodeId, Error>;

pub fn create_token_lookups(parser: &mut Parser<'_>) {
    // Assignment direction
    parser.led(TokenKind::LeftArrow, BindingPower::Assignment);
    parser.led(TokenKind::RightArrow, BindingPower::Assignment);

    // Equality
    parser.led(TokenKind::EqualEqual, BindingPower::Equality);
    parser.led(TokenKind::ExclamationMarkEqual, BindingPower::Equality);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive);
    parser.led(TokenKind::Minus, BindingPower::Additive);
    parser.led(TokenKind::Asterisk, BindingPower::Multiplicative);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative);

    parser.led(TokenKind::At, BindingPower::Composition);

    // Prefix operators
    parser.prefix(TokenKind::Plus, BindingPower::Unary);
    parser.prefix(TokenKind::Minus, BindingPower::Unary);
    parser.prefix(TokenKind::ExclamationMark, BindingPower::Unary);

    // Literals and names
    parser.nud(TokenKind::Integer, parse_integer_expr);
    parser.nud(TokenKind::Float, parse_float_expr);
    parser.nud(TokenKind::String, parse_string_expr);
    parser.nud(TokenKind::Name, parse_name_expr);
    parser.nud(TokenKind::Wildcard, parse_wildcard_expr);
    parser.nud(TokenKind::OpenParenthesis, parse_grouping_expr);
    parser.nud(TokenKind::Builtin, parse_builtin_expr);
    parser.nud(TokenKind::BuiltinArray, parse_builtin_array_expr);

    // Keyword forms
    parser.nud(TokenKind::Const, parse_const_decl);
    parser.nud(TokenKind::Func, parse_routine);
    parser.nud(TokenKind::Proc, parse_routine);
    parser.nud(TokenKind::Return, parse_return);
    parser.nud(TokenKind::If, parse_if);
}

// Lookup tables inside parser struct, so it's easier
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
