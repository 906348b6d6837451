use crate::{
    ast::ast::{NodeId, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{TokenKind, TokenValue},
};

use super::{
    lookups::BindingPower,
    parser::{binding_name, Parser},
};

/// Precedence climbing. Parses a prefix operator or primary, then any
/// postfix forms and binary operators binding tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<NodeId, Error> {
    let token_kind = parser.current_token_kind()?;
    let mut left = match parser.prefix_binding_power(token_kind) {
        Some(prefix_bp) => parse_prefix_expr(parser, prefix_bp)?,
        None => parse_primary_expr(parser)?,
    };

    loop {
        let token_kind = parser.current_token_kind()?;
        left = match token_kind {
            // Postfix forms out-bind every binary operator.
            TokenKind::OpenParenthesis => parse_call_expr(parser, left)?,
            TokenKind::OpenSquareBracket => parse_generic_instantiation_expr(parser, left)?,
            TokenKind::Period => parse_field_access_expr(parser, left)?,
            _ => match parser.binding_power(token_kind) {
                Some(operator_bp) if operator_bp > bp => {
                    parse_binary_expr(parser, left, operator_bp)?
                }
                _ => break,
            },
        };
    }

    Ok(left)
}

/// An expression that may not contain a bare binary operator, as used for
/// declared types.
pub fn parse_least_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    parse_expr(parser, BindingPower::Least)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let token_kind = parser.current_token_kind()?;
    match parser.nud_handler(token_kind) {
        Some(handler) => handler(parser),
        None => {
            let token = parser.advance()?;
            Err(Error::new(
                ErrorImpl::ExpectedExpression {
                    found: token.to_string(),
                },
                token.position,
            ))
        }
    }
}

pub fn parse_prefix_expr(parser: &mut Parser, bp: BindingPower) -> Result<NodeId, Error> {
    let operator_token = parser.advance()?;
    parser.allow_newline()?;
    let operand = parse_expr(parser, bp)?;

    Ok(parser.push(
        NodeKind::Unary {
            operator: operator_token.kind,
            operand,
        },
        operator_token.position,
    ))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: NodeId,
    bp: BindingPower,
) -> Result<NodeId, Error> {
    let operator_token = parser.advance()?;
    parser.allow_newline()?;
    let right = parse_expr(parser, bp)?;

    Ok(parser.push(
        NodeKind::Binary {
            left,
            operator: operator_token.kind,
            right,
        },
        operator_token.position,
    ))
}

/// Comma or newline separated expressions up to `closing`, which is consumed.
fn parse_arguments(parser: &mut Parser, closing: TokenKind) -> Result<Vec<NodeId>, Error> {
    parser.allow_newline()?;

    let mut arguments = vec![];
    while parser.current_token_kind()? != closing {
        arguments.push(parse_expr(parser, BindingPower::Default)?);
        parser.expect_comma_or_newline()?;
    }
    parser.expect(closing)?;

    Ok(arguments)
}

pub fn parse_call_expr(parser: &mut Parser, operand: NodeId) -> Result<NodeId, Error> {
    let open_token = parser.advance()?;
    let arguments = parse_arguments(parser, TokenKind::CloseParenthesis)?;

    Ok(parser.push(
        NodeKind::Call { operand, arguments },
        open_token.position,
    ))
}

pub fn parse_generic_instantiation_expr(
    parser: &mut Parser,
    operand: NodeId,
) -> Result<NodeId, Error> {
    let open_token = parser.advance()?;
    let arguments = parse_arguments(parser, TokenKind::CloseSquareBracket)?;

    Ok(parser.push(
        NodeKind::GenericInstantiation { operand, arguments },
        open_token.position,
    ))
}

pub fn parse_field_access_expr(parser: &mut Parser, operand: NodeId) -> Result<NodeId, Error> {
    let period_token = parser.advance()?;
    let name_token = parser.expect(TokenKind::Name)?;
    let field = String::from(name_token.text().unwrap_or_default());

    Ok(parser.push(
        NodeKind::FieldAccess { operand, field },
        period_token.position,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let open_token = parser.advance()?;
    parser.allow_newline()?;
    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.allow_newline()?;
    parser.expect(TokenKind::CloseParenthesis)?;

    Ok(parser.push(
        NodeKind::ParenthesisedExpression { expression },
        open_token.position,
    ))
}

pub fn parse_integer_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.advance()?;
    let value = match token.value {
        TokenValue::Integer(value) => value,
        _ => 0,
    };
    Ok(parser.push(NodeKind::Integer { value }, token.position))
}

pub fn parse_float_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.advance()?;
    let value = match token.value {
        TokenValue::Float(value) => value,
        _ => 0.0,
    };
    Ok(parser.push(NodeKind::Float { value }, token.position))
}

pub fn parse_string_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.advance()?;
    let value = match token.value {
        TokenValue::String(value) => value,
        _ => String::new(),
    };
    Ok(parser.push(NodeKind::String { value }, token.position))
}

pub fn parse_wildcard_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.advance()?;
    Ok(parser.push(NodeKind::Wildcard, token.position))
}

/// A name, or a declaration when the name is followed by `:`.
pub fn parse_name_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let name_token = parser.advance()?;

    if parser.current_token_kind()? == TokenKind::Colon {
        parser.advance()?;
        let type_expr = parse_least_expr(parser)?;
        return Ok(parser.push(
            NodeKind::Declaration {
                name: binding_name(&name_token),
                type_expr,
            },
            name_token.position,
        ));
    }

    let name = String::from(name_token.text().unwrap_or_default());
    Ok(parser.push(
        NodeKind::Name {
            name,
            declaration: Default::default(),
        },
        name_token.position,
    ))
}

pub fn parse_builtin_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let builtin_token = parser.advance()?;
    let string_token = parser.expect(TokenKind::String)?;
    let name = match string_token.value {
        TokenValue::String(name) => name,
        _ => String::new(),
    };

    Ok(parser.push(NodeKind::Builtin { name }, builtin_token.position))
}

pub fn parse_builtin_array_expr(parser: &mut Parser) -> Result<NodeId, Error> {
    let builtin_token = parser.advance()?;
    parser.expect(TokenKind::OpenSquareBracket)?;
    let inner_type = parse_expr(parser, BindingPower::Default)?;
    parser.expect_comma_or_newline()?;
    let length = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseSquareBracket)?;

    Ok(parser.push(
        NodeKind::BuiltinArray { inner_type, length },
        builtin_token.position,
    ))
}
