use crate::{
    ast::ast::{NodeId, NodeKind},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    expr::{parse_expr, parse_least_expr},
    lookups::BindingPower,
    parser::{binding_name, Parser},
};

/// Newline separated expressions until `terminator`, which is left for the
/// caller to consume. Blank lines are skipped anywhere in the sequence.
fn parse_expressions(parser: &mut Parser, terminator: TokenKind) -> Result<Vec<NodeId>, Error> {
    let mut expressions = vec![];

    loop {
        parser.allow_multiple_newlines()?;
        if parser.current_token_kind()? == terminator {
            break;
        }

        expressions.push(parse_expr(parser, BindingPower::Default)?);
        parser.expect_newline()?;
    }

    Ok(expressions)
}

pub fn parse_file(parser: &mut Parser) -> Result<NodeId, Error> {
    let expressions = parse_expressions(parser, TokenKind::EndOfFile)?;
    parser.expect(TokenKind::EndOfFile)?;

    let position = Position::start_of(parser.file());
    Ok(parser.push(NodeKind::File { expressions }, position))
}

pub fn parse_block(parser: &mut Parser) -> Result<NodeId, Error> {
    let open_token = parser.expect(TokenKind::OpenBrace)?;
    let expressions = parse_expressions(parser, TokenKind::CloseBrace)?;
    parser.expect(TokenKind::CloseBrace)?;

    Ok(parser.push(NodeKind::Block { expressions }, open_token.position))
}

/// `name: type` or `_: type`, as used for routine parameters.
pub fn parse_declaration(parser: &mut Parser) -> Result<NodeId, Error> {
    let name_token = parser.expect_one_of(&[TokenKind::Name, TokenKind::Wildcard])?;
    parser.expect(TokenKind::Colon)?;
    let type_expr = parse_least_expr(parser)?;

    Ok(parser.push(
        NodeKind::Declaration {
            name: binding_name(&name_token),
            type_expr,
        },
        name_token.position,
    ))
}

/// `if condition { ... }` with an optional `else { ... }` or `else if ...`.
pub fn parse_if(parser: &mut Parser) -> Result<NodeId, Error> {
    let if_token = parser.expect(TokenKind::If)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_block = parse_block(parser)?;

    let mut else_node = None;
    if parser.current_token_kind()? == TokenKind::Else {
        parser.advance()?;
        else_node = Some(if parser.current_token_kind()? == TokenKind::If {
            parse_if(parser)?
        } else {
            parse_block(parser)?
        });
    }

    Ok(parser.push(
        NodeKind::If {
            condition,
            then_block,
            else_node,
        },
        if_token.position,
    ))
}

/// `const name[generics]: type = value`; generics and type are optional.
pub fn parse_const_decl(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.expect(TokenKind::Const)?;
    let name_token = parser.expect_one_of(&[TokenKind::Name, TokenKind::Wildcard])?;

    let mut generic_parameters = None;
    if parser.current_token_kind()? == TokenKind::OpenSquareBracket {
        parser.advance()?;
        parser.allow_newline()?;

        let mut parameters = vec![];
        while parser.current_token_kind()? != TokenKind::CloseSquareBracket {
            let parameter_token = parser.expect(TokenKind::Name)?;
            parser.expect(TokenKind::Colon)?;
            let type_expr = parse_expr(parser, BindingPower::Default)?;
            parameters.push(parser.push(
                NodeKind::GenericParameter {
                    name: binding_name(&parameter_token),
                    type_expr,
                },
                parameter_token.position,
            ));
            parser.expect_comma_or_newline()?;
        }

        parser.expect(TokenKind::CloseSquareBracket)?;
        generic_parameters = Some(parameters);
    }

    let mut type_expr = None;
    if parser.current_token_kind()? == TokenKind::Colon {
        parser.advance()?;
        parser.allow_newline()?;
        type_expr = Some(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect(TokenKind::Equal)?;
    parser.allow_newline()?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(parser.push(
        NodeKind::ConstDeclaration {
            name: binding_name(&name_token),
            generic_parameters,
            type_expr,
            value,
        },
        name_token.position,
    ))
}

/// `func(params): type { ... }` or the `proc` equivalent. A missing body
/// declares the routine without defining it.
pub fn parse_routine(parser: &mut Parser) -> Result<NodeId, Error> {
    let keyword_token = parser.expect_one_of(&[TokenKind::Func, TokenKind::Proc])?;
    parser.expect(TokenKind::OpenParenthesis)?;
    parser.allow_newline()?;

    let mut parameters = vec![];
    while parser.current_token_kind()? != TokenKind::CloseParenthesis {
        parameters.push(parse_declaration(parser)?);
        parser.expect_comma_or_newline()?;
    }

    parser.expect(TokenKind::CloseParenthesis)?;
    parser.expect(TokenKind::Colon)?;
    parser.allow_newline()?;
    let return_type = parse_least_expr(parser)?;

    let body = if parser.current_token_kind()? == TokenKind::OpenBrace {
        Some(parse_block(parser)?)
    } else {
        None
    };

    let kind = if keyword_token.kind == TokenKind::Func {
        NodeKind::Function {
            parameters,
            return_type,
            body,
        }
    } else {
        NodeKind::Procedure {
            parameters,
            return_type,
            body,
        }
    };

    Ok(parser.push(kind, keyword_token.position))
}

/// `return` with an optional value. The value is omitted when the
/// expression sequence ends right after the keyword.
pub fn parse_return(parser: &mut Parser) -> Result<NodeId, Error> {
    let return_token = parser.expect(TokenKind::Return)?;

    let next = parser.current_token_kind()?;
    let value = if next == TokenKind::Newline || next.is_closing() {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    Ok(parser.push(NodeKind::Return { value }, return_token.position))
}
