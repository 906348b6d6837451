//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and its token-level helpers.
//! Expressions are parsed by precedence climbing with NUD handlers for the
//! primary forms; see [`super::expr`] and [`super::stmt`].
//!
//! It maintains lookup tables for:
//! - NUD (null denotation) handlers for primary expressions
//! - Binding powers of prefix operators
//! - Binding powers of binary operators

use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    ast::ast::{Ast, BindingName, Node, NodeId, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{create_token_lookups, BPLookup, BindingPower, NUDHandler, NUDLookup},
    stmt::parse_file,
};

/// The main parser structure that maintains parsing state.
///
/// Tokens are pulled from the lexer one at a time with a single token of
/// lookahead. Finished nodes are appended to `nodes` and referred to by id.
pub struct Parser<'source> {
    /// Source of tokens
    lexer: Lexer<'source>,
    /// Node arena under construction
    nodes: Vec<Node>,
    /// Lookup table for null denotation (primary) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for prefix operator binding powers
    prefix_binding_power_lookup: BPLookup,
    /// Lookup table for binary operator binding powers
    binding_power_lookup: BPLookup,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str, file: Option<String>) -> Self {
        Parser {
            lexer: Lexer::new(source, file),
            nodes: vec![],
            nud_lookup: HashMap::new(),
            prefix_binding_power_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    pub fn file(&self) -> Rc<String> {
        self.lexer.file()
    }

    /// Returns the kind of the next token without consuming it.
    pub fn current_token_kind(&mut self) -> Result<TokenKind, Error> {
        self.lexer.peek_kind()
    }

    /// Consumes and returns the next token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        self.lexer.next_token()
    }

    /// Consumes a token of the given kind or fails with
    /// `Expected '<kind>', but got '<token>'`.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let token = self.advance()?;
        if token.kind == expected_kind {
            return Ok(token);
        }

        Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: format!("'{}'", expected_kind),
                found: token.to_string(),
            },
            token.position,
        ))
    }

    /// Like [`Parser::expect`], accepting any of `kinds`.
    pub fn expect_one_of(&mut self, kinds: &[TokenKind]) -> Result<Token, Error> {
        if let [kind] = kinds {
            return self.expect(*kind);
        }

        let token = self.advance()?;
        if kinds.contains(&token.kind) {
            return Ok(token);
        }

        let expected = kinds
            .iter()
            .map(|kind| format!("'{}'", kind))
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: format!("one of [{}]", expected),
                found: token.to_string(),
            },
            token.position,
        ))
    }

    pub fn allow_newline(&mut self) -> Result<(), Error> {
        if self.current_token_kind()? == TokenKind::Newline {
            self.advance()?;
        }
        Ok(())
    }

    pub fn allow_multiple_newlines(&mut self) -> Result<(), Error> {
        while self.current_token_kind()? == TokenKind::Newline {
            self.advance()?;
        }
        Ok(())
    }

    /// Requires a statement-ending newline unless a closing delimiter or
    /// the end of the file follows.
    pub fn expect_newline(&mut self) -> Result<(), Error> {
        if !self.current_token_kind()?.is_closing() {
            self.expect(TokenKind::Newline)?;
        }
        Ok(())
    }

    /// Separator between list items: a comma, a newline, or nothing before
    /// a closing delimiter.
    pub fn expect_comma_or_newline(&mut self) -> Result<(), Error> {
        let kind = self.current_token_kind()?;
        if kind != TokenKind::Newline && !kind.is_closing() {
            self.expect(TokenKind::Comma)?;
        }
        self.allow_newline()
    }

    /// Appends a node to the arena.
    pub fn push(&mut self, kind: NodeKind, position: Position) -> NodeId {
        self.nodes.push(Node::new(kind, position));
        NodeId::new(self.nodes.len() - 1)
    }

    pub fn nud_handler(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    pub fn prefix_binding_power(&self, kind: TokenKind) -> Option<BindingPower> {
        self.prefix_binding_power_lookup.get(&kind).copied()
    }

    pub fn binding_power(&self, kind: TokenKind) -> Option<BindingPower> {
        self.binding_power_lookup.get(&kind).copied()
    }

    /// Registers a binary operator.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }

    /// Registers a prefix operator.
    pub fn prefix(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.prefix_binding_power_lookup.insert(kind, binding_power);
    }

    /// Registers a null denotation (primary) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }
}

/// The binding introduced by a `{name}` or `_` token.
pub fn binding_name(token: &Token) -> BindingName {
    match (token.kind, token.text()) {
        (TokenKind::Name, Some(name)) => BindingName::Named(String::from(name)),
        _ => BindingName::Wildcard,
    }
}

/// Parses a whole file into an [`Ast`].
///
/// This is the main entry point for parsing. Stops at the first lexical or
/// syntax error.
pub fn parse(source: &str, file: Option<String>) -> Result<Ast, Error> {
    let mut parser = Parser::new(source, file);
    create_token_lookups(&mut parser);

    let root = parse_file(&mut parser)?;
    debug!(nodes = parser.nodes.len(), "parsed {}", parser.file());

    Ok(Ast::new(parser.nodes, root))
}
