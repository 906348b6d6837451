use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Ast, NodeId, NodeKind},
        visitor::Visitor,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    resolver::const_search::search_const_declarations,
    Position,
};

use super::{
    evaluator::TypeEvaluator,
    types::{TypeArena, TypeId, TypeKind},
};

/// Assigns a type to every node. The argument threaded through the visit is
/// the type the surrounding context expects, if any.
pub struct TypeResolver {
    types: TypeArena,
    /// Types denoted by const declarations, shared across evaluations.
    evaluated: HashMap<NodeId, TypeId>,
}

impl TypeResolver {
    pub fn new() -> Self {
        TypeResolver {
            types: TypeArena::new(),
            evaluated: HashMap::new(),
        }
    }

    pub fn types(&self) -> &TypeArena {
        &self.types
    }

    pub fn into_types(self) -> TypeArena {
        self.types
    }

    /// Visits `id` and returns the type it was given.
    fn resolve(&mut self, ast: &Ast, id: NodeId, expected: Option<TypeId>) -> Result<TypeId, Error> {
        self.visit(ast, id, expected)?;
        ast.resolved_type(id).ok_or_else(|| {
            Error::new(ErrorImpl::UnresolvedType, ast.position(id).clone())
        })
    }

    /// Keeps `expected` when it already has the default's kind, fills it in
    /// when it is an open placeholder, and falls back to `default` otherwise.
    fn resolve_or_default(&mut self, expected: Option<TypeId>, default: TypeId) -> TypeId {
        let Some(expected) = expected else {
            return default;
        };

        if self.types.kind(expected) == self.types.kind(default) {
            return expected;
        }
        if self.types.resolve_placeholder(expected, default) {
            trace!(placeholder = ?expected, ty = %self.types.display(default), "resolved placeholder");
            return expected;
        }
        default
    }

    /// Makes a value of type `from` assignable to `to`. An open placeholder on
    /// either side takes the other side's type; the two must then be equal.
    fn unify(&mut self, from: TypeId, to: TypeId, position: &Position) -> Result<(), Error> {
        if self.types.is_placeholder(to) {
            self.types.resolve_placeholder(to, from);
            trace!(placeholder = ?to, with = ?from, "unified");
        } else if self.types.is_placeholder(from) {
            self.types.resolve_placeholder(from, to);
            trace!(placeholder = ?from, with = ?to, "unified");
        }

        if !self.types.equal(from, to) {
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    from: self.types.display(from),
                    to: self.types.display(to),
                },
                position.clone(),
            ));
        }
        Ok(())
    }

    /// Resolves the type expression of a declaration and evaluates the type
    /// it denotes.
    fn resolve_type_expression(&mut self, ast: &Ast, type_expr: NodeId) -> Result<TypeId, Error> {
        let type_type = self.resolve(ast, type_expr, Some(TypeId::TYPE))?;
        if self.types.kind(type_type) != TypeKind::Type {
            return Err(Error::new(
                ErrorImpl::NotAType {
                    found: self.types.display(type_type),
                },
                ast.position(type_expr).clone(),
            ));
        }

        TypeEvaluator::new(&mut self.types, &mut self.evaluated).evaluate(ast, type_expr)
    }

    /// The binding type of a const, created on first request.
    fn binding_type(&mut self, ast: &Ast, constant: NodeId) -> Result<TypeId, Error> {
        if let Some(binding) = ast.resolved_type(constant) {
            return Ok(binding);
        }

        let binding = self.types.placeholder();
        ast.set_resolved_type(constant, binding)?;
        Ok(binding)
    }

    fn visit_scope(
        &mut self,
        ast: &Ast,
        id: NodeId,
        expressions: &[NodeId],
        expected: Option<TypeId>,
    ) -> Result<(), Error> {
        let scope_type = self.resolve_or_default(expected, TypeId::VOID);
        ast.set_resolved_type(id, scope_type)?;

        for expression in expressions {
            for constant in search_const_declarations(ast, *expression)? {
                self.binding_type(ast, constant)?;
            }
        }

        for expression in expressions {
            self.visit(ast, *expression, None)?;
        }
        Ok(())
    }

    fn visit_assignment(
        &mut self,
        ast: &Ast,
        id: NodeId,
        left: NodeId,
        operator: TokenKind,
        right: NodeId,
    ) -> Result<(), Error> {
        let left_type = self.resolve(ast, left, None)?;
        let right_type = self.resolve(ast, right, Some(left_type))?;

        let (from, to) = if operator == TokenKind::LeftArrow {
            (right_type, left_type)
        } else {
            (left_type, right_type)
        };

        self.unify(from, to, ast.position(id))?;
        ast.set_resolved_type(id, to)
    }

    fn visit_const(
        &mut self,
        ast: &Ast,
        id: NodeId,
        generic_parameters: Option<&Vec<NodeId>>,
        type_expr: Option<NodeId>,
        value: NodeId,
    ) -> Result<(), Error> {
        let binding = self.binding_type(ast, id)?;

        if generic_parameters.is_some() {
            return Err(Error::unsupported(
                "Type resolution of generic const declarations",
                ast.position(id).clone(),
            ));
        }

        if let Some(type_expr) = type_expr {
            let annotated = self.resolve_type_expression(ast, type_expr)?;
            self.unify(annotated, binding, ast.position(type_expr))?;
        }

        let value_type = self.resolve(ast, value, Some(binding))?;
        self.unify(value_type, binding, ast.position(id))
    }

    fn visit_name(
        &mut self,
        ast: &Ast,
        id: NodeId,
        name: &str,
        expected: Option<TypeId>,
    ) -> Result<(), Error> {
        let Some(declaration) = ast.declaration(id) else {
            return Err(Error::internal(
                format!("name '{}' has not been resolved", name),
                ast.position(id).clone(),
            ));
        };

        let Some(declared) = ast.resolved_type(declaration) else {
            return Err(Error::new(
                ErrorImpl::TypeNotYetKnown {
                    name: String::from(name),
                },
                ast.position(id).clone(),
            ));
        };

        if let Some(expected) = expected {
            if self.types.is_placeholder(declared) {
                self.types.resolve_placeholder(declared, expected);
                trace!(name, placeholder = ?declared, with = ?expected, "unified");
            }
        }

        ast.set_resolved_type(id, declared)
    }
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for TypeResolver {
    type Arg = Option<TypeId>;
    type Output = ();

    fn visit(&mut self, ast: &Ast, id: NodeId, expected: Option<TypeId>) -> Result<(), Error> {
        match ast.kind(id) {
            NodeKind::File { expressions } | NodeKind::Block { expressions } => {
                self.visit_scope(ast, id, expressions, expected)
            }
            NodeKind::Integer { .. } => {
                let ty = self.resolve_or_default(expected, TypeId::INTEGER);
                ast.set_resolved_type(id, ty)
            }
            NodeKind::Float { .. } => {
                let ty = self.resolve_or_default(expected, TypeId::FLOAT);
                ast.set_resolved_type(id, ty)
            }
            NodeKind::String { .. } => {
                let ty = self.resolve_or_default(expected, TypeId::STRING);
                ast.set_resolved_type(id, ty)
            }
            NodeKind::Wildcard => {
                let ty = match expected {
                    Some(expected) => expected,
                    None => self.types.placeholder(),
                };
                ast.set_resolved_type(id, ty)
            }
            NodeKind::Name { name, .. } => self.visit_name(ast, id, name, expected),
            NodeKind::ParenthesisedExpression { expression } => {
                let inner = self.resolve(ast, *expression, expected)?;
                ast.set_resolved_type(id, inner)
            }
            NodeKind::Declaration { type_expr, .. } => {
                let declared = self.resolve_type_expression(ast, *type_expr)?;
                ast.set_resolved_type(id, declared)
            }
            NodeKind::ConstDeclaration {
                generic_parameters,
                type_expr,
                value,
                ..
            } => self.visit_const(ast, id, generic_parameters.as_ref(), *type_expr, *value),
            NodeKind::Binary {
                left,
                operator: operator @ (TokenKind::LeftArrow | TokenKind::RightArrow),
                right,
            } => self.visit_assignment(ast, id, *left, *operator, *right),
            NodeKind::Binary { operator, .. } | NodeKind::Unary { operator, .. } => {
                Err(Error::unsupported(
                    format!("Type resolution of operator '{}'", operator),
                    ast.position(id).clone(),
                ))
            }
            kind => Err(Error::unsupported(
                format!("Type resolution of {}", kind.name()),
                ast.position(id).clone(),
            )),
        }
    }
}

/// Fails on the first node, in post-order, that was never given a type.
fn check_resolved(ast: &Ast, id: NodeId) -> Result<(), Error> {
    for child in ast.children(id) {
        check_resolved(ast, child)?;
    }

    if ast.resolved_type(id).is_none() {
        return Err(Error::new(
            ErrorImpl::UnresolvedType,
            ast.position(id).clone(),
        ));
    }
    Ok(())
}

/// Resolves the type of every node in a name-resolved `ast`.
pub fn resolve_types(ast: &Ast) -> Result<TypeArena, Error> {
    let mut resolver = TypeResolver::new();
    resolver.visit(ast, ast.root(), None)?;
    check_resolved(ast, ast.root())?;

    debug!(nodes = ast.len(), types = resolver.types().len(), "resolved types");
    Ok(resolver.into_types())
}
