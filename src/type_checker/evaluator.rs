use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::{
    ast::{
        ast::{Ast, NodeId, NodeKind},
        visitor::Visitor,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::types::{TypeArena, TypeId};

/// Interprets a type expression as the type it denotes.
///
/// Only a small grammar is understood: `_` (a fresh placeholder), a
/// parenthesised type expression, and names bound to const declarations,
/// whose values are evaluated in turn. Results for consts are cached so every
/// use of the same const denotes the same type.
pub struct TypeEvaluator<'a> {
    types: &'a mut TypeArena,
    evaluated: &'a mut HashMap<NodeId, TypeId>,
    in_progress: HashSet<NodeId>,
}

impl<'a> TypeEvaluator<'a> {
    pub fn new(types: &'a mut TypeArena, evaluated: &'a mut HashMap<NodeId, TypeId>) -> Self {
        TypeEvaluator {
            types,
            evaluated,
            in_progress: HashSet::new(),
        }
    }

    pub fn evaluate(&mut self, ast: &Ast, id: NodeId) -> Result<TypeId, Error> {
        self.visit(ast, id, ())?.ok_or_else(|| {
            Error::internal(
                format!("{} evaluated to nothing", ast.kind(id).name()),
                ast.position(id).clone(),
            )
        })
    }

    fn evaluate_const(
        &mut self,
        ast: &Ast,
        name_id: NodeId,
        name: &str,
        constant: NodeId,
        value: NodeId,
    ) -> Result<TypeId, Error> {
        if let Some(evaluated) = self.evaluated.get(&constant) {
            return Ok(*evaluated);
        }

        if !self.in_progress.insert(constant) {
            return Err(Error::new(
                ErrorImpl::RecursiveTypeDefinition {
                    name: String::from(name),
                },
                ast.position(name_id).clone(),
            ));
        }

        let evaluated = self.evaluate(ast, value)?;
        self.in_progress.remove(&constant);
        self.evaluated.insert(constant, evaluated);

        trace!(name, ty = %self.types.display(evaluated), "evaluated const type");
        Ok(evaluated)
    }
}

impl Visitor for TypeEvaluator<'_> {
    type Arg = ();
    type Output = Option<TypeId>;

    fn visit(&mut self, ast: &Ast, id: NodeId, arg: ()) -> Result<Option<TypeId>, Error> {
        match ast.kind(id) {
            NodeKind::Wildcard => Ok(Some(self.types.placeholder())),
            NodeKind::ParenthesisedExpression { expression } => self.visit(ast, *expression, arg),
            NodeKind::Name { name, .. } => {
                let Some(declaration) = ast.declaration(id) else {
                    return Err(Error::internal(
                        format!("name '{}' has not been resolved", name),
                        ast.position(id).clone(),
                    ));
                };

                match ast.kind(declaration) {
                    NodeKind::ConstDeclaration { value, .. } => self
                        .evaluate_const(ast, id, name, declaration, *value)
                        .map(Some),
                    NodeKind::Declaration { .. } => Err(Error::new(
                        ErrorImpl::NotACompileTimeType { name: name.clone() },
                        ast.position(id).clone(),
                    )),
                    kind => Err(Error::unsupported(
                        format!("Using a {} as a type", kind.name()),
                        ast.position(id).clone(),
                    )),
                }
            }
            kind => Err(Error::unsupported(
                format!("Compile-time evaluation of {}", kind.name()),
                ast.position(id).clone(),
            )),
        }
    }
}
