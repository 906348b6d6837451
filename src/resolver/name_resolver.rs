use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Ast, BindingName, NodeId, NodeKind},
        visitor::Visitor,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{const_search::search_const_declarations, scopes::ScopeStack};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Namespace {
    Lexical,
    Eager,
}

/// Binds every `Name` node to the declaration it refers to.
pub struct NameResolver {
    scopes: ScopeStack,
    bound: usize,
}

impl NameResolver {
    pub fn new() -> Self {
        NameResolver {
            scopes: ScopeStack::new(),
            bound: 0,
        }
    }

    /// Registers the binding introduced by `id` in the innermost frame.
    /// Wildcards bind nothing.
    fn declare(&mut self, ast: &Ast, id: NodeId, namespace: Namespace) -> Result<(), Error> {
        let Some(name) = ast.binding_name(id).and_then(BindingName::as_name) else {
            return Ok(());
        };

        if self.scopes.collides(name) {
            return Err(Error::new(
                ErrorImpl::NameCollision {
                    name: String::from(name),
                },
                ast.position(id).clone(),
            ));
        }

        trace!(name, ?namespace, declaration = ?id, "declared");
        match namespace {
            Namespace::Lexical => self.scopes.declare_lexical(name, id),
            Namespace::Eager => self.scopes.declare_eager(name, id),
        }
        Ok(())
    }

    /// Opens a frame for a file or block, pre-registers its consts so they
    /// can be referenced before their declaration, then visits the body.
    fn visit_scope(&mut self, ast: &Ast, expressions: &[NodeId]) -> Result<(), Error> {
        self.scopes.push();

        for expression in expressions {
            for constant in search_const_declarations(ast, *expression)? {
                self.declare(ast, constant, Namespace::Eager)?;
            }
        }

        for expression in expressions {
            self.visit(ast, *expression, ())?;
        }

        self.scopes.pop();
        Ok(())
    }

    fn visit_routine(
        &mut self,
        ast: &Ast,
        id: NodeId,
        enter: fn(&mut ScopeStack),
    ) -> Result<(), Error> {
        self.scopes.push();
        enter(&mut self.scopes);

        let result = self.walk(ast, id, ());

        self.scopes.leave_routine();
        self.scopes.pop();
        result
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for NameResolver {
    type Arg = ();
    type Output = ();

    fn visit(&mut self, ast: &Ast, id: NodeId, arg: ()) -> Result<(), Error> {
        match ast.kind(id) {
            NodeKind::File { expressions } | NodeKind::Block { expressions } => {
                self.visit_scope(ast, expressions)
            }
            NodeKind::Name { name, .. } => {
                let Some(declaration) = self.scopes.lookup(name) else {
                    return Err(Error::new(
                        ErrorImpl::UnresolvedName { name: name.clone() },
                        ast.position(id).clone(),
                    ));
                };

                trace!(name = name.as_str(), ?declaration, "bound");
                self.bound += 1;
                ast.set_declaration(id, declaration)
            }
            NodeKind::Declaration { type_expr, .. } => {
                self.declare(ast, id, Namespace::Lexical)?;
                self.scopes.push();
                self.visit(ast, *type_expr, arg)?;
                self.scopes.pop();
                Ok(())
            }
            NodeKind::GenericParameter { type_expr, .. } => {
                self.declare(ast, id, Namespace::Eager)?;
                self.scopes.push();
                self.visit(ast, *type_expr, arg)?;
                self.scopes.pop();
                Ok(())
            }
            NodeKind::ConstDeclaration { .. } => {
                self.scopes.push();
                self.walk(ast, id, arg)?;
                self.scopes.pop();
                Ok(())
            }
            NodeKind::Function { .. } => self.visit_routine(ast, id, ScopeStack::enter_function),
            NodeKind::Procedure { .. } => self.visit_routine(ast, id, ScopeStack::enter_procedure),
            _ => self.walk(ast, id, arg),
        }
    }
}

/// Resolves every name in `ast`, failing on the first one that is not in
/// scope or on a binding that collides with one in the same frame.
pub fn resolve_names(ast: &Ast) -> Result<(), Error> {
    let mut resolver = NameResolver::new();
    resolver.visit(ast, ast.root(), ())?;

    debug!(names = resolver.bound, "resolved names");
    Ok(())
}
