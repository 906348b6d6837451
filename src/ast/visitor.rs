use crate::errors::errors::Error;

use super::ast::{Ast, NodeId};

/// A pass over the syntax tree.
///
/// `Arg` is threaded down into every visited child, `Output` flows back up.
/// Implementors match on the node kinds they care about in [`Visitor::visit`]
/// and hand everything else to [`Visitor::walk`].
pub trait Visitor {
    type Arg: Clone;
    type Output: Default;

    fn visit(&mut self, ast: &Ast, id: NodeId, arg: Self::Arg) -> Result<Self::Output, Error>;

    /// Visits every child of `id` in order and discards their results.
    fn walk(&mut self, ast: &Ast, id: NodeId, arg: Self::Arg) -> Result<Self::Output, Error> {
        for child in ast.children(id) {
            self.visit(ast, child, arg.clone())?;
        }
        Ok(Self::Output::default())
    }
}
