use crate::{
    ast::{
        ast::{Ast, NodeId, NodeKind},
        visitor::Visitor,
    },
    errors::errors::Error,
};

/// Collects the const declarations that belong to the scope `id` sits in.
///
/// The search stops at anything that opens its own scope (files, blocks,
/// routines, declarations) and does not look inside the consts it finds.
pub fn search_const_declarations(ast: &Ast, id: NodeId) -> Result<Vec<NodeId>, Error> {
    let mut searcher = ConstSearcher { found: vec![] };
    searcher.visit(ast, id, ())?;
    Ok(searcher.found)
}

struct ConstSearcher {
    found: Vec<NodeId>,
}

impl Visitor for ConstSearcher {
    type Arg = ();
    type Output = ();

    fn visit(&mut self, ast: &Ast, id: NodeId, arg: ()) -> Result<(), Error> {
        match ast.kind(id) {
            NodeKind::ConstDeclaration { .. } => {
                self.found.push(id);
                Ok(())
            }
            NodeKind::File { .. }
            | NodeKind::Block { .. }
            | NodeKind::Declaration { .. }
            | NodeKind::Function { .. }
            | NodeKind::Procedure { .. } => Ok(()),
            _ => self.walk(ast, id, arg),
        }
    }
}
