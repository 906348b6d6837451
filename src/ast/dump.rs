use std::fmt::Write;

use crate::{errors::errors::Error, type_checker::types::TypeArena};

use super::{
    ast::{Ast, NodeId, NodeKind},
    visitor::Visitor,
};

/// Renders the tree as an indented outline, one node per `- ` line.
///
/// When `types` is given, every typed node is suffixed with `:: <type>`.
pub fn dump(ast: &Ast, types: Option<&TypeArena>) -> Result<String, Error> {
    let mut printer = TreePrinter {
        out: String::new(),
        types,
    };
    printer.visit(ast, ast.root(), 0)?;
    Ok(printer.out)
}

struct TreePrinter<'a> {
    out: String,
    types: Option<&'a TypeArena>,
}

impl TreePrinter<'_> {
    fn line(&mut self, indent: usize, text: &str) {
        let _ = writeln!(self.out, "{:width$}{}", "", text, width = indent * 2);
    }

    fn header(&mut self, ast: &Ast, id: NodeId, indent: usize, text: String) {
        let typed = match (self.types, ast.resolved_type(id)) {
            (Some(types), Some(type_id)) => format!("{} :: {}", text, types.display(type_id)),
            _ => text,
        };
        self.line(indent, &format!("- {}", typed));
    }

    fn field(&mut self, ast: &Ast, indent: usize, label: &str, children: &[NodeId]) -> Result<(), Error> {
        self.line(indent + 1, &format!("{}:", label));
        for child in children {
            self.visit(ast, *child, indent + 2)?;
        }
        Ok(())
    }
}

impl Visitor for TreePrinter<'_> {
    type Arg = usize;
    type Output = ();

    fn visit(&mut self, ast: &Ast, id: NodeId, indent: usize) -> Result<(), Error> {
        match ast.kind(id) {
            NodeKind::File { expressions } => {
                let text = format!("File: '{}'", ast.position(id).file);
                self.header(ast, id, indent, text);
                self.field(ast, indent, "Expressions", expressions)
            }
            NodeKind::Block { expressions } => {
                self.header(ast, id, indent, String::from("Block"));
                self.field(ast, indent, "Expressions", expressions)
            }
            NodeKind::Unary { operator, operand } => {
                self.header(ast, id, indent, format!("Unary: '{}'", operator));
                self.field(ast, indent, "Operand", &[*operand])
            }
            NodeKind::Binary {
                left,
                operator,
                right,
            } => {
                self.header(ast, id, indent, format!("Binary: '{}'", operator));
                self.field(ast, indent, "Left", &[*left])?;
                self.field(ast, indent, "Right", &[*right])
            }
            NodeKind::Integer { value } => {
                self.header(ast, id, indent, format!("Integer: {}", value));
                Ok(())
            }
            NodeKind::Float { value } => {
                self.header(ast, id, indent, format!("Float: {}", value));
                Ok(())
            }
            NodeKind::String { value } => {
                self.header(ast, id, indent, format!("String: {:?}", value));
                Ok(())
            }
            NodeKind::Name { name, .. } => {
                self.header(ast, id, indent, format!("Name: '{}'", name));
                Ok(())
            }
            NodeKind::Wildcard => {
                self.header(ast, id, indent, String::from("Wildcard"));
                Ok(())
            }
            NodeKind::Declaration { name, type_expr } => {
                self.header(ast, id, indent, format!("Declaration: '{}'", name));
                self.field(ast, indent, "Type", &[*type_expr])
            }
            NodeKind::GenericParameter { name, type_expr } => {
                self.header(ast, id, indent, format!("Generic Parameter: '{}'", name));
                self.field(ast, indent, "Type", &[*type_expr])
            }
            NodeKind::ConstDeclaration {
                name,
                generic_parameters,
                type_expr,
                value,
            } => {
                self.header(ast, id, indent, format!("Const Declaration: '{}'", name));
                if let Some(generic_parameters) = generic_parameters {
                    self.field(ast, indent, "Generic Parameters", generic_parameters)?;
                }
                if let Some(type_expr) = type_expr {
                    self.field(ast, indent, "Type", &[*type_expr])?;
                }
                self.field(ast, indent, "Value", &[*value])
            }
            NodeKind::Function {
                parameters,
                return_type,
                body,
            }
            | NodeKind::Procedure {
                parameters,
                return_type,
                body,
            } => {
                self.header(ast, id, indent, String::from(ast.kind(id).name()));
                self.field(ast, indent, "Parameters", parameters)?;
                self.field(ast, indent, "Return Type", &[*return_type])?;
                if let Some(body) = body {
                    self.field(ast, indent, "Body", &[*body])?;
                }
                Ok(())
            }
            NodeKind::Return { value } => {
                self.header(ast, id, indent, String::from("Return"));
                if let Some(value) = value {
                    self.field(ast, indent, "Value", &[*value])?;
                }
                Ok(())
            }
            NodeKind::If {
                condition,
                then_block,
                else_node,
            } => {
                self.header(ast, id, indent, String::from("If"));
                self.field(ast, indent, "Condition", &[*condition])?;
                self.field(ast, indent, "Then", &[*then_block])?;
                if let Some(else_node) = else_node {
                    self.field(ast, indent, "Else", &[*else_node])?;
                }
                Ok(())
            }
            NodeKind::Call { operand, arguments } => {
                self.header(ast, id, indent, String::from("Call"));
                self.field(ast, indent, "Operand", &[*operand])?;
                self.field(ast, indent, "Arguments", arguments)
            }
            NodeKind::GenericInstantiation { operand, arguments } => {
                self.header(ast, id, indent, String::from("Generic Instantiation"));
                self.field(ast, indent, "Operand", &[*operand])?;
                self.field(ast, indent, "Generic Arguments", arguments)
            }
            NodeKind::ParenthesisedExpression { expression } => {
                self.header(ast, id, indent, String::from("Parenthesised Expression"));
                self.field(ast, indent, "Expression", &[*expression])
            }
            NodeKind::FieldAccess { operand, field } => {
                self.header(ast, id, indent, format!("Field Access: '{}'", field));
                self.field(ast, indent, "Operand", &[*operand])
            }
            NodeKind::Builtin { name } => {
                self.header(ast, id, indent, format!("Builtin: {:?}", name));
                Ok(())
            }
            NodeKind::BuiltinArray { inner_type, length } => {
                self.header(ast, id, indent, String::from("Builtin Array"));
                self.field(ast, indent, "Type", &[*inner_type])?;
                self.field(ast, indent, "Length", &[*length])
            }
        }
    }
}
