use std::{cell::OnceCell, fmt::Display};

use crate::{
    errors::errors::Error,
    lexer::tokens::TokenKind,
    type_checker::types::TypeId,
    Position, MK_ID,
};

use super::visitor::Visitor;

MK_ID!(NodeId, "Index of a node in the syntax tree arena.");

/// The name introduced by a declaration: either a real identifier or `_`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingName {
    Named(String),
    Wildcard,
}

impl BindingName {
    /// The identifier, if this binding introduces one.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            BindingName::Named(name) => Some(name),
            BindingName::Wildcard => None,
        }
    }
}

impl Display for BindingName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingName::Named(name) => write!(f, "{}", name),
            BindingName::Wildcard => write!(f, "_"),
        }
    }
}

/// Node variants. Children are held as ids into the owning [`Ast`].
#[derive(Debug, Clone)]
pub enum NodeKind {
    File {
        expressions: Vec<NodeId>,
    },
    Unary {
        operator: TokenKind,
        operand: NodeId,
    },
    Binary {
        left: NodeId,
        operator: TokenKind,
        right: NodeId,
    },
    Integer {
        value: i64,
    },
    Float {
        value: f64,
    },
    String {
        value: String,
    },
    Name {
        name: String,
        /// Set once by the name resolver.
        declaration: OnceCell<NodeId>,
    },
    Wildcard,
    Declaration {
        name: BindingName,
        type_expr: NodeId,
    },
    GenericParameter {
        name: BindingName,
        type_expr: NodeId,
    },
    ConstDeclaration {
        name: BindingName,
        generic_parameters: Option<Vec<NodeId>>,
        type_expr: Option<NodeId>,
        value: NodeId,
    },
    Function {
        parameters: Vec<NodeId>,
        return_type: NodeId,
        body: Option<NodeId>,
    },
    Procedure {
        parameters: Vec<NodeId>,
        return_type: NodeId,
        body: Option<NodeId>,
    },
    Block {
        expressions: Vec<NodeId>,
    },
    Return {
        value: Option<NodeId>,
    },
    If {
        condition: NodeId,
        then_block: NodeId,
        else_node: Option<NodeId>,
    },
    Call {
        operand: NodeId,
        arguments: Vec<NodeId>,
    },
    GenericInstantiation {
        operand: NodeId,
        arguments: Vec<NodeId>,
    },
    ParenthesisedExpression {
        expression: NodeId,
    },
    FieldAccess {
        operand: NodeId,
        field: String,
    },
    Builtin {
        name: String,
    },
    BuiltinArray {
        inner_type: NodeId,
        length: NodeId,
    },
}

impl NodeKind {
    /// Human readable variant name, as printed by the tree dump.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::File { .. } => "File",
            NodeKind::Unary { .. } => "Unary",
            NodeKind::Binary { .. } => "Binary",
            NodeKind::Integer { .. } => "Integer",
            NodeKind::Float { .. } => "Float",
            NodeKind::String { .. } => "String",
            NodeKind::Name { .. } => "Name",
            NodeKind::Wildcard => "Wildcard",
            NodeKind::Declaration { .. } => "Declaration",
            NodeKind::GenericParameter { .. } => "Generic Parameter",
            NodeKind::ConstDeclaration { .. } => "Const Declaration",
            NodeKind::Function { .. } => "Function",
            NodeKind::Procedure { .. } => "Procedure",
            NodeKind::Block { .. } => "Block",
            NodeKind::Return { .. } => "Return",
            NodeKind::If { .. } => "If",
            NodeKind::Call { .. } => "Call",
            NodeKind::GenericInstantiation { .. } => "Generic Instantiation",
            NodeKind::ParenthesisedExpression { .. } => "Parenthesised Expression",
            NodeKind::FieldAccess { .. } => "Field Access",
            NodeKind::Builtin { .. } => "Builtin",
            NodeKind::BuiltinArray { .. } => "Builtin Array",
        }
    }

    /// The ordered child list used by generic traversal.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::File { expressions } | NodeKind::Block { expressions } => expressions.clone(),
            NodeKind::Unary { operand, .. } => vec![*operand],
            NodeKind::Binary { left, right, .. } => vec![*left, *right],
            NodeKind::Integer { .. }
            | NodeKind::Float { .. }
            | NodeKind::String { .. }
            | NodeKind::Name { .. }
            | NodeKind::Wildcard
            | NodeKind::Builtin { .. } => vec![],
            NodeKind::Declaration { type_expr, .. }
            | NodeKind::GenericParameter { type_expr, .. } => vec![*type_expr],
            NodeKind::ConstDeclaration {
                generic_parameters,
                type_expr,
                value,
                ..
            } => {
                let mut children = generic_parameters.clone().unwrap_or_default();
                children.extend(type_expr);
                children.push(*value);
                children
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
                let mut children = parameters.clone();
                children.push(*return_type);
                children.extend(body);
                children
            }
            NodeKind::Return { value } => value.iter().copied().collect(),
            NodeKind::If {
                condition,
                then_block,
                else_node,
            } => {
                let mut children = vec![*condition, *then_block];
                children.extend(else_node);
                children
            }
            NodeKind::Call {
                operand, arguments, ..
            }
            | NodeKind::GenericInstantiation {
                operand, arguments, ..
            } => {
                let mut children = vec![*operand];
                children.extend(arguments.iter().copied());
                children
            }
            NodeKind::ParenthesisedExpression { expression } => vec![*expression],
            NodeKind::FieldAccess { operand, .. } => vec![*operand],
            NodeKind::BuiltinArray { inner_type, length } => vec![*inner_type, *length],
        }
    }

    /// The binding name of a declaration-like node.
    pub fn binding_name(&self) -> Option<&BindingName> {
        match self {
            NodeKind::Declaration { name, .. }
            | NodeKind::GenericParameter { name, .. }
            | NodeKind::ConstDeclaration { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Position,
    /// Set once by the type resolver.
    resolved_type: OnceCell<TypeId>,
}

impl Node {
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Node {
            kind,
            position,
            resolved_type: OnceCell::new(),
        }
    }
}

/// The syntax tree of one file.
///
/// Nodes live in a flat arena and refer to each other through [`NodeId`].
/// Structure is fixed once parsing ends; the only later writes go to the
/// set-once declaration and type slots, which is why the passes only ever
/// need `&Ast`.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    pub fn new(nodes: Vec<Node>, root: NodeId) -> Self {
        Ast { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn position(&self, id: NodeId) -> &Position {
        &self.node(id).position
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.kind(id).children()
    }

    pub fn binding_name(&self, id: NodeId) -> Option<&BindingName> {
        self.kind(id).binding_name()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node id, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Dispatches `visitor` on `id`.
    pub fn accept<V: Visitor>(
        &self,
        visitor: &mut V,
        id: NodeId,
        arg: V::Arg,
    ) -> Result<V::Output, Error> {
        visitor.visit(self, id, arg)
    }

    pub fn resolved_type(&self, id: NodeId) -> Option<TypeId> {
        self.node(id).resolved_type.get().copied()
    }

    pub fn set_resolved_type(&self, id: NodeId, type_id: TypeId) -> Result<(), Error> {
        self.node(id).resolved_type.set(type_id).map_err(|_| {
            Error::internal(
                format!("type of {} assigned twice", self.kind(id).name()),
                self.position(id).clone(),
            )
        })
    }

    /// The declaration a `Name` node was bound to, once names are resolved.
    pub fn declaration(&self, id: NodeId) -> Option<NodeId> {
        match self.kind(id) {
            NodeKind::Name { declaration, .. } => declaration.get().copied(),
            _ => None,
        }
    }

    pub fn set_declaration(&self, id: NodeId, declaration_id: NodeId) -> Result<(), Error> {
        let NodeKind::Name { name, declaration } = self.kind(id) else {
            return Err(Error::internal(
                format!("cannot bind a {} node", self.kind(id).name()),
                self.position(id).clone(),
            ));
        };

        declaration.set(declaration_id).map_err(|_| {
            Error::internal(
                format!("name '{}' bound twice", name),
                self.position(id).clone(),
            )
        })
    }
}
