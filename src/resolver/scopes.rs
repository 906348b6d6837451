use std::collections::HashMap;

use crate::ast::ast::NodeId;

/// Names bound in one scope frame.
pub type Frame = HashMap<String, NodeId>;

/// Two parallel frame stacks: lexical bindings (parameters, declarations)
/// and eager bindings (consts, generic parameters).
///
/// Routine bodies swap out the lexical stack while the eager stack stays
/// intact, so consts remain visible inside closures while the enclosing
/// lexical bindings do not.
#[derive(Debug, Default)]
pub struct ScopeStack {
    lexical: Vec<Frame>,
    eager: Vec<Frame>,
    /// Lexical stacks put aside while inside routine bodies, outermost first.
    saved: Vec<Vec<Frame>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes an empty frame onto both stacks.
    pub fn push(&mut self) {
        self.lexical.push(Frame::new());
        self.eager.push(Frame::new());
    }

    pub fn pop(&mut self) {
        self.lexical.pop();
        self.eager.pop();
    }

    /// Hides every lexical binding; the body starts from a single fresh frame.
    pub fn enter_function(&mut self) {
        let outer = std::mem::replace(&mut self.lexical, vec![Frame::new()]);
        self.saved.push(outer);
    }

    /// Hides every lexical binding except the top-level ones, even when
    /// nested inside a function whose own stack has already been swapped.
    pub fn enter_procedure(&mut self) {
        let top_level = self
            .saved
            .first()
            .unwrap_or(&self.lexical)
            .first()
            .cloned()
            .unwrap_or_default();

        let outer = std::mem::replace(&mut self.lexical, vec![top_level, Frame::new()]);
        self.saved.push(outer);
    }

    /// Restores the lexical stack put aside by the matching `enter_*` call.
    pub fn leave_routine(&mut self) {
        if let Some(outer) = self.saved.pop() {
            self.lexical = outer;
        }
    }

    /// Whether `name` is already bound in the innermost frame of either stack.
    pub fn collides(&self, name: &str) -> bool {
        let in_frame = |frame: Option<&Frame>| frame.is_some_and(|frame| frame.contains_key(name));
        in_frame(self.lexical.last()) || in_frame(self.eager.last())
    }

    /// Binds `name` in the innermost lexical frame.
    pub fn declare_lexical(&mut self, name: &str, declaration: NodeId) {
        if let Some(frame) = self.lexical.last_mut() {
            frame.insert(String::from(name), declaration);
        }
    }

    /// Binds `name` in the innermost eager frame.
    pub fn declare_eager(&mut self, name: &str, declaration: NodeId) {
        if let Some(frame) = self.eager.last_mut() {
            frame.insert(String::from(name), declaration);
        }
    }

    /// Walks both stacks from the innermost frame outward in lockstep,
    /// checking the lexical frame before the eager one at each step.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        let mut lexical = self.lexical.iter().rev();
        let mut eager = self.eager.iter().rev();

        loop {
            let (lexical_frame, eager_frame) = (lexical.next(), eager.next());
            if lexical_frame.is_none() && eager_frame.is_none() {
                return None;
            }

            if let Some(found) = lexical_frame.and_then(|frame| frame.get(name)) {
                return Some(*found);
            }
            if let Some(found) = eager_frame.and_then(|frame| frame.get(name)) {
                return Some(*found);
            }
        }
    }
}
