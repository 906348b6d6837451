/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The node arena, node kinds and set-once resolution slots
/// - visitor: The visitor trait shared by every pass
/// - dump: Indented tree rendering for inspection
pub mod ast;
pub mod dump;
pub mod visitor;
