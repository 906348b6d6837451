#![allow(clippy::module_inception)]

use std::{fmt::Display, fmt::Write, rc::Rc};

use tracing::debug;

use crate::{
    ast::ast::Ast,
    errors::errors::{Error, ErrorTip},
    type_checker::types::TypeArena,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod resolver;
pub mod type_checker;

extern crate regex;

pub use crate::{
    lexer::lexer::tokenize, parser::parser::parse, resolver::name_resolver::resolve_names,
    type_checker::type_checker::resolve_types,
};

/// A location in a source file: byte offset plus 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub file: Rc<String>,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(file: Rc<String>, offset: usize, line: usize, column: usize) -> Self {
        Position {
            file,
            offset,
            line,
            column,
        }
    }

    /// The very first character of `file`.
    pub fn start_of(file: Rc<String>) -> Self {
        Position::new(file, 0, 1, 1)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A fully resolved compilation unit.
#[derive(Debug)]
pub struct Program {
    pub ast: Ast,
    pub types: TypeArena,
}

/// Runs the whole front end over one file: parsing, name resolution and
/// type resolution. Stops at the first error.
pub fn compile(source: &str, file: Option<String>) -> Result<Program, Error> {
    let ast = parse(source, file)?;
    resolve_names(&ast)?;
    let types = resolve_types(&ast)?;
    debug!(nodes = ast.len(), types = types.len(), "compiled {}", ast.position(ast.root()).file);
    Ok(Program { ast, types })
}

/// Finds the line containing byte `offset`, returning its 1-based number
/// and its text without the line terminator.
pub fn get_line_at_position(source: &str, offset: usize) -> Option<(usize, &str)> {
    if offset > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        // End of input on an unterminated last line still belongs to it.
        if (start..end).contains(&offset) || (offset == end && !line.ends_with('\n')) {
            return Some((line_number, line.trim_end_matches(&['\n', '\r'][..])));
        }

        start = end;
        line_number += 1;
    }

    // End of input right after a trailing newline, or an empty source.
    Some((line_number, ""))
}

/// Renders an error the way the CLI prints it:
///
/// ```text
/// test.lang:2:4: Unable to find name 'Int'
///   |
/// 2 | a: Int
///   |    ^
///   = help: Declare `Int` before using it, or make it a `const`
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut rendered = format!("{}\n", error);

    if let Some((line, line_text)) = get_line_at_position(source, position.offset) {
        let line_string = line.to_string();
        let padding = line_string.len() + 2;
        let arrows = position.column.max(1);

        let _ = writeln!(rendered, "{:>padding$}", "|");
        let _ = writeln!(rendered, "{} | {}", line_string, line_text);
        let _ = writeln!(rendered, "{:>padding$} {:>arrows$}", "|", "^");
    }

    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        let _ = writeln!(rendered, "  = help: {}", tip);
    }

    rendered
}
