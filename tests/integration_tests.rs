//! Integration tests for end-to-end compilation.
//!
//! These tests verify that the complete front end works correctly from
//! source code through tokenization, parsing, name resolution and type
//! resolution.

use langite::{
    ast::{ast::NodeKind, dump::dump},
    compile,
    errors::errors::{ErrorCategory, ErrorImpl},
    lexer::tokens::TokenKind,
    parse, render_error, resolve_names, tokenize,
    type_checker::types::TypeId,
};

fn file(name: &str) -> Option<String> {
    Some(name.to_string())
}

#[test]
fn test_compile_single_const() {
    let program = compile("const x = 1\n", file("test.lang")).unwrap();
    let ast = &program.ast;

    let expressions = ast.children(ast.root());
    assert_eq!(expressions.len(), 1);

    let NodeKind::ConstDeclaration { name, value, .. } = ast.kind(expressions[0]) else {
        panic!("Expected a const declaration");
    };
    assert_eq!(name.to_string(), "x");
    assert!(matches!(ast.kind(*value), NodeKind::Integer { value: 1 }));

    let value_type = ast.resolved_type(*value).unwrap();
    assert!(program.types.equal(value_type, TypeId::INTEGER));
    assert_eq!(program.types.display(value_type), "int");
}

#[test]
fn test_unknown_type_name_points_at_name() {
    let source = "a: Int\n";
    let error = compile(source, file("test.lang")).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Diagnostic);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnresolvedName {
            name: "Int".to_string()
        }
    );

    let rendered = render_error(&error, source);
    assert_eq!(
        rendered.lines().take(4).collect::<Vec<_>>(),
        vec![
            "test.lang:1:4: Unable to find name 'Int'",
            "  |",
            "1 | a: Int",
            "  |    ^",
        ]
    );
}

#[test]
fn test_else_if_chain() {
    let ast = parse("if true { 1 } else if false { 2 } else { 3 }", file("test.lang")).unwrap();

    let expressions = ast.children(ast.root());
    assert_eq!(expressions.len(), 1);

    let NodeKind::If {
        else_node: Some(else_node),
        ..
    } = ast.kind(expressions[0])
    else {
        panic!("Expected an if with an else branch");
    };
    let NodeKind::If {
        else_node: Some(last),
        ..
    } = ast.kind(*else_node)
    else {
        panic!("Expected an else-if");
    };
    assert!(matches!(ast.kind(*last), NodeKind::Block { .. }));
}

#[test]
fn test_unterminated_string_points_at_quote() {
    let error = compile("const s = \"abc", file("test.lang")).unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_position().offset, 10);
    assert_eq!(
        error.to_string(),
        "test.lang:1:11: String literal unclosed at end of file"
    );
}

#[test]
fn test_forward_const_reference_in_block() {
    let source = "const T = _\nconst f = func(): T {\n  const A = B\n  const B = 1\n  A\n}\n";
    let ast = parse(source, file("test.lang")).unwrap();
    resolve_names(&ast).unwrap();

    let reference = ast
        .ids()
        .find(|id| matches!(ast.kind(*id), NodeKind::Name { name, .. } if name == "B"))
        .unwrap();
    let declaration = ast.declaration(reference).unwrap();
    assert_eq!(ast.position(declaration).line, 4);
}

#[test]
fn test_procedure_scoping() {
    let nested_block = "const T = _\nconst f = func(a: T): T {\n  if a { a }\n}\n";
    let ast = parse(nested_block, file("test.lang")).unwrap();
    assert!(resolve_names(&ast).is_ok());

    let nested_procedure = "const T = _\nconst f = func(a: T): T {\n  proc(): T { a }\n}\n";
    let ast = parse(nested_procedure, file("test.lang")).unwrap();
    let error = resolve_names(&ast).unwrap_err();
    assert_eq!(error.to_string(), "test.lang:3:15: Unable to find name 'a'");
}

#[test]
fn test_placeholder_unification() {
    let program = compile("const a = _\nconst b = _\nb -> a\na <- 2.5\n", file("test.lang")).unwrap();
    let ast = &program.ast;

    for id in ast.ids() {
        if let NodeKind::ConstDeclaration { .. } = ast.kind(id) {
            assert_eq!(program.types.display(ast.resolved_type(id).unwrap()), "float");
        }
    }
}

#[test]
fn test_typed_dump() {
    let program = compile("const a = _\nconst b = \"hi\"\na <- b\n", file("test.lang")).unwrap();
    let dumped = dump(&program.ast, Some(&program.types)).unwrap();

    assert!(dumped.starts_with("- File: 'test.lang' :: void\n"));
    assert!(dumped.contains("- Const Declaration: 'a' :: string"));
    assert!(dumped.contains("- Binary: '<-' :: string"));
}

#[test]
fn test_unsupported_is_distinguished() {
    let error = compile("1 + 2\n", file("test.lang")).unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Unsupported);

    let error = compile("/* note */\n", file("test.lang")).unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Unsupported);

    let error = compile("const a = 1\nconst a = 2\n", file("test.lang")).unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Diagnostic);
    assert_eq!(error.get_error_name(), "NameCollision");
}

#[test]
fn test_tokenize_whole_file() {
    let tokens = tokenize("const x = 0x1F // hex\nx -> y\n", None).unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Const,
            TokenKind::Name,
            TokenKind::Equal,
            TokenKind::Integer,
            TokenKind::Newline,
            TokenKind::Name,
            TokenKind::RightArrow,
            TokenKind::Name,
            TokenKind::Newline,
            TokenKind::EndOfFile,
        ]
    );
    assert_eq!(tokens[0].position.file.as_str(), "shell");
}
