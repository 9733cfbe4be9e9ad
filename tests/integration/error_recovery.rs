// Error Recovery & Malformed Input Tests
//
// A malformed statement records a diagnostic and the parser moves on to
// the next statement; nothing panics and nothing aborts early.

mod common;
use common::*;

use saikac::diagnostics::Diagnostic;
use saikac::parser::ast::Statement;

// ============================================================
// Missing Tokens
// ============================================================

#[test]
fn missing_closing_paren_in_parameters() {
    transpile_should_fail_with("數 main( { }", "expected next token to be ), got {");
}

#[test]
fn missing_function_name() {
    transpile_should_fail_with("數 (x) { }", "expected next token to be IDENT, got (");
}

#[test]
fn missing_opening_brace() {
    transpile_should_fail_with("數 f()\n\treturn 1\n}", "expected next token to be {, got return");
}

#[test]
fn missing_closing_brace_at_eof() {
    transpile_should_fail_with("數 f() {\n\tx = 1\n", "expected next token to be }, got EOF");
}

#[test]
fn missing_closing_paren_in_call() {
    transpile_should_fail_with("f(1, 2", "expected next token to be ), got EOF");
}

#[test]
fn missing_colon_in_hash() {
    transpile_should_fail_with("x = {\"a\" 1}", "expected next token to be :, got INT");
}

#[test]
fn missing_brace_after_for_clauses() {
    transpile_should_fail_with("for i := 0; i < 3; i++\n x", "expected next token to be {, got IDENT");
}

#[test]
fn missing_variable_name() {
    transpile_should_fail_with("let = 5", "expected next token to be IDENT, got =");
}

#[test]
fn missing_import_path() {
    transpile_should_fail_with("import fmt", "expected next token to be STRING, got EOF");
}

// ============================================================
// Unexpected Tokens
// ============================================================

#[test]
fn no_prefix_for_closing_paren() {
    transpile_should_fail_with("x = )", "no prefix parse function for ) found");
}

#[test]
fn no_prefix_for_illegal_token() {
    let (_, diagnostics) = parse_errors("let x = @");
    assert!(matches!(diagnostics[0], Diagnostic::Lexical { .. }));
    assert!(matches!(diagnostics[1], Diagnostic::Syntax { .. }));
    assert_eq!(diagnostics[1].message(), "no prefix parse function for ILLEGAL found");
}

#[test]
fn non_struct_type_declaration() {
    transpile_should_fail_with("type Alias 整數", "only struct type declarations are supported, got IDENT");
}

#[test]
fn struct_field_without_type() {
    transpile_should_fail_with("struct P { x }", "expected next token to be IDENT, got }");
}

// ============================================================
// Recovery
// ============================================================

#[test]
fn recovery_continues_after_bad_function() {
    let (program, diagnostics) = parse_errors("數 broken( { x = 1 }\n數 ok() { }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(program.statements.len(), 1);
    let Statement::Function(func) = &program.statements[0] else { panic!("expected function") };
    assert_eq!(func.name.value, "ok");
}

#[test]
fn recovery_reports_every_bad_statement() {
    let (program, diagnostics) = parse_errors("let = 5\nlet y = 2\nvar = 3\nconst z = 4");
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].position().line, 1);
    assert_eq!(diagnostics[1].position().line, 3);
    let names: Vec<String> = program.statements.iter().map(ToString::to_string).collect();
    assert_eq!(names, vec!["var y = 2", "const z = 4"]);
}

#[test]
fn recovery_skips_nested_braces() {
    let (program, diagnostics) = parse_errors("數 f( { if a { let b = 1 } }\npackage after");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(program.statements.len(), 1);
    assert!(matches!(program.statements[0], Statement::Package(_)));
}

#[test]
fn lexical_errors_do_not_stop_parsing() {
    let (program, diagnostics) = parse_errors("var s = \"a\\qb\"\nvar n = 1");
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0], Diagnostic::Lexical { .. }));
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn malformed_number_is_lexical_then_syntax() {
    let (_, diagnostics) = parse_errors("x = 123abc");
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message()).collect();
    assert_eq!(messages, vec!["invalid numeric literal 123abc", "no prefix parse function for ILLEGAL found"]);
    assert!(matches!(diagnostics[0], Diagnostic::Lexical { .. }));
    assert!(matches!(diagnostics[1], Diagnostic::Syntax { .. }));
    assert!(diagnostics.iter().all(|d| d.position().column == 5));
}

#[test]
fn recovery_reaches_expression_siblings() {
    let (program, diagnostics) = parse_errors("x = )
y = ]
for i := 0; i < 3; i++ { z = ) }");
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message()).collect();
    assert_eq!(
        messages,
        vec![
            "no prefix parse function for ) found",
            "no prefix parse function for ] found",
            "no prefix parse function for ) found",
        ]
    );
    let lines: Vec<usize> = diagnostics.iter().map(|d| d.position().line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
    assert_eq!(program.statements.len(), 1);
    assert!(matches!(program.statements[0], Statement::For(_)));
}

#[test]
fn recovery_resumes_after_semicolon() {
    let (program, diagnostics) = parse_errors("x = ); y = 1; if y { return }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(program.statements.len(), 2);
    assert!(matches!(program.statements[1], Statement::If(_)));
}

#[test]
fn recovery_skips_the_failed_statement_body() {
    let (program, diagnostics) = parse_errors("if x == ) {
	y = ]
}
return 1");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(program.statements.len(), 1);
    assert!(matches!(program.statements[0], Statement::Return(_)));
}

#[test]
fn const_in_for_init_is_rejected() {
    transpile_should_fail_with(
        "數 f() { for const i = 0; i < 3; i++ { } }",
        "constant declarations are not allowed in a for clause",
    );
}

#[test]
fn diagnostics_are_in_source_order() {
    let (_, diagnostics) = parse_errors("let = 1\nx = )\ntype T 整數");
    let lines: Vec<usize> = diagnostics.iter().map(|d| d.position().line).collect();
    let mut sorted = lines.clone();
    sorted.sort();
    assert_eq!(lines, sorted);
}

// ============================================================
// Generation
// ============================================================

#[test]
fn nested_function_is_a_generation_error() {
    let err = saikac::transpile("數 outer() {\n\t數 inner() { }\n}").unwrap_err();
    let diagnostics = err.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0], Diagnostic::Generation { .. }));
    assert_eq!(diagnostics[0].message(), "unsupported node type function inside a block");
    assert_eq!(diagnostics[0].position().line, 2);
}

#[test]
fn nested_import_is_a_generation_error() {
    transpile_should_fail_with("數 f() { import \"os\" }", "unsupported node type import inside a block");
}

#[test]
fn generation_continues_after_unsupported_node() {
    let program = parse_ok("數 f() {\n\tpackage p\n\tx = 1\n}");
    let (go, diagnostics) = saikac::generate(&program);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(go, "func f() {\n\tx = 1\n}\n");
}

// ============================================================
// Never Panics
// ============================================================

#[test]
fn garbage_inputs_do_not_panic() {
    let inputs = [
        "",
        "}",
        "{{{{",
        ")))",
        "數",
        "for",
        "for ;",
        "if",
        "struct {",
        "import (",
        "type",
        "x.",
        "x[",
        "'",
        "\"",
        "/*",
        "return return return",
        "數 f(a,) {}",
        "let x = [1, 2",
        "m = {1: }",
    ];
    for input in inputs {
        let _ = saikac::transpile(input);
    }
}
