// End-to-end: Saika source in, Go source out
//
// Complete programs through tokenize, parse and generate.

mod common;
use common::*;

use saikac::lexer::tokenize;

// ============================================================
// Scenarios
// ============================================================

#[test]
fn hello_world_with_alternate_keywords() {
    let src = "包 main\n導入 \"fmt\"\n數 main() { fmt.Println(\"Hello\") }";
    let go = transpile_ok(src);
    assert_eq!(go, "package main\nimport \"fmt\"\nfunc main() {\n\tfmt.Println(\"Hello\")\n}\n");
}

#[test]
fn hello_world_tree_shape() {
    use saikac::parser::ast::{Expression, Statement};

    let program = parse_ok("包 main\n導入 \"fmt\"\n數 main() { fmt.Println(\"Hello\") }");
    assert_eq!(program.statements.len(), 3);
    let Statement::Function(func) = &program.statements[2] else { panic!("expected function") };
    assert_eq!(func.body.statements.len(), 1);
    let Statement::Expression(stmt) = &func.body.statements[0] else { panic!("expected expression") };
    let Expression::Call(call) = &stmt.expression else { panic!("expected call") };
    assert!(matches!(*call.callee, Expression::Member(_)));
    assert_eq!(call.arguments.len(), 1);
}

#[test]
fn precedence_in_initializer() {
    assert_eq!(transpile_ok("let x = 1 + 2 * 3"), "var x = (1 + (2 * 3))\n");
}

#[test]
fn three_clause_loop_with_empty_body() {
    assert_eq!(transpile_ok("for i := 0; i < 10; i++ { }"), "for i := 0; (i < 10); i++ {\n}\n");
}

#[test]
fn missing_paren_reports_and_continues() {
    let (program, diagnostics) = parse_errors("數 main( { }\nlet after = 1");
    assert_eq!(diagnostics[0].message(), "expected next token to be ), got {");
    assert_eq!(diagnostics[0].position().line, 1);
    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.statements[0].to_string(), "var after = 1");
}

#[test]
fn function_keyword_spelling_is_invisible() {
    let body = " sum(xs []整數) 整數 {\n\ttotal := 0\n\tfor _, x := range xs {\n\t\ttotal += x\n\t}\n\treturn total\n}";
    assert_eq!(transpile_ok(&format!("數{body}")), transpile_ok(&format!("func{body}")));
}

// ============================================================
// Larger Programs
// ============================================================

#[test]
fn complete_program() {
    let src = r#"package main

import (
    "fmt"
    str "strings"
)

type Item struct {
    name 字串
    price 浮點
}

數 total(items []Item) 浮點 {
    var sum 浮點 = 0.0
    for _, it := range items {
        sum += it.price
    }
    return sum
}

數 主() {
    names := ["a", "b"]
    for i := 0; i < 2; i++ {
        if i == 0 {
            fmt.Println(str.ToUpper(names[i]))
        } else {
            fmt.Println(names[i])
        }
    }
}
"#;
    let expected = r#"package main
import (
	"fmt"
	str "strings"
)
type Item struct {
	name string
	price float64
}
func total(items []Item) float64 {
	var sum float64 = 0.0
	for _, it := range items {
		sum += it.price
	}
	return sum
}
func main() {
	var names = []interface{}{"a", "b"}
	for i := 0; (i < 2); i++ {
		if (i == 0) {
			fmt.Println(str.ToUpper(names[i]))
		} else {
			fmt.Println(names[i])
		}
	}
}
"#;
    assert_eq!(transpile_ok(src), expected);
}

#[test]
fn comments_do_not_reach_output() {
    let src = "// header\npackage main /* trailing */\n數 主() {\n\t// nothing\n}\n";
    assert_eq!(transpile_ok(src), "package main\nfunc main() {\n}\n");
}

#[test]
fn generation_is_deterministic() {
    let src = "x = {\"z\": 1, \"a\": 2, \"m\": 3}\nstruct S { z 整數; a 整數 }";
    let first = transpile_ok(src);
    for _ in 0..10 {
        assert_eq!(transpile_ok(src), first);
    }
}

// ============================================================
// Re-parsing generated output
// ============================================================

fn assert_reparse_keeps_counts(source: &str) {
    let direct = parse_ok(source);
    let go = transpile_ok(source);
    let reparsed = parse_ok(&go);
    assert!(
        reparsed.statements.len() >= direct.statements.len(),
        "statement count shrank: {source:?} -> {go:?}"
    );
    let (source_tokens, _) = tokenize(source);
    let (go_tokens, _) = tokenize(&go);
    assert!(go_tokens.len() >= source_tokens.len(), "token count shrank: {source:?} -> {go:?}");
}

#[test]
fn generated_output_reparses() {
    assert_reparse_keeps_counts("package main\n導入 \"fmt\"\n數 主() { fmt.Println(\"hi\") }");
    assert_reparse_keeps_counts("let x = 1 + 2 * 3");
    assert_reparse_keeps_counts("數 f(n 整數) 整數 { for i := 0; i < n; i++ { n -= i }\n return n }");
    assert_reparse_keeps_counts("type P struct { x 整數; y 整數 }");
    assert_reparse_keeps_counts("數 g() { if a { return 1 } else if b { return 2 } else { return 3 } }");
    assert_reparse_keeps_counts("數 h() { for k, v := range m { use(k, v) } }");
    assert_reparse_keeps_counts("x = [1, 2]\ny = 3\nz = 4");
    assert_reparse_keeps_counts("m = {\"a\": [1], \"b\": []}\nn = {}\nf(m, n)");
    assert_reparse_keeps_counts("數 g() { for let i = 0; i < 3; i++ { xs = [i, [i]] } }");
}

#[test]
fn composite_literals_are_a_fixed_point() {
    let once = transpile_ok("x = [1, {\"k\": [2, 3]}]\ny = {}");
    assert_eq!(once, "x = []interface{}{1, map[string]interface{}{\"k\": []interface{}{2, 3}}}\ny = map[string]interface{}{}\n");
    assert_eq!(transpile_ok(&once), once);
}

#[test]
fn second_pass_is_stable() {
    let once = transpile_ok("let x = a + b * c\n數 主() { for i := 0; i < 3; i++ { x = -x } }");
    assert_eq!(transpile_ok(&once), once);
}
