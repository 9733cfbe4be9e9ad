use std::path::{Path, PathBuf};
use std::process::Command;

use saikac::diagnostics::Diagnostic;
use saikac::parser::ast::{Program, Statement};

pub fn saikac() -> Command {
    Command::new(env!("CARGO_BIN_EXE_saikac"))
}

/// Parse and expect no diagnostics.
pub fn parse_ok(source: &str) -> Program {
    let (program, diagnostics) = saikac::parse(source);
    assert!(diagnostics.is_empty(), "unexpected diagnostics for {source:?}: {diagnostics:?}");
    program
}

/// Parse and expect at least one diagnostic.
pub fn parse_errors(source: &str) -> (Program, Vec<Diagnostic>) {
    let (program, diagnostics) = saikac::parse(source);
    assert!(!diagnostics.is_empty(), "expected diagnostics for {source:?}");
    (program, diagnostics)
}

pub fn first_statement(source: &str) -> Statement {
    let mut program = parse_ok(source);
    assert!(!program.statements.is_empty(), "no statements parsed from {source:?}");
    program.statements.remove(0)
}

/// Display form of the single statement in `source`.
pub fn render(source: &str) -> String {
    let program = parse_ok(source);
    assert_eq!(program.statements.len(), 1, "expected one statement in {source:?}");
    program.statements[0].to_string()
}

pub fn transpile_ok(source: &str) -> String {
    match saikac::transpile(source) {
        Ok(go) => go,
        Err(err) => panic!("transpile failed: {err}: {:?}", err.diagnostics()),
    }
}

pub fn transpile_should_fail_with(source: &str, expected_msg: &str) {
    let err = saikac::transpile(source).expect_err("transpile should have failed");
    let messages: Vec<&str> = err.diagnostics().iter().map(|d| d.message()).collect();
    assert!(
        messages.iter().any(|m| m.contains(expected_msg)),
        "expected a diagnostic containing {expected_msg:?}, got {messages:?}"
    );
}

pub fn write_source(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
