// Command line interface
//
// Runs the built saikac binary against files in a temporary directory.

mod common;
use common::*;

const HELLO: &str = "package main\n導入 \"fmt\"\n數 主() {\n\tfmt.Println(\"你好\")\n}\n";
const HELLO_GO: &str = "package main\nimport \"fmt\"\nfunc main() {\n\tfmt.Println(\"你好\")\n}\n";

#[test]
fn emit_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_source(dir.path(), "hello.saika", HELLO);

    let output = saikac().arg("emit").arg(&src).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), HELLO_GO);
}

#[test]
fn emit_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_source(dir.path(), "hello.saika", HELLO);
    let out = dir.path().join("hello.go");

    let output = saikac().arg("emit").arg(&src).arg("-o").arg(&out).output().unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(std::fs::read_to_string(&out).unwrap(), HELLO_GO);
    assert!(String::from_utf8_lossy(&output.stderr).contains("wrote"));
}

#[test]
fn emit_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_source(dir.path(), "bad.saika", "數 main( { }\n");
    let out = dir.path().join("bad.go");

    let output = saikac().arg("emit").arg(&src).arg("-o").arg(&out).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expected next token to be ), got {"), "stderr: {stderr}");
    assert!(stderr.contains("1 diagnostic(s) reported"), "stderr: {stderr}");
}

#[test]
fn check_ok() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_source(dir.path(), "hello.saika", HELLO);

    let output = saikac().arg("check").arg(&src).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains(": ok"));
}

#[test]
fn check_reports_json() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_source(dir.path(), "bad.saika", "let = 1\n");

    let output = saikac().args(["--format", "json", "check"]).arg(&src).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().next().unwrap();
    let value: serde_json::Value = serde_json::from_str(first).unwrap();
    assert_eq!(value["kind"], "syntax");
    assert_eq!(value["msg"], "expected next token to be IDENT, got =");
    assert_eq!(value["pos"]["line"], 1);
    assert_eq!(value["pos"]["column"], 5);
}

#[test]
fn missing_file_exits_with_two() {
    let dir = tempfile::tempdir().unwrap();
    let output = saikac().arg("emit").arg(dir.path().join("nope.saika")).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}

#[test]
fn tokens_human() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_source(dir.path(), "t.saika", "數 主()");

    let output = saikac().arg("tokens").arg(&src).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["1:1\t數\t\"數\"", "1:3\tIDENT\t\"主\"", "1:4\t(\t\"(\"", "1:5\t)\t\")\""]);
}

#[test]
fn tokens_json() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_source(dir.path(), "t.saika", "x 1");

    let output = saikac().args(["tokens", "--format", "json"]).arg(&src).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let kinds: Vec<String> = stdout
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap()["kind"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(kinds, vec!["Ident", "Int"]);
}

#[test]
fn config_is_discovered_next_to_source() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(".git")).unwrap();
    std::fs::write(dir.path().join("saika.toml"), "[codegen]\nplaceholder_type = \"any\"\n").unwrap();
    let src = write_source(dir.path(), "list.saika", "x = [1]\n");

    let output = saikac().arg("emit").arg(&src).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "x = []any{1}\n");
}

#[test]
fn explicit_config_flag() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(".git")).unwrap();
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "[codegen.types]\n\"數字\" = \"int64\"\n").unwrap();
    let src = write_source(dir.path(), "n.saika", "var n 數字\n");

    let output = saikac().arg("--config").arg(&config).arg("emit").arg(&src).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "var n int64\n");
}

#[test]
fn invalid_config_exits_with_two() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(".git")).unwrap();
    std::fs::write(dir.path().join("saika.toml"), "[codegen]\nbogus = 1\n").unwrap();
    let src = write_source(dir.path(), "x.saika", "x = 1\n");

    let output = saikac().arg("check").arg(&src).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid config"));
}
