pub mod position;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod codegen;
pub mod config;

use std::path::Path;
use std::sync::Arc;

use codegen::Generator;
use config::Config;
use diagnostics::{Diagnostic, TranspileError};
use lexer::Tokenizer;
use parser::Parser;
use parser::ast::Program;

/// Parse a source string. Diagnostics are returned alongside the tree,
/// which holds every statement that parsed.
pub fn parse(source: &str) -> (Program, Vec<Diagnostic>) {
    parse_tokens(Tokenizer::new(source))
}

/// Like `parse`, with `file` attached to every position.
pub fn parse_file(source: &str, file: &str) -> (Program, Vec<Diagnostic>) {
    parse_tokens(Tokenizer::with_file(source, Arc::<str>::from(file)))
}

fn parse_tokens(tokenizer: Tokenizer<'_>) -> (Program, Vec<Diagnostic>) {
    let mut parser = Parser::new(tokenizer);
    let program = parser.parse_program();
    (program, parser.into_errors())
}

/// Render a tree as Go source with default options.
pub fn generate(program: &Program) -> (String, Vec<Diagnostic>) {
    codegen::generate(program)
}

/// Saika source to Go source (tokenize → parse → generate) with defaults.
pub fn transpile(source: &str) -> Result<String, TranspileError> {
    transpile_with(source, None, &Config::default())
}

/// Full pipeline with a file name for diagnostics and project config.
///
/// Fails with every accumulated diagnostic if any stage reported one;
/// no Go text is returned for a program that did not translate cleanly.
pub fn transpile_with(source: &str, file: Option<&str>, config: &Config) -> Result<String, TranspileError> {
    let (program, mut diagnostics) = match file {
        Some(file) => parse_file(source, file),
        None => parse(source),
    };

    let mut generator = Generator::with_options(config.generator_options());
    let code = generator.generate(&program);
    diagnostics.extend_from_slice(generator.errors());

    if diagnostics.is_empty() {
        Ok(code)
    } else {
        Err(TranspileError::Diagnostics(diagnostics))
    }
}

/// Read a source file and transpile it, discovering `saika.toml` from the
/// file's directory.
pub fn transpile_file(path: &Path) -> Result<String, TranspileError> {
    let dir = path.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let config = Config::discover(dir)?.unwrap_or_default();
    transpile_file_with(path, &config)
}

pub fn transpile_file_with(path: &Path, config: &Config) -> Result<String, TranspileError> {
    let source = std::fs::read_to_string(path).map_err(|e| TranspileError::io(path, e))?;
    let name = path.to_string_lossy();
    transpile_with(&source, Some(&*name), config)
}
