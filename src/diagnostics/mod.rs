use crate::position::Position;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// A problem found while tokenizing, parsing or generating.
///
/// Diagnostics are accumulated, never raised: every stage records what it
/// could not handle and keeps going.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Diagnostic {
    #[error("{pos}: {msg}")]
    Lexical { msg: String, pos: Position },

    #[error("{pos}: {msg}")]
    Syntax { msg: String, pos: Position },

    #[error("{pos}: {msg}")]
    Generation { msg: String, pos: Position },
}

impl Diagnostic {
    pub fn lexical(msg: impl Into<String>, pos: Position) -> Self {
        Self::Lexical { msg: msg.into(), pos }
    }

    pub fn syntax(msg: impl Into<String>, pos: Position) -> Self {
        Self::Syntax { msg: msg.into(), pos }
    }

    pub fn generation(msg: impl Into<String>, pos: Position) -> Self {
        Self::Generation { msg: msg.into(), pos }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Lexical { msg, .. } | Self::Syntax { msg, .. } | Self::Generation { msg, .. } => msg,
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Self::Lexical { pos, .. } | Self::Syntax { pos, .. } | Self::Generation { pos, .. } => pos,
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Lexical { .. } => "lexical",
            Self::Syntax { .. } => "syntax",
            Self::Generation { .. } => "generation",
        }
    }
}

/// Failure of a whole transpile request.
#[derive(Debug, Error)]
pub enum TranspileError {
    #[error("{} diagnostic(s) reported", .0.len())]
    Diagnostics(Vec<Diagnostic>),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {msg}", .path.display())]
    Config { msg: String, path: PathBuf },
}

impl TranspileError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn config(msg: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config { msg: msg.into(), path: path.into() }
    }

    /// The accumulated diagnostics, empty for I/O and config failures.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Diagnostics(diags) => diags,
            _ => &[],
        }
    }
}

/// Render a Diagnostic with ariadne for terminal output.
pub fn render_diagnostic(source: &str, diag: &Diagnostic) -> std::io::Result<()> {
    use ariadne::{Label, Report, ReportKind, Source};

    let pos = diag.position();
    // ariadne 0.4 spans count characters
    let byte = pos.offset.min(source.len());
    let start = source.get(..byte).map_or(0, |s| s.chars().count());
    let end = if byte < source.len() { start + 1 } else { start };

    Report::build(ReportKind::Error, (), start)
        .with_message(format!("{} error at {pos}", diag.kind_str()))
        .with_label(Label::new(start..end).with_message(diag.message()))
        .finish()
        .eprint(Source::from(source))
}

/// Render a Diagnostic as a single JSON object line.
pub fn diagnostic_json(diag: &Diagnostic) -> serde_json::Result<String> {
    serde_json::to_string(diag)
}
