use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Source location of a token or node.
///
/// `line` and `column` are 1-based; `column` counts Unicode scalar values,
/// not bytes. `offset` is the byte offset into the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    pub file: Option<Arc<str>>,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset, file: None }
    }

    pub fn with_file(line: usize, column: usize, offset: usize, file: Arc<str>) -> Self {
        Self { line, column, offset, file: Some(file) }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) if !file.is_empty() => write!(f, "{file}:{}:{}", self.line, self.column),
            _ => write!(f, "line {}, column {}", self.line, self.column),
        }
    }
}

/// Maps byte offsets to line:column positions for a single source file.
pub struct LineIndex<'src> {
    source: &'src str,
    /// Byte offset of the start of each line. line_starts[0] == 0 always.
    line_starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { source, line_starts }
    }

    /// 1-based (line, column) of a byte offset. Offsets past the end clamp to EOF.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(ins) => ins.saturating_sub(1),
        };
        let start = self.line_starts[line];
        let column = self
            .source
            .get(start..offset)
            .map_or(offset - start, |text| text.chars().count());
        (line + 1, column + 1)
    }

    pub fn position(&self, offset: usize, file: Option<&Arc<str>>) -> Position {
        let (line, column) = self.line_col(offset);
        Position { line, column, offset, file: file.cloned() }
    }
}
