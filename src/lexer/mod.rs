pub mod token;
pub use token::{Token, TokenKind, integer_value, is_keyword};

use std::sync::Arc;

use logos::Logos;

use crate::diagnostics::Diagnostic;
use crate::position::{LineIndex, Position};
use token::{NumberKind, Quote, RawToken};

/// Pull-based tokenizer over a single source text.
///
/// Never fails: malformed input becomes `Illegal` tokens plus lexical
/// diagnostics, and once the input is exhausted every call returns `Eof`.
pub struct Tokenizer<'src> {
    lexer: logos::Lexer<'src, RawToken>,
    lines: LineIndex<'src>,
    file: Option<Arc<str>>,
    source_len: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: RawToken::lexer(source),
            lines: LineIndex::new(source),
            file: None,
            source_len: source.len(),
            diagnostics: Vec::new(),
        }
    }

    /// Like `new`, but every position carries `file` for diagnostics.
    pub fn with_file(source: &'src str, file: impl Into<Arc<str>>) -> Self {
        let mut tokenizer = Self::new(source);
        tokenizer.file = Some(file.into());
        tokenizer
    }

    pub fn file(&self) -> Option<&Arc<str>> {
        self.file.as_ref()
    }

    pub fn next_token(&mut self) -> Token {
        let Some(result) = self.lexer.next() else {
            self.drain_issues();
            return Token::eof(self.position_at(self.source_len));
        };

        let slice = self.lexer.slice();
        let position = self.position_at(self.lexer.span().start);
        let token = match result {
            Ok(raw) => self.classify(raw, slice, position),
            Err(()) => {
                self.diagnostics
                    .push(Diagnostic::lexical(format!("illegal character {slice:?}"), position.clone()));
                Token::new(TokenKind::Illegal, slice, position)
            }
        };
        self.drain_issues();
        token
    }

    /// Diagnostics recorded so far, in source order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Removes and returns the diagnostics recorded so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn position_at(&self, offset: usize) -> Position {
        self.lines.position(offset, self.file.as_ref())
    }

    fn classify(&mut self, raw: RawToken, slice: &str, position: Position) -> Token {
        if let Some(kind) = raw.fixed_kind() {
            return Token::new(kind, slice, position);
        }
        match raw {
            RawToken::Ident => Token::new(TokenKind::lookup_ident(slice), slice, position),
            RawToken::Number(NumberKind::Int) => Token::new(TokenKind::Int, slice, position),
            RawToken::Number(NumberKind::Float) => Token::new(TokenKind::Float, slice, position),
            RawToken::Number(NumberKind::Malformed) => {
                self.diagnostics
                    .push(Diagnostic::lexical(format!("invalid numeric literal {slice}"), position.clone()));
                Token::new(TokenKind::Illegal, slice, position)
            }
            RawToken::Str(quote) => Token::new(TokenKind::Str, unquote(slice, quote), position),
            RawToken::Char(quote) => Token::new(TokenKind::Char, unquote(slice, quote), position),
            _ => {
                self.diagnostics
                    .push(Diagnostic::lexical(format!("illegal character {slice:?}"), position.clone()));
                Token::new(TokenKind::Illegal, slice, position)
            }
        }
    }

    fn drain_issues(&mut self) {
        let issues = std::mem::take(&mut self.lexer.extras);
        for issue in issues {
            let pos = self.position_at(issue.offset);
            self.diagnostics.push(Diagnostic::lexical(issue.kind.to_string(), pos));
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

/// Strip the opening quote, and the closing one when present.
fn unquote(slice: &str, quote: Quote) -> &str {
    let inner = &slice[1..];
    match quote {
        Quote::Closed => &inner[..inner.len() - 1],
        Quote::Unclosed => inner,
    }
}

/// Tokenize a whole source text. The returned tokens do not include `Eof`.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut tokenizer = Tokenizer::new(source);
    let tokens: Vec<Token> = tokenizer.by_ref().collect();
    (tokens, tokenizer.take_diagnostics())
}
