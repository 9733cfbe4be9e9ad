use std::fmt;

use logos::{Lexer, Logos, Skip};
use serde::Serialize;

use crate::position::Position;

/// A classified lexeme with its original text and start position.
///
/// For string and character literals `literal` is the raw text between the
/// quotes, escapes left untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        Self { kind, literal: literal.into(), position }
    }

    pub fn eof(position: Position) -> Self {
        Self { kind: TokenKind::Eof, literal: String::new(), position }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Illegal,
    Eof,

    Ident,
    Int,
    Float,
    Str,
    Char,

    // Keywords
    Package,
    Import,
    Func,
    SaikaFunc,
    Let,
    Var,
    Const,
    True,
    False,
    If,
    Else,
    Return,
    For,
    Range,
    Break,
    Continue,
    Struct,
    Interface,
    Map,
    Chan,
    Go,
    Select,
    Switch,
    Case,
    Default,
    Type,

    // Operators
    Assign,
    Define,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Amp,
    Pipe,
    Caret,
    Shl,
    Shr,
    AmpAmp,
    PipePipe,
    EqEq,
    BangEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    ShlEq,
    ShrEq,
    PlusPlus,
    MinusMinus,
    Arrow,

    // Delimiters
    Dot,
    Comma,
    Semicolon,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
}

impl TokenKind {
    /// Classify an identifier-shaped lexeme as a keyword or a plain identifier.
    pub fn lookup_ident(ident: &str) -> TokenKind {
        match ident {
            "package" | "包" => TokenKind::Package,
            "import" | "導入" => TokenKind::Import,
            "func" => TokenKind::Func,
            "數" => TokenKind::SaikaFunc,
            "let" => TokenKind::Let,
            "var" => TokenKind::Var,
            "const" => TokenKind::Const,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "return" => TokenKind::Return,
            "for" => TokenKind::For,
            "range" => TokenKind::Range,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "struct" => TokenKind::Struct,
            "interface" => TokenKind::Interface,
            "map" => TokenKind::Map,
            "chan" => TokenKind::Chan,
            "go" => TokenKind::Go,
            "select" => TokenKind::Select,
            "switch" => TokenKind::Switch,
            "case" => TokenKind::Case,
            "default" => TokenKind::Default,
            "type" => TokenKind::Type,
            _ => TokenKind::Ident,
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Package
                | TokenKind::Import
                | TokenKind::Func
                | TokenKind::SaikaFunc
                | TokenKind::Let
                | TokenKind::Var
                | TokenKind::Const
                | TokenKind::True
                | TokenKind::False
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Return
                | TokenKind::For
                | TokenKind::Range
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Struct
                | TokenKind::Interface
                | TokenKind::Map
                | TokenKind::Chan
                | TokenKind::Go
                | TokenKind::Select
                | TokenKind::Switch
                | TokenKind::Case
                | TokenKind::Default
                | TokenKind::Type
        )
    }

    /// Tokens that can begin a top-level declaration. Used for error recovery.
    pub fn starts_declaration(self) -> bool {
        matches!(
            self,
            TokenKind::Package
                | TokenKind::Import
                | TokenKind::Func
                | TokenKind::SaikaFunc
                | TokenKind::Let
                | TokenKind::Var
                | TokenKind::Const
                | TokenKind::Struct
                | TokenKind::Type
        )
    }
}

/// Returns true if the given string is a reserved keyword in any spelling.
pub fn is_keyword(s: &str) -> bool {
    TokenKind::lookup_ident(s) != TokenKind::Ident
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Str => "STRING",
            TokenKind::Char => "CHAR",
            TokenKind::Package => "package",
            TokenKind::Import => "import",
            TokenKind::Func => "func",
            TokenKind::SaikaFunc => "數",
            TokenKind::Let => "let",
            TokenKind::Var => "var",
            TokenKind::Const => "const",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::For => "for",
            TokenKind::Range => "range",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Struct => "struct",
            TokenKind::Interface => "interface",
            TokenKind::Map => "map",
            TokenKind::Chan => "chan",
            TokenKind::Go => "go",
            TokenKind::Select => "select",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::Type => "type",
            TokenKind::Assign => "=",
            TokenKind::Define => ":=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Bang => "!",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::EqEq => "==",
            TokenKind::BangEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::AmpEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::CaretEq => "^=",
            TokenKind::ShlEq => "<<=",
            TokenKind::ShrEq => ">>=",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Arrow => "<-",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
        };
        f.write_str(text)
    }
}

/// Problems the raw scanner notices inside a lexeme. `offset` is a byte offset.
#[derive(Debug, Clone, PartialEq)]
pub struct LexIssue {
    pub offset: usize,
    pub kind: LexIssueKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LexIssueKind {
    UnknownEscape(char),
    UnterminatedString,
    UnterminatedChar,
    EmptyChar,
    UnterminatedComment,
}

impl fmt::Display for LexIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexIssueKind::UnknownEscape(c) => write!(f, "unknown escape sequence \\{c}"),
            LexIssueKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexIssueKind::UnterminatedChar => write!(f, "unterminated character literal"),
            LexIssueKind::EmptyChar => write!(f, "empty character literal"),
            LexIssueKind::UnterminatedComment => write!(f, "unterminated block comment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Int,
    Float,
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Closed,
    Unclosed,
}

/// Raw lexemes as produced by logos. Keywords are not distinguished here;
/// the tokenizer classifies identifiers afterwards.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"\s+")]
#[logos(extras = Vec<LexIssue>)]
pub enum RawToken {
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")]
    Ident,
    #[regex(r"[0-9]", number)]
    Number(NumberKind),
    #[token("\"", string)]
    Str(Quote),
    #[token("'", char_lit)]
    Char(Quote),

    #[token("=")]
    Assign,
    #[token(":=")]
    Define,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<-")]
    Arrow,

    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    /// Any other single character.
    #[regex(r".", priority = 0)]
    Unknown,
}

impl RawToken {
    /// The token kind for lexemes whose kind does not depend on their text.
    pub fn fixed_kind(self) -> Option<TokenKind> {
        let kind = match self {
            RawToken::Assign => TokenKind::Assign,
            RawToken::Define => TokenKind::Define,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Bang => TokenKind::Bang,
            RawToken::Amp => TokenKind::Amp,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::Caret => TokenKind::Caret,
            RawToken::Shl => TokenKind::Shl,
            RawToken::Shr => TokenKind::Shr,
            RawToken::AmpAmp => TokenKind::AmpAmp,
            RawToken::PipePipe => TokenKind::PipePipe,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::BangEq => TokenKind::BangEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::PlusEq => TokenKind::PlusEq,
            RawToken::MinusEq => TokenKind::MinusEq,
            RawToken::StarEq => TokenKind::StarEq,
            RawToken::SlashEq => TokenKind::SlashEq,
            RawToken::PercentEq => TokenKind::PercentEq,
            RawToken::AmpEq => TokenKind::AmpEq,
            RawToken::PipeEq => TokenKind::PipeEq,
            RawToken::CaretEq => TokenKind::CaretEq,
            RawToken::ShlEq => TokenKind::ShlEq,
            RawToken::ShrEq => TokenKind::ShrEq,
            RawToken::PlusPlus => TokenKind::PlusPlus,
            RawToken::MinusMinus => TokenKind::MinusMinus,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Colon => TokenKind::Colon,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LineComment
            | RawToken::BlockComment
            | RawToken::Ident
            | RawToken::Number(_)
            | RawToken::Str(_)
            | RawToken::Char(_)
            | RawToken::Unknown => return None,
        };
        Some(kind)
    }
}

fn block_comment(lex: &mut Lexer<'_, RawToken>) -> Skip {
    let start = lex.span().start;
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => lex.bump(end + 2),
        None => {
            lex.bump(rest.len());
            lex.extras.push(LexIssue { offset: start, kind: LexIssueKind::UnterminatedComment });
        }
    }
    Skip
}

/// Maximal munch over digits, an optional `.digits` fraction and an optional
/// exponent. Identifier characters glued to the end make the whole run
/// malformed (`123abc` is one bad lexeme, not a number and a name).
fn number(lex: &mut Lexer<'_, RawToken>) -> NumberKind {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut i = digits_from(0);
    let mut is_float = false;
    if bytes.get(i) == Some(&b'.') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
        is_float = true;
        i = digits_from(i + 1);
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let signed = matches!(bytes.get(i + 1), Some(b'+' | b'-'));
        let first_digit = if signed { i + 2 } else { i + 1 };
        if bytes.get(first_digit).is_some_and(u8::is_ascii_digit) {
            is_float = true;
            i = digits_from(first_digit);
        }
    }

    let tail: usize = rest[i..]
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .map(char::len_utf8)
        .sum();
    lex.bump(i + tail);
    if tail > 0 {
        return NumberKind::Malformed;
    }

    let text = lex.slice();
    let valid = if is_float { text.parse::<f64>().is_ok() } else { integer_value(text).is_some() };
    match (valid, is_float) {
        (false, _) => NumberKind::Malformed,
        (true, true) => NumberKind::Float,
        (true, false) => NumberKind::Int,
    }
}

/// Value of a decimal digit run. A leading `0` makes the rest octal, so
/// `010` is 8 and `09` has no value.
pub fn integer_value(text: &str) -> Option<i64> {
    match text.strip_prefix('0') {
        Some("") => Some(0),
        Some(octal) => i64::from_str_radix(octal, 8).ok(),
        None => text.parse().ok(),
    }
}

fn is_known_escape(c: char) -> bool {
    matches!(c, 'n' | 'r' | 't' | '\\' | '"' | '\'')
}

fn string(lex: &mut Lexer<'_, RawToken>) -> Quote {
    let start = lex.span().start;
    let rest = lex.remainder();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(i + 1);
                return Quote::Closed;
            }
            '\\' => match chars.next() {
                Some((_, esc)) if !is_known_escape(esc) => {
                    lex.extras.push(LexIssue { offset: start + 1 + i, kind: LexIssueKind::UnknownEscape(esc) });
                }
                Some(_) => {}
                None => break,
            },
            _ => {}
        }
    }
    lex.bump(rest.len());
    lex.extras.push(LexIssue { offset: start, kind: LexIssueKind::UnterminatedString });
    Quote::Unclosed
}

/// One rune or one escape, then the closing quote.
fn char_lit(lex: &mut Lexer<'_, RawToken>) -> Quote {
    let start = lex.span().start;
    let rest = lex.remainder();
    let mut chars = rest.char_indices();
    let body_len = match chars.next() {
        Some((i, '\\')) => match chars.next() {
            Some((j, esc)) => {
                if !is_known_escape(esc) {
                    lex.extras.push(LexIssue { offset: start + 1 + i, kind: LexIssueKind::UnknownEscape(esc) });
                }
                j + esc.len_utf8()
            }
            None => rest.len(),
        },
        Some((_, '\'')) => {
            lex.extras.push(LexIssue { offset: start, kind: LexIssueKind::EmptyChar });
            0
        }
        Some((_, '\n')) | None => 0,
        Some((i, c)) => i + c.len_utf8(),
    };

    if rest[body_len..].starts_with('\'') {
        lex.bump(body_len + 1);
        Quote::Closed
    } else {
        lex.bump(body_len);
        lex.extras.push(LexIssue { offset: start, kind: LexIssueKind::UnterminatedChar });
        Quote::Unclosed
    }
}
