#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

/// Lexemes the parser cares about, so inputs reach deep productions
/// instead of stopping at the first illegal character.
#[derive(Arbitrary, Debug)]
enum FuzzToken {
    Ident,
    IntLit,
    FloatLit,
    StringLit,
    Plus,
    Star,
    Assign,
    Define,
    Comma,
    Semicolon,
    Colon,
    Dot,
    PlusPlus,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Func,
    Let,
    Return,
    If,
    Else,
    For,
    Range,
    Struct,
    Type,
    Import,
    Newline,
}

impl FuzzToken {
    fn text(&self) -> &'static str {
        match self {
            FuzzToken::Ident => "x",
            FuzzToken::IntLit => "42",
            FuzzToken::FloatLit => "3.14",
            FuzzToken::StringLit => "\"str\"",
            FuzzToken::Plus => "+",
            FuzzToken::Star => "*",
            FuzzToken::Assign => "=",
            FuzzToken::Define => ":=",
            FuzzToken::Comma => ",",
            FuzzToken::Semicolon => ";",
            FuzzToken::Colon => ":",
            FuzzToken::Dot => ".",
            FuzzToken::PlusPlus => "++",
            FuzzToken::LeftParen => "(",
            FuzzToken::RightParen => ")",
            FuzzToken::LeftBrace => "{",
            FuzzToken::RightBrace => "}",
            FuzzToken::LeftBracket => "[",
            FuzzToken::RightBracket => "]",
            FuzzToken::Func => "數",
            FuzzToken::Let => "let",
            FuzzToken::Return => "return",
            FuzzToken::If => "if",
            FuzzToken::Else => "else",
            FuzzToken::For => "for",
            FuzzToken::Range => "range",
            FuzzToken::Struct => "struct",
            FuzzToken::Type => "type",
            FuzzToken::Import => "import",
            FuzzToken::Newline => "\n",
        }
    }
}

#[derive(Arbitrary, Debug)]
struct FuzzTokens {
    tokens: Vec<FuzzToken>,
}

fuzz_target!(|input: FuzzTokens| {
    let source: Vec<&str> = input.tokens.iter().map(FuzzToken::text).collect();
    // Parse and generate; neither may panic
    let _ = saikac::transpile(&source.join(" "));
});
