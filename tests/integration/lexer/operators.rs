// Category 7: Operators
//
// Longest match wins among operators sharing a prefix.

use super::*;

#[test]
fn op_arithmetic() {
    assert_tokens(
        "+ - * / %",
        &[TokenKind::Plus, TokenKind::Minus, TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
    );
}

#[test]
fn op_comparison() {
    assert_tokens(
        "== != < <= > >=",
        &[TokenKind::EqEq, TokenKind::BangEq, TokenKind::Lt, TokenKind::LtEq, TokenKind::Gt, TokenKind::GtEq],
    );
}

#[test]
fn op_logical_and_bitwise() {
    assert_tokens(
        "&& || ! & | ^ << >>",
        &[
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::Bang,
            TokenKind::Amp,
            TokenKind::Pipe,
            TokenKind::Caret,
            TokenKind::Shl,
            TokenKind::Shr,
        ],
    );
}

#[test]
fn op_compound_assignment() {
    assert_tokens(
        "+= -= *= /= %= &= |= ^= <<= >>=",
        &[
            TokenKind::PlusEq,
            TokenKind::MinusEq,
            TokenKind::StarEq,
            TokenKind::SlashEq,
            TokenKind::PercentEq,
            TokenKind::AmpEq,
            TokenKind::PipeEq,
            TokenKind::CaretEq,
            TokenKind::ShlEq,
            TokenKind::ShrEq,
        ],
    );
}

#[test]
fn op_increment_decrement_arrow() {
    assert_tokens("++ -- <-", &[TokenKind::PlusPlus, TokenKind::MinusMinus, TokenKind::Arrow]);
}

#[test]
fn op_define_vs_colon() {
    assert_tokens("x := 1", &[TokenKind::Ident, TokenKind::Define, TokenKind::Int]);
    assert_tokens("a: b", &[TokenKind::Ident, TokenKind::Colon, TokenKind::Ident]);
}

#[test]
fn op_delimiters() {
    assert_tokens(
        "( ) { } [ ] , ; .",
        &[
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Dot,
        ],
    );
}

#[test]
fn op_maximal_munch_without_spaces() {
    assert_tokens("i+++j", &[TokenKind::Ident, TokenKind::PlusPlus, TokenKind::Plus, TokenKind::Ident]);
    assert_tokens("a<<=b", &[TokenKind::Ident, TokenKind::ShlEq, TokenKind::Ident]);
}

#[test]
fn op_literal_text() {
    assert_literals("<<= :=", &["<<=", ":="]);
}
