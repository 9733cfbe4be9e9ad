// Category 2: Number Literals
//
// Integers and floats are scanned by maximal munch, then validated.

use super::*;

// ===== Integers =====

#[test]
fn integer_zero() {
    assert_tokens("0", &[TokenKind::Int]);
}

#[test]
fn integer_negative_is_two_tokens() {
    assert_tokens("-42", &[TokenKind::Minus, TokenKind::Int]);
    assert_literals("-42", &["-", "42"]);
}

#[test]
fn integer_max() {
    assert_literals("9223372036854775807", &["9223372036854775807"]);
}

#[test]
fn integer_overflow_is_illegal() {
    let (tokens, diags) = lex_with_diagnostics("9223372036854775808");
    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert!(diags[0].message().contains("invalid numeric literal"));
}

#[test]
fn integer_leading_zeros() {
    assert_literals("007", &["007"]);
}

#[test]
fn integer_leading_zero_is_octal() {
    assert_tokens("010 017", &[TokenKind::Int, TokenKind::Int]);
    let (tokens, diags) = lex_with_diagnostics("09");
    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert_eq!(diags[0].message(), "invalid numeric literal 09");
}

// ===== Floats =====

#[test]
fn float_simple() {
    assert_tokens("3.14", &[TokenKind::Float]);
}

#[test]
fn float_keeps_source_spelling() {
    assert_literals("2.50", &["2.50"]);
}

#[test]
fn float_exponent_forms() {
    assert_tokens("1e10 1E10 1e+3 2.5e-3", &[TokenKind::Float; 4]);
}

#[test]
fn float_exponent_without_digits_is_illegal() {
    let (tokens, _) = lex_with_diagnostics("1e");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert_eq!(tokens[0].literal, "1e");
}

#[test]
fn float_trailing_dot_is_member_access() {
    assert_tokens("1.foo", &[TokenKind::Int, TokenKind::Dot, TokenKind::Ident]);
}

#[test]
fn float_two_dots() {
    assert_tokens("1.2.3", &[TokenKind::Float, TokenKind::Dot, TokenKind::Int]);
}

// ===== Malformed =====

#[test]
fn number_glued_to_letters_is_one_illegal_token() {
    let (tokens, diags) = lex_with_diagnostics("123abc");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert_eq!(tokens[0].literal, "123abc");
    assert_eq!(tokens[0].position.column, 1);
    assert_eq!(diags.len(), 1);
}

#[test]
fn number_glued_to_cjk_is_illegal() {
    let (tokens, _) = lex_with_diagnostics("3個");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].literal, "3個");
}

#[test]
fn number_followed_by_paren_is_fine() {
    assert_tokens("f(1)", &[TokenKind::Ident, TokenKind::LParen, TokenKind::Int, TokenKind::RParen]);
}
