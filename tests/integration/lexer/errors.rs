// Category 8: Illegal Input
//
// Tokenizing never fails: bad input becomes Illegal tokens plus lexical
// diagnostics, and scanning continues.

use super::*;

#[test]
fn error_illegal_character() {
    let (tokens, diags) = lex_with_diagnostics("@");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Illegal);
    assert_eq!(tokens[0].literal, "@");
    assert!(matches!(diags[0], Diagnostic::Lexical { .. }));
}

#[test]
fn error_scanning_continues() {
    let (tokens, diags) = lex_with_diagnostics("a # b $ c");
    let k: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        k,
        vec![TokenKind::Ident, TokenKind::Illegal, TokenKind::Ident, TokenKind::Illegal, TokenKind::Ident]
    );
    assert_eq!(diags.len(), 2);
}

#[test]
fn error_diagnostics_in_source_order() {
    let (_, diags) = lex_with_diagnostics("@\n\"x\\q\"\n123abc");
    let lines: Vec<_> = diags.iter().map(|d| d.position().line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn error_diagnostic_display_without_file() {
    let (_, diags) = lex_with_diagnostics("x ?");
    assert_eq!(diags[0].to_string(), "line 1, column 3: illegal character \"?\"");
}

#[test]
fn error_diagnostic_display_with_file() {
    let mut tokenizer = Tokenizer::with_file("x ?", "demo.saika");
    while tokenizer.next_token().kind != TokenKind::Eof {}
    assert_eq!(tokenizer.diagnostics()[0].to_string(), "demo.saika:1:3: illegal character \"?\"");
}

#[test]
fn error_take_diagnostics_drains() {
    let mut tokenizer = Tokenizer::new("@");
    tokenizer.next_token();
    assert_eq!(tokenizer.take_diagnostics().len(), 1);
    assert!(tokenizer.take_diagnostics().is_empty());
}
