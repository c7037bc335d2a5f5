use rlox::diagnostics::Diagnostics;
use rlox::scanner::Scanner;
use rlox::token::TokenKind;

#[test]
fn trailing_dot_number_does_not_error() {
    let mut diagnostics = Diagnostics::new(Box::new(Vec::<u8>::new()));
    let tokens = Scanner::new("5.").scan_tokens(&mut diagnostics);

    assert!(!diagnostics.had_error());
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::Number, TokenKind::Dot, TokenKind::EOF]);
}

#[test]
fn identifiers_are_ascii_only() {
    let mut diagnostics = Diagnostics::new(Box::new(Vec::<u8>::new()));
    let tokens = Scanner::new("caf\u{e9}").scan_tokens(&mut diagnostics);

    assert!(diagnostics.had_error());
    let ident = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Identifier)
        .expect("identifier token");
    assert_eq!(ident.lexeme, "caf");
}
