use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::diagnostics::{Diagnostics, ScanError};
use crate::token::{Token, TokenKind, TokenLiteral};

pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scans the whole source, reporting any lexical errors to
    /// `diagnostics` as it goes rather than stopping at the first one.
    pub fn scan_tokens(mut self, diagnostics: &mut Diagnostics) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token(diagnostics);
        }

        self.tokens.push(Token::new(TokenKind::EOF, String::new(), None, self.line));
        self.tokens
    }

    fn advance(&mut self) -> char {
        self.current += 1;
        self.source.next().expect("advance called at end of source")
    }

    fn peek(&mut self) -> char {
        self.source.peek().copied().unwrap_or('\0')
    }

    fn peek_next(&mut self) -> char {
        self.source.peek_next().copied().unwrap_or('\0')
    }

    fn match_next(&mut self, expected: char) -> bool {
        self.peek_next() == expected
    }

    fn add_token(&mut self, kind: TokenKind, lexeme: String, literal: Option<TokenLiteral>) {
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    fn add_single_char_token(&mut self, kind: TokenKind) {
        let c = self.advance();
        self.add_token(kind, c.to_string(), None);
    }

    fn add_double_char_token(&mut self, kind: TokenKind) {
        let first = self.advance();
        let second = self.advance();
        self.add_token(kind, format!("{first}{second}"), None);
    }

    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    fn string(&mut self, diagnostics: &mut Diagnostics) {
        self.advance(); // opening quote
        let start_line = self.line;

        let mut value = Vec::new();
        while self.peek() != '"' && !self.is_at_end() {
            let c = self.advance();
            if c == '\n' {
                self.line += 1;
            }
            value.push(c);
        }

        if self.is_at_end() {
            diagnostics.scan_error(&ScanError {
                line: start_line,
                message: "Unterminated string.".to_string(),
            });
            return;
        }

        self.advance(); // closing quote

        let value: String = value.into_iter().collect();
        self.add_token(TokenKind::String, value.clone(), Some(TokenLiteral::String(value)));
    }

    /// A trailing dot with no following digit ("5.") is left alone: the
    /// digits before it become the number, and the dot is scanned as its
    /// own token on the next pass.
    fn number(&mut self) {
        let mut value = Vec::new();

        while self.peek().is_ascii_digit() {
            value.push(self.advance());
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            value.push(self.advance()); // the dot

            while self.peek().is_ascii_digit() {
                value.push(self.advance());
            }
        }

        let value: String = value.into_iter().collect();
        let parsed: f64 = value.parse().expect("number lexeme must be valid f64 syntax");

        self.add_token(TokenKind::Number, value, Some(TokenLiteral::Number(parsed)));
    }

    /// Identifiers are ASCII-only: non-ASCII letters are treated the same
    /// as any other unrecognized character.
    fn identifier(&mut self) {
        let mut value = Vec::new();

        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            value.push(self.advance());
        }

        let value: String = value.into_iter().collect();
        let kind = match value.as_str() {
            "and" => TokenKind::And,
            "class" => TokenKind::Class,
            "else" => TokenKind::Else,
            "false" => TokenKind::False,
            "for" => TokenKind::For,
            "fun" => TokenKind::Fun,
            "if" => TokenKind::If,
            "nil" => TokenKind::Nil,
            "or" => TokenKind::Or,
            "print" => TokenKind::Print,
            "return" => TokenKind::Return,
            "break" => TokenKind::Break,
            "super" => TokenKind::Super,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            _ => TokenKind::Identifier,
        };

        self.add_token(kind, value, None);
    }

    /// Block comments nest: `/* outer /* inner */ still outer */` is one
    /// comment, not a comment followed by stray text.
    fn block_comment(&mut self, diagnostics: &mut Diagnostics) {
        let start_line = self.line;
        self.advance(); // '/'
        self.advance(); // '*'

        let mut depth = 1;
        while depth > 0 {
            if self.is_at_end() {
                diagnostics.scan_error(&ScanError {
                    line: start_line,
                    message: "Unterminated block comment.".to_string(),
                });
                return;
            }

            if self.peek() == '\n' {
                self.line += 1;
            }

            if self.peek() == '/' && self.peek_next() == '*' {
                self.advance();
                self.advance();
                depth += 1;
            } else if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                depth -= 1;
            } else {
                self.advance();
            }
        }
    }

    fn scan_token(&mut self, diagnostics: &mut Diagnostics) {
        let c = self.peek();
        match c {
            '(' => self.add_single_char_token(TokenKind::LeftParen),
            ')' => self.add_single_char_token(TokenKind::RightParen),
            '{' => self.add_single_char_token(TokenKind::LeftBrace),
            '}' => self.add_single_char_token(TokenKind::RightBrace),
            ',' => self.add_single_char_token(TokenKind::Comma),
            '.' => self.add_single_char_token(TokenKind::Dot),
            '-' => self.add_single_char_token(TokenKind::Minus),
            '+' => self.add_single_char_token(TokenKind::Plus),
            ';' => self.add_single_char_token(TokenKind::Semicolon),
            '*' => self.add_single_char_token(TokenKind::Star),

            '!' => {
                if self.match_next('=') {
                    self.add_double_char_token(TokenKind::BangEqual);
                } else {
                    self.add_single_char_token(TokenKind::Bang);
                }
            }
            '=' => {
                if self.match_next('=') {
                    self.add_double_char_token(TokenKind::EqualEqual);
                } else {
                    self.add_single_char_token(TokenKind::Equal);
                }
            }
            '<' => {
                if self.match_next('=') {
                    self.add_double_char_token(TokenKind::LessEqual);
                } else {
                    self.add_single_char_token(TokenKind::Less);
                }
            }
            '>' => {
                if self.match_next('=') {
                    self.add_double_char_token(TokenKind::GreaterEqual);
                } else {
                    self.add_single_char_token(TokenKind::Greater);
                }
            }
            '/' => {
                if self.match_next('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else if self.match_next('*') {
                    self.block_comment(diagnostics);
                } else {
                    self.add_single_char_token(TokenKind::Slash);
                }
            }

            ' ' | '\r' | '\t' => {
                self.advance();
            }

            '\n' => {
                self.advance();
                self.line += 1;
            }

            '"' => self.string(diagnostics),

            c if c.is_ascii_digit() => self.number(),

            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();
                diagnostics.scan_error(&ScanError {
                    line: self.line,
                    message: format!("Unexpected character '{c}'."),
                });
            }
        }
    }
}
