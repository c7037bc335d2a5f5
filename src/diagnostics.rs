use std::io::Write;

use crate::token::{Token, TokenKind};

/// A scan-time problem: an unterminated string, an unterminated block
/// comment, or a character the scanner doesn't recognize.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

/// A syntax error raised while building the AST.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

/// A static error raised while resolving lexical scope.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

/// An error raised while evaluating a statement or expression.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

/// Collects the diagnostics emitted by a single run of the scan/parse/
/// resolve/interpret pipeline.
///
/// Earlier versions of this interpreter tracked "did an error happen" with
/// process-global statics, which made the interpreter impossible to embed
/// or reuse across runs within the same process. `Diagnostics` is owned by
/// the driver instead, so each run gets its own sink and flags.
pub struct Diagnostics {
    writer: Box<dyn Write>,
    had_error: bool,
    had_runtime_error: bool,
}

impl Diagnostics {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Diagnostics {
            writer,
            had_error: false,
            had_runtime_error: false,
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears the sticky flags between REPL inputs; interpreter state
    /// (globals, defined functions) is left untouched by this.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    pub fn scan_error(&mut self, error: &ScanError) {
        self.report(error.line, "", &error.message);
        self.had_error = true;
    }

    pub fn parse_error(&mut self, error: &ParseError) {
        self.report_at_token(&error.token, &error.message);
        self.had_error = true;
    }

    pub fn resolution_error(&mut self, error: &ResolveError) {
        self.report_at_token(&error.token, &error.message);
        self.had_error = true;
    }

    pub fn runtime_error(&mut self, error: &RuntimeError) {
        let _ = writeln!(self.writer, "[line {}] {}", error.token.line, error.message);
        self.had_runtime_error = true;
    }

    fn report_at_token(&mut self, token: &Token, message: &str) {
        let where_ = if token.kind == TokenKind::EOF {
            " at end".to_string()
        } else {
            format!(" at '{}'", token.lexeme)
        };

        self.report_with_where(token.line, &where_, message);
    }

    fn report(&mut self, line: usize, where_: &str, message: &str) {
        self.report_with_where(line, where_, message);
    }

    fn report_with_where(&mut self, line: usize, where_: &str, message: &str) {
        let _ = writeln!(self.writer, "[line {line}] Error{where_}: {message}");
    }
}
