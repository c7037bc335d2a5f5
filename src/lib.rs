#![allow(clippy::needless_return)]

//! rlox is a tree-walking interpreter for Lox, the language from Bob
//! Nystrom's *Crafting Interpreters*. It is a dynamically typed language
//! with lexical scoping, closures and single-inheritance classes.
//!
//! ## Scanning
//! The first step is scanning: turning a string of source characters into
//! a flat list of tokens. The scanner is implemented in the
//! [`scanner`](scanner) module. It reports lexical problems -- an
//! unterminated string, an unterminated block comment, an unrecognized
//! character -- through [`Diagnostics`](diagnostics::Diagnostics) and keeps
//! scanning past them so more than one mistake can be reported per run.
//!
//! ## Parsing
//! The token list is turned into an AST by a hand-written recursive
//! descent parser in the [`parser`](parser) module.
//! [`Expressions`](expr::Expr) produce a [`Value`](value::Value);
//! [`statements`](stmt::Stmt) perform an action and produce nothing. The
//! parser synchronizes at statement boundaries after an error, so it can
//! also report more than one syntax error per run.
//!
//! ## Resolving
//! Before interpreting, [`resolver`](resolver) walks the AST once to work
//! out how many enclosing scopes separate each variable reference from the
//! scope that declares it. This pre-pass is what makes closures over
//! shadowed variables behave consistently regardless of when they run.
//!
//! ## Interpreting
//! [`interpreter`](interpreter) walks the resolved AST and evaluates it.
//! Most errors -- calling a value that isn't callable, adding a number to
//! a string -- can only be caught here, at the point the offending
//! expression actually runs.

use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

pub mod class;
pub mod diagnostics;
pub mod environment;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;

use diagnostics::Diagnostics;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

pub const EXIT_USAGE: i32 = 64;
pub const EXIT_DATA_ERROR: i32 = 65;
pub const EXIT_SOFTWARE: i32 = 70;

/// The interpreter driver: owns the one `Interpreter` used across an entire
/// file run, or across an entire REPL session.
pub struct Lox {
    interpreter: Interpreter,
}

impl Lox {
    pub fn new() -> Self {
        Lox { interpreter: Interpreter::new(Box::new(io::stdout())) }
    }

    /// Builds a driver that writes `print` output to `stdout` instead of
    /// the process' real standard output. Used to embed the interpreter or
    /// to capture its output in tests.
    pub fn with_stdout(stdout: Box<dyn Write>) -> Self {
        Lox { interpreter: Interpreter::new(stdout) }
    }

    /// Runs a source string directly, without touching the filesystem, and
    /// reports what diagnostics (if any) it produced. Intended for
    /// embedding and for tests.
    pub fn run_source(&mut self, source: &str) -> RunOutcome {
        let sink = SharedOutput::new();
        let mut diagnostics = Diagnostics::new(Box::new(sink.clone()));
        self.run(source, &mut diagnostics);

        RunOutcome {
            diagnostics: sink.contents(),
            had_error: diagnostics.had_error(),
            had_runtime_error: diagnostics.had_runtime_error(),
        }
    }

    /// Like `run_source`, but processes the line the way the REPL does: a
    /// single bare expression statement has its result printed.
    pub fn run_repl_source(&mut self, source: &str) -> RunOutcome {
        let sink = SharedOutput::new();
        let mut diagnostics = Diagnostics::new(Box::new(sink.clone()));
        self.run_repl_line(source, &mut diagnostics);

        RunOutcome {
            diagnostics: sink.contents(),
            had_error: diagnostics.had_error(),
            had_runtime_error: diagnostics.had_runtime_error(),
        }
    }

    /// Runs a whole file and returns the process exit code: 0 on success,
    /// 65 if scanning/parsing/resolving failed, 70 if interpreting raised a
    /// runtime error.
    pub fn run_file(&mut self, path: &Path) -> i32 {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("Could not read file '{}': {err}", path.display());
                return EXIT_USAGE;
            }
        };

        let mut diagnostics = Diagnostics::new(Box::new(io::stderr()));
        self.run(&source, &mut diagnostics);

        if diagnostics.had_error() {
            EXIT_DATA_ERROR
        } else if diagnostics.had_runtime_error() {
            EXIT_SOFTWARE
        } else {
            0
        }
    }

    /// Runs an interactive REPL, reading one line at a time until the user
    /// sends EOF (Ctrl-D). Errors on one line never end the session; each
    /// line gets a fresh set of sticky error flags.
    pub fn run_prompt(&mut self) {
        let history_path = home::home_dir().map(|home| home.join(".rlox_history"));

        let mut editor = match rustyline::DefaultEditor::new() {
            Ok(editor) => editor,
            Err(err) => {
                eprintln!("Could not start the line editor: {err}");
                return;
            }
        };

        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    let mut diagnostics = Diagnostics::new(Box::new(io::stderr()));
                    self.run_repl_line(&line, &mut diagnostics);
                }
                Err(rustyline::error::ReadlineError::Eof) | Err(rustyline::error::ReadlineError::Interrupted) => break,
                Err(err) => {
                    eprintln!("Error reading input: {err}");
                    break;
                }
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }
    }

    fn run(&mut self, source: &str, diagnostics: &mut Diagnostics) {
        if let Some(statements) = self.scan_parse_resolve(source, diagnostics) {
            self.interpreter.interpret(&statements, diagnostics);
        }
    }

    /// Like `run`, but used by the REPL: a program that is a single bare
    /// expression statement has its value printed after it runs.
    fn run_repl_line(&mut self, source: &str, diagnostics: &mut Diagnostics) {
        if let Some(statements) = self.scan_parse_resolve(source, diagnostics) {
            self.interpreter.interpret_repl(&statements, diagnostics);
        }
    }

    fn scan_parse_resolve(&mut self, source: &str, diagnostics: &mut Diagnostics) -> Option<Vec<stmt::Stmt>> {
        let scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens(diagnostics);

        if diagnostics.had_error() {
            return None;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse(diagnostics);

        if diagnostics.had_error() {
            return None;
        }

        let resolver = Resolver::new();
        let locals = resolver.resolve(&statements, diagnostics);

        if diagnostics.had_error() {
            return None;
        }

        self.interpreter.set_locals(locals);
        Some(statements)
    }
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

/// What running a source string produced, besides whatever it printed.
pub struct RunOutcome {
    pub diagnostics: String,
    pub had_error: bool,
    pub had_runtime_error: bool,
}

/// A `Write` sink backed by a reference-counted buffer, so the buffer can
/// be read back after handing a clone of it to a `Lox`/`Diagnostics` that
/// owns its writer.
#[derive(Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    pub fn new() -> Self {
        SharedOutput::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
