use rlox::{Lox, SharedOutput};

#[test]
fn bare_expression_prints_its_value() {
    let stdout = SharedOutput::new();
    let mut lox = Lox::with_stdout(Box::new(stdout.clone()));

    let outcome = lox.run_repl_source("1 + 2;");

    assert!(!outcome.had_error);
    assert!(!outcome.had_runtime_error);
    assert_eq!("3\n", stdout.contents());
}

#[test]
fn print_statement_is_not_echoed_twice() {
    let stdout = SharedOutput::new();
    let mut lox = Lox::with_stdout(Box::new(stdout.clone()));

    let outcome = lox.run_repl_source("print \"hi\";");

    assert!(!outcome.had_error);
    assert_eq!("hi\n", stdout.contents());
}

#[test]
fn multiple_statements_are_not_echoed() {
    let stdout = SharedOutput::new();
    let mut lox = Lox::with_stdout(Box::new(stdout.clone()));

    let outcome = lox.run_repl_source("var a = 1; a + 1;");

    assert!(!outcome.had_error);
    assert_eq!("", stdout.contents());
}
