/// Runs an inline Lox program and asserts on what it printed or on the
/// diagnostics it produced, mirroring the OK/ERR split the interpreter
/// itself makes between a clean run and one with errors.
#[macro_export]
macro_rules! tests {
    ($name:ident, $src:expr, ok: [$($line:expr),* $(,)?]) => {
        #[test]
        fn $name() {
            use rlox::{Lox, SharedOutput};

            let mut lines: Vec<&str> = vec![$($line),*];
            let expected = if lines.is_empty() {
                String::new()
            } else {
                lines.push("");
                lines.join("\n")
            };

            let stdout = SharedOutput::new();
            let mut lox = Lox::with_stdout(Box::new(stdout.clone()));
            let outcome = lox.run_source($src);

            assert!(!outcome.had_error, "unexpected diagnostics: {}", outcome.diagnostics);
            assert!(!outcome.had_runtime_error, "unexpected runtime error: {}", outcome.diagnostics);
            assert_eq!(expected, stdout.contents());
        }
    };

    ($name:ident, $src:expr, err: [$($line:expr),+ $(,)?]) => {
        #[test]
        fn $name() {
            use rlox::Lox;

            let mut lines: Vec<&str> = vec![$($line),+];
            lines.push("");
            let expected = lines.join("\n");

            let mut lox = Lox::with_stdout(Box::new(Vec::<u8>::new()));
            let outcome = lox.run_source($src);

            assert!(outcome.had_error || outcome.had_runtime_error, "expected a diagnostic but got none");
            assert_eq!(expected, outcome.diagnostics);
        }
    };
}
