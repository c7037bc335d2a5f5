#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        empty_body,
        "fun f() {}\nprint f();\n",
        ok: ["nil"]
    }

    tests! {
        parameters,
        "fun f(a, b) {\n  print a + b;\n}\nf(1, 2);\n",
        ok: ["3"]
    }

    tests! {
        recursion,
        "fun fib(n) {\n  if (n < 2) return n;\n  return fib(n - 1) + fib(n - 2);\n}\nprint fib(8);\n",
        ok: ["21"]
    }

    tests! {
        print_function,
        "fun foo() {}\nprint foo;\nprint clock;\n",
        ok: ["<fn foo>", "<native fn clock>"]
    }

    tests! {
        missing_arguments,
        "fun f(a, b) {}\nf(1);\n",
        err: ["[line 2] Expected 2 arguments but got 1."]
    }

    #[test]
    fn too_many_parameters() {
        use rlox::Lox;

        let params: Vec<String> = (0..256).map(|i| format!("a{i}")).collect();
        let source = format!("fun f({}) {{}}", params.join(", "));

        let mut lox = Lox::with_stdout(Box::new(Vec::<u8>::new()));
        let outcome = lox.run_source(&source);

        assert!(outcome.had_error);
        assert!(outcome.diagnostics.contains("Cannot have more than 255 parameters."));
    }

    #[test]
    fn too_many_arguments() {
        use rlox::Lox;

        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let source = format!("fun f() {{}}\nf({});", args.join(", "));

        let mut lox = Lox::with_stdout(Box::new(Vec::<u8>::new()));
        let outcome = lox.run_source(&source);

        assert!(outcome.had_error);
        assert!(outcome.diagnostics.contains("Cannot have more than 255 arguments."));
    }
}
