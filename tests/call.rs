#[macro_use]
mod common;

#[cfg(test)]
mod call {
    tests! {
        bool,
        "true();",
        err: ["[line 1] Can only call functions and classes."]
    }

    tests! {
        nil,
        "nil();",
        err: ["[line 1] Can only call functions and classes."]
    }

    tests! {
        number,
        "123();",
        err: ["[line 1] Can only call functions and classes."]
    }

    tests! {
        string,
        "\"str\"();",
        err: ["[line 1] Can only call functions and classes."]
    }

    tests! {
        object,
        "class Foo {}\nvar foo = Foo();\nfoo();\n",
        err: ["[line 3] Can only call functions and classes."]
    }
}
