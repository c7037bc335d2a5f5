#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        arguments,
        "class Foo {\n  init(a, b) {\n    print \"init\";\n    print a;\n    print b;\n  }\n}\nFoo(1, 2);\n",
        ok: ["init", "1", "2"]
    }

    tests! {
        default,
        "class Foo {}\nprint Foo();\n",
        ok: ["<instance Foo>"]
    }

    tests! {
        early_return,
        "class Foo {\n  init() {\n    print \"init\";\n    if (true) return;\n    print \"never\";\n  }\n}\nprint Foo();\n",
        ok: ["init", "<instance Foo>"]
    }

    tests! {
        call_init_explicitly,
        "class Foo {\n  init(arg) {\n    print \"Foo.init(\" + arg + \")\";\n  }\n}\n\nvar foo = Foo(\"one\");\nfoo.init(\"two\");\nprint foo;\n",
        ok: ["Foo.init(one)", "Foo.init(two)", "<instance Foo>"]
    }

    tests! {
        extra_arguments,
        "class Foo {\n  init(a, b) {}\n}\nFoo(1, 2, 3, 4);\n",
        err: ["[line 4] Expected 2 arguments but got 4."]
    }

    tests! {
        return_value,
        "class Foo {\n  init() {\n    return \"something\";\n  }\n}\n",
        err: ["[line 3] Error at 'return': Can't return a value from an initializer."]
    }
}
