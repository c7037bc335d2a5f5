#[macro_use]
mod common;

#[cfg(test)]
mod this {
    tests! {
        this_in_method,
        "class Foo {\n  getName() {\n    return this.name;\n  }\n}\nvar foo = Foo();\nfoo.name = \"baz\";\nprint foo.getName();\n",
        ok: ["baz"]
    }

    tests! {
        nested_closure,
        "class Outer {\n  method() {\n    fun helper() {\n      print this;\n    }\n    helper();\n  }\n}\nvar outer = Outer();\nouter.method();\n",
        ok: ["<instance Outer>"]
    }

    tests! {
        this_at_top_level,
        "print this;",
        err: ["[line 1] Error at 'this': Can't use 'this' outside of a class."]
    }

    tests! {
        this_in_top_level_function,
        "fun notAMethod() {\n  print this;\n}\n",
        err: ["[line 2] Error at 'this': Can't use 'this' outside of a class."]
    }
}
