#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        constructor,
        "class A {\n  init(value) {\n    this.value = value;\n  }\n}\nclass B < A {}\nvar b = B(\"value\");\nprint b.value;\n",
        ok: ["value"]
    }

    tests! {
        inherit_from_number,
        "var NotAClass = 123;\nclass Foo < NotAClass {}\n",
        err: ["[line 2] Superclass must be a class."]
    }

    tests! {
        inherit_methods,
        "class A {\n  foo() {\n    print \"foo\";\n  }\n  bar() {\n    print \"bar\";\n  }\n}\nclass B < A {\n  bar() {\n    print \"bar override\";\n  }\n}\nvar b = B();\nb.foo();\nb.bar();\n",
        ok: ["foo", "bar override"]
    }

    tests! {
        set_fields_from_base_class,
        "class Base {\n  foo() {\n    this.value = \"value\";\n  }\n}\nclass Derived < Base {\n  getValue() {\n    return this.value;\n  }\n}\nvar d = Derived();\nd.foo();\nprint d.getValue();\n",
        ok: ["value"]
    }
}
