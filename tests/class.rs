#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        empty,
        "class Foo {}\nprint Foo;",
        ok: ["<class Foo>"]
    }

    tests! {
        inherit_self,
        "class Foo < Foo {}",
        err: ["[line 1] Error at 'Foo': A class can't inherit from itself."]
    }

    tests! {
        inherited_method,
        "class A {\n  method() {\n    print \"A method\";\n  }\n}\n\nclass B < A {}\n\nclass C < B {}\n\nvar c = C();\nc.method();\n",
        ok: ["A method"]
    }

    tests! {
        reference_self,
        "class Foo {}\n\nfun getFoo() {\n  return Foo;\n}\n\nprint getFoo();\n",
        ok: ["<class Foo>"]
    }

    tests! {
        toplevel_self_reference,
        "class Foo {\n  identify() {\n    return Foo;\n  }\n}\n\nprint Foo().identify();\n",
        ok: ["<class Foo>"]
    }
}
