#[macro_use]
mod common;

#[cfg(test)]
mod _return {
    tests! {
        early_return,
        "fun f() {\n  print \"before\";\n  return;\n  print \"after\";\n}\nf();\n",
        ok: ["before"]
    }

    tests! {
        return_value,
        "fun f() {\n  return \"ok\";\n}\nprint f();\n",
        ok: ["ok"]
    }

    tests! {
        no_value_returns_nil,
        "fun f() {\n  return;\n}\nprint f();\n",
        ok: ["nil"]
    }

    tests! {
        at_top_level,
        "return \"nope\";",
        err: ["[line 1] Error at 'return': Can't return from top-level code."]
    }
}
