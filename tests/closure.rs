#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        assign_to_closure,
        "var f;\nvar g;\n\n{\n  var local = \"local\";\n  fun f_() {\n    print local;\n    local = \"after f\";\n  }\n  f = f_;\n\n  fun g_() {\n    print local;\n    local = \"after g\";\n  }\n  g = g_;\n}\n\nf();\nf();\ng();\ng();\n",
        ok: ["local", "after f", "after f", "after g"]
    }

    tests! {
        close_over_later_variable,
        "var f;\n\n{\n  var a = \"a\";\n  var b = \"b\";\n  fun f_() {\n    print b;\n    print a;\n  }\n  f = f_;\n}\n\nf();\n",
        ok: ["b", "a"]
    }

    tests! {
        nested_closure,
        "fun f() {\n  var a = \"a\";\n  fun g() {\n    var b = \"b\";\n    fun h() {\n      var c = \"c\";\n      fun i() {\n        print a;\n        print b;\n        print c;\n      }\n      i();\n    }\n    h();\n  }\n  g();\n}\nf();\n",
        ok: ["a", "b", "c"]
    }
}
