#[macro_use]
mod common;

#[cfg(test)]
mod _while {
    tests! {
        syntax,
        "var i = 0;\nwhile (i < 3) {\n  print i;\n  i = i + 1;\n}\n",
        ok: ["0", "1", "2"]
    }

    tests! {
        closure_in_body,
        "var f;\nvar i = 0;\nwhile (i < 1) {\n  var j = i;\n  fun g() {\n    print j;\n  }\n  f = g;\n  i = i + 1;\n}\nf();\n",
        ok: ["0"]
    }
}
