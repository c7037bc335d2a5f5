#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        syntax,
        "for (var i = 0; i < 3; i = i + 1) {\n  print i;\n}\n",
        ok: ["0", "1", "2"]
    }

    tests! {
        closure_in_body,
        "var f;\nfor (var i = 0; i < 1; i = i + 1) {\n  var j = i;\n  fun g() {\n    print j;\n  }\n  f = g;\n}\nf();\n",
        ok: ["0"]
    }
}
