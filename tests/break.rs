#[macro_use]
mod common;

#[cfg(test)]
mod _break {
    tests! {
        inside_while,
        "var i = 0;\nwhile (true) {\n  if (i == 3) break;\n  print i;\n  i = i + 1;\n}",
        ok: ["0", "1", "2"]
    }

    tests! {
        inside_for,
        "for (var i = 0; i < 5; i = i + 1) {\n  if (i == 3) break;\n  print i;\n}",
        ok: ["0", "1", "2"]
    }

    tests! {
        nested,
        "while (true) {\n  print \"inside\";\n  while (true) {\n    break;\n  }\n  break;\n}\nprint \"outside\";",
        ok: ["inside", "outside"]
    }

    tests! {
        no_loop,
        "break;",
        err: ["[line 1] Error at 'break': Cannot use 'break' outside of a loop."]
    }
}
