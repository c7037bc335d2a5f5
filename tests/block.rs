#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        empty,
        "{}\nprint \"ok\";",
        ok: ["ok"]
    }

    tests! {
        scope,
        "var a = \"outer\";\n{\n  var a = \"inner\";\n  print a;\n}\nprint a;",
        ok: ["inner", "outer"]
    }
}
