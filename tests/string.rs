#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        literals,
        "print \"()\";\nprint \"a string\";\n",
        ok: ["()", "a string"]
    }

    tests! {
        multiline,
        "var s = \"1\\n2\\n3\";\nprint s;\n",
        ok: ["1", "2", "3"]
    }

    tests! {
        unterminated,
        "\"never closed",
        err: ["[line 1] Error: Unterminated string."]
    }
}
