#[macro_use]
mod common;

#[cfg(test)]
mod bool {
    tests! {
        literals,
        "print true;\nprint false;\n",
        ok: ["true", "false"]
    }

    tests! {
        not,
        "print !true;\nprint !false;\nprint !!true;\n",
        ok: ["false", "true", "true"]
    }

    tests! {
        strict_equality,
        "print true == true;\nprint true == 1;\nprint false == nil;\n",
        ok: ["true", "false", "false"]
    }
}
