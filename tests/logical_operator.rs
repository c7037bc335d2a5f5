#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    tests! {
        and,
        "print false and \"ok\";\nprint true and \"ok\";\nprint 1 and 2 and 3;\n",
        ok: ["false", "ok", "3"]
    }

    tests! {
        or,
        "print false or \"ok\";\nprint true or \"never\";\n",
        ok: ["ok", "true"]
    }
}
