#[macro_use]
mod common;

#[cfg(test)]
mod regression {
    tests! {
        nil_is_not_equal_to_falsey_values,
        "print nil == false;\nprint nil == 0;\nprint nil == \"\";\n",
        ok: ["false", "false", "false"]
    }

    tests! {
        division_by_zero_is_a_runtime_error,
        "print 0 / 0;",
        err: ["[line 1] Division by zero."]
    }
}
