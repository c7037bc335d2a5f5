#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        add,
        "print 123 + 456;\nprint \"str\" + \"ing\";\n",
        ok: ["579", "string"]
    }

    tests! {
        add_mixed_string_and_number,
        "print \"count: \" + 3;\nprint 3 + \"!\";\n",
        ok: ["count: 3", "3!"]
    }

    tests! {
        divide,
        "print 8 / 2;\nprint 0 / 5;\n",
        ok: ["4", "0"]
    }

    tests! {
        divide_by_zero,
        "print 1 / 0;",
        err: ["[line 1] Division by zero."]
    }

    tests! {
        multiply,
        "print 5 * 3;\nprint 0 * 10;\n",
        ok: ["15", "0"]
    }

    tests! {
        subtract,
        "print 4 - 3;\nprint 3 - 4;\n",
        ok: ["1", "-1"]
    }

    tests! {
        comparison,
        "print 1 < 2;\nprint 2 < 1;\nprint 1 <= 1;\nprint 1 > 2;\nprint 2 > 1;\nprint 1 >= 1;\n",
        ok: ["true", "false", "true", "false", "true", "true"]
    }

    tests! {
        negate,
        "print -3;\nprint -(-3);\n",
        ok: ["-3", "3"]
    }

    tests! {
        not,
        "print !true;\nprint !false;\nprint !!true;\n",
        ok: ["false", "true", "true"]
    }

    tests! {
        equals,
        "print 1 == 1;\nprint 1 == 2;\nprint \"str\" == \"str\";\nprint nil == nil;\nprint nil == false;\n",
        ok: ["true", "false", "true", "true", "false"]
    }

    tests! {
        add_type_mismatch,
        "print true + nil;",
        err: ["[line 1] Operands must be two numbers or two strings."]
    }

    tests! {
        divide_type_mismatch,
        "print \"str\" / 1;",
        err: ["[line 1] Operands must be numbers."]
    }

    tests! {
        negate_type_mismatch,
        "print -\"str\";",
        err: ["[line 1] Operand must be a number."]
    }
}
