#[macro_use]
mod common;

#[cfg(test)]
mod comment {
    tests! {
        line_comment,
        "// this is ignored\nprint \"ok\";\n",
        ok: ["ok"]
    }

    tests! {
        block_comment,
        "/* this is ignored */\nprint \"ok\";\n",
        ok: ["ok"]
    }

    tests! {
        nested_block_comment,
        "/* outer /* inner */ still outer */\nprint \"ok\";\n",
        ok: ["ok"]
    }

    tests! {
        unterminated_block_comment,
        "/* never closed",
        err: ["[line 1] Error: Unterminated block comment."]
    }
}
