#[macro_use]
mod common;

#[cfg(test)]
mod _if {
    tests! {
        truthy_branch,
        "if (true) print \"yes\";",
        ok: ["yes"]
    }

    tests! {
        falsey_branch,
        "if (false) print \"yes\"; else print \"no\";",
        ok: ["no"]
    }

    tests! {
        no_else_when_false,
        "if (false) print \"yes\";\nprint \"after\";",
        ok: ["after"]
    }

    tests! {
        dangling_else,
        "if (true) if (false) print \"nope\"; else print \"inner\";",
        ok: ["inner"]
    }
}
