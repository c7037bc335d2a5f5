#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        set_and_get,
        "class Box {}\nvar box = Box();\nbox.value = \"contents\";\nprint box.value;\n",
        ok: ["contents"]
    }

    tests! {
        undefined_get,
        "class Box {}\nvar box = Box();\nprint box.bar;\n",
        err: ["[line 3] Undefined property 'bar'."]
    }

    tests! {
        get_on_non_instance,
        "var n = 1;\nprint n.bar;\n",
        err: ["[line 2] Only instances have properties."]
    }

    tests! {
        set_on_non_instance,
        "var n = 1;\nn.bar = 2;\n",
        err: ["[line 2] Only instances have fields."]
    }
}
