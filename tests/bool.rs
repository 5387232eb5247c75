#[macro_use]
mod common;

#[cfg(test)]
mod bool {
    tests! {
        not in bool is OK
        "false"
        "true"
        "true"
    }

    tests! {
        equality in bool is OK
        "true"
        "false"
        "false"
        "false"
    }
}
