#[macro_use]
mod common;

#[cfg(test)]
mod _while {
    tests! {
        countdown in while is OK
        "3"
        "2"
        "1"
    }

    tests! {
        false_condition_skips_body in while is OK
        "done"
    }

    tests! {
        sum in while is OK
        "55"
    }
}
