#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    tests! {
        empty_file in misc is OK
    }

    tests! {
        clock in misc is OK
        "true"
        "<native fn>"
    }

    tests! {
        unexpected_character in misc is ERR(65)
        "[line 2] Error: Unexpected character."
    }
}
