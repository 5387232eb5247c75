#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        concatenation in string is OK
        "concat"
    }

    tests! {
        multiline in string is OK
        "1"
        "2"
    }

    tests! {
        equality in string is OK
        "true"
    }

    tests! {
        unterminated in string is ERR(65)
        "[line 1] Error: Unterminated string."
    }
}
