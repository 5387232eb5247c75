#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        fib in function is OK
        "0"
        "1"
        "1"
        "2"
        "3"
        "5"
    }

    tests! {
        print_function in function is OK
        "<fn f>"
    }

    tests! {
        parameters in function is OK
        "6"
    }

    tests! {
        implicit_nil in function is OK
        "nil"
    }

    tests! {
        missing_arguments in function is ERR(70)
        "Expected 2 arguments but got 1."
        "[line 2]"
    }

    tests! {
        extra_arguments in function is ERR(70)
        "Expected 2 arguments but got 4."
        "[line 2]"
    }
}
