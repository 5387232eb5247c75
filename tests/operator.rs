#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        arithmetic in operator is OK
        "3"
        "4"
        "12"
        "2.5"
        "-3"
        "3"
    }

    tests! {
        precedence in operator is OK
        "14"
        "20"
        "10"
        "-4"
    }

    tests! {
        comparison in operator is OK
        "true"
        "false"
        "true"
        "true"
        "false"
        "true"
    }

    tests! {
        equality in operator is OK
        "true"
        "false"
        "false"
        "true"
        "true"
        "true"
    }

    tests! {
        divide_by_zero in operator is OK
        "inf"
        "-inf"
    }

    tests! {
        add_mixed in operator is ERR(70)
        "Operands must be two numbers or two strings."
        "[line 1]"
    }

    tests! {
        add_booleans in operator is ERR(70)
        "Operands must be two numbers or two strings."
        "[line 1]"
    }

    tests! {
        subtract_non_number in operator is ERR(70)
        "Operands must be numbers."
        "[line 1]"
    }

    tests! {
        compare_strings in operator is ERR(70)
        "Operands must be numbers."
        "[line 1]"
    }

    tests! {
        negate_non_number in operator is ERR(70)
        "Operand must be a number."
        "[line 1]"
    }
}
