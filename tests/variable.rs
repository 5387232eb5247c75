#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        redeclare_global in variable is OK
        "second"
    }

    tests! {
        uninitialized_is_nil in variable is OK
        "nil"
    }

    tests! {
        assign_returns_value in variable is OK
        "2"
    }

    tests! {
        own_initializer in variable is ERR(65)
        "[line 3] Error at 'a': Can't read local variable in its own initializer."
    }

    tests! {
        duplicate_local in variable is ERR(65)
        "[line 3] Error at 'a': Already a variable with this name in this scope."
    }

    tests! {
        undefined in variable is ERR(70)
        "Undefined variable 'missing'."
        "[line 1]"
    }

    tests! {
        undefined_assign in variable is ERR(70)
        "Undefined variable 'missing'."
        "[line 1]"
    }
}
