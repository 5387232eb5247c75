#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        inherit_method in inheritance is OK
        "A"
    }

    tests! {
        override_method in inheritance is OK
        "B"
    }

    tests! {
        superclass_must_be_class in inheritance is ERR(70)
        "Superclass must be a class."
        "[line 2]"
    }

    tests! {
        inherit_from_itself in inheritance is ERR(65)
        "[line 1] Error at 'Oops': A class can't inherit from itself."
    }
}
