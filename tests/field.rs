#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        set_and_get in field is OK
        "apple"
        "pear"
    }

    tests! {
        fields_shadow_methods in field is OK
        "method"
        "field"
    }

    tests! {
        get_on_number in field is ERR(70)
        "Only instances have properties."
        "[line 1]"
    }

    tests! {
        set_on_string in field is ERR(70)
        "Only instances have fields."
        "[line 1]"
    }

    tests! {
        undefined_property in field is ERR(70)
        "Undefined property 'missing'."
        "[line 3]"
    }
}
