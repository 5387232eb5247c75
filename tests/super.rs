#[macro_use]
mod common;

#[cfg(test)]
mod _super {
    tests! {
        call_superclass_method in super is OK
        "Base.greet()"
        "Derived.greet()"
    }

    tests! {
        constructor_chain in super is OK
        "Base.init()"
        "Derived.init()"
    }

    tests! {
        indirectly_inherited in super is OK
        "A.foo()"
    }

    tests! {
        super_binds_this in super is OK
        "derived"
    }

    tests! {
        no_superclass in super is ERR(65)
        "[line 2] Error at 'super': Can't use 'super' in a class with no superclass."
    }

    tests! {
        at_top_level in super is ERR(65)
        "[line 1] Error at 'super': Can't use 'super' outside of a class."
    }

    tests! {
        missing_method in super is ERR(70)
        "Undefined property 'missing'."
        "[line 3]"
    }

    tests! {
        without_dot in super is ERR(65)
        "[line 3] Error at ';': Expect '.' after 'super'."
    }

    tests! {
        without_name in super is ERR(65)
        "[line 3] Error at ';': Expect superclass method name."
    }
}
