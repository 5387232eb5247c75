#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        print_class in class is OK
        "Foo"
    }

    tests! {
        print_instance in class is OK
        "Foo instance"
    }

    tests! {
        fields in class is OK
        "yum vanilla"
    }

    tests! {
        methods in class is OK
        "2"
    }

    tests! {
        method_return in class is OK
        "36"
    }
}
