#[macro_export]
macro_rules! assert_f64_approx {
    ($l:expr, $r:expr) => {
        assert!(
            ($l - $r).abs() < f64::EPSILON,
            "assertion failed: {} !~ {}",
            $l,
            $r
        )
    };
    ($l:expr, $r:expr, $msg:expr) => {
        assert!(
            ($l - $r).abs() < f64::EPSILON,
            "assertion failed: {} !~ {}: {}",
            $l,
            $r,
            $msg
        )
    };
}

/// Generate one `#[test]` per activation kind, with the kind bound to
/// `ACTIVATION` inside the body.
#[macro_export]
macro_rules! test_activation {
    ($name:ident[$($act:ident)|+]() $body:tt ) => {$(
        ::paste::paste! {
            #[test]
            fn [<test_ $name _ $act:snake>]() {
                const ACTIVATION: $crate::genome::Activation =
                    $crate::genome::Activation::$act;
                $body
            }
        }
    )+};
}
