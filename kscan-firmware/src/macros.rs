//! Logging for the scan engine.
//!
//! `debug!`, `info!`, `warn!` and `error!` compile to nothing in a plain firmware build, forward
//! to `defmt` with the `defmt` feature, and print to stderr on the host under `test` or the
//! `test-utils` feature. Messages must format under both `defmt` and `core::fmt`, so stick to
//! `{}` over integers and `&str`.
//!
//! `fixme!` dumps any `Debug` value with its source location while chasing a problem; it is not
//! meant to stay in committed code.

#[cfg(all(not(test), not(feature = "defmt"), not(feature = "test-utils")))]
mod silent {
    #[macro_export]
    macro_rules! fixme {
        ($a:expr) => {{
            let _ = &$a;
        }};
    }

    #[macro_export]
    macro_rules! debug {
        ($($arg:expr),* $(,)?) => {{ $(let _ = &$arg;)* }};
    }

    #[macro_export]
    macro_rules! info {
        ($($arg:expr),* $(,)?) => {{ $(let _ = &$arg;)* }};
    }

    #[macro_export]
    macro_rules! warn {
        ($($arg:expr),* $(,)?) => {{ $(let _ = &$arg;)* }};
    }

    #[macro_export]
    macro_rules! error {
        ($($arg:expr),* $(,)?) => {{ $(let _ = &$arg;)* }};
    }
}

#[cfg(all(not(test), not(feature = "test-utils"), feature = "defmt"))]
mod to_defmt {
    /// Log a `Debug` value at debug level, prefixed with where it came from.
    #[macro_export]
    macro_rules! fixme {
        ($a:expr) => {
            defmt::debug!("FIXME {}:{} {:?}", file!(), line!(), $a)
        };
    }

    /// Scan progress worth seeing only when chasing a problem, such as each bounce.
    #[macro_export]
    macro_rules! debug {
        ($($arg:expr),* $(,)?) => {
            defmt::debug!($($arg),*)
        };
    }

    #[macro_export]
    macro_rules! info {
        ($($arg:expr),* $(,)?) => {
            defmt::info!($($arg),*)
        };
    }

    /// A request the engine ignored, such as a line the driver does not own.
    #[macro_export]
    macro_rules! warn {
        ($($arg:expr),* $(,)?) => {
            defmt::warn!($($arg),*)
        };
    }

    #[macro_export]
    macro_rules! error {
        ($($arg:expr),* $(,)?) => {
            defmt::error!($($arg),*)
        };
    }
}

#[cfg(any(test, feature = "test-utils"))]
mod host {
    #[doc(hidden)]
    #[macro_export]
    macro_rules! __host_log {
        ($level:literal, $($arg:expr),*) => {{
            extern crate std;
            std::eprintln!("{:<5} {}", $level, format_args!($($arg),*))
        }};
    }

    #[macro_export]
    macro_rules! fixme {
        ($a:expr) => {{
            extern crate std;
            std::eprintln!("FIX{} ./{}:{}:{}\n{:#?}", "ME", file!(), line!(), column!(), $a)
        }};
    }

    #[macro_export]
    macro_rules! debug {
        ($($arg:expr),* $(,)?) => {
            $crate::__host_log!("DEBUG", $($arg),*)
        };
    }

    #[macro_export]
    macro_rules! info {
        ($($arg:expr),* $(,)?) => {
            $crate::__host_log!("INFO", $($arg),*)
        };
    }

    #[macro_export]
    macro_rules! warn {
        ($($arg:expr),* $(,)?) => {
            $crate::__host_log!("WARN", $($arg),*)
        };
    }

    /// Panics inside unit tests, so an unexpected error fails the test that caused it.
    #[macro_export]
    macro_rules! error {
        ($($arg:expr),* $(,)?) => {{
            if cfg!(test) {
                panic!("{}", format_args!($($arg),*));
            }
            $crate::__host_log!("ERROR", $($arg),*)
        }};
    }
}
