//! crates/logging/src/macros.rs
//! Variadic wrappers around the process-wide leveled functions.
//!
//! `info!(a, b)` logs the concatenated operands, `infoln!(a, b)` joins them
//! with spaces and `infof!("{}", a)` formats them. The same three forms exist
//! for `warning`, `error`, `fatal` and `exit`.

macro_rules! define_family_macros {
    ($d:tt, $print:ident, $println:ident, $printf:ident, $label:literal) => {
        #[doc = concat!("Logs the concatenated operands ", $label, ".")]
        #[macro_export]
        macro_rules! $print {
            ($d($d arg:expr),* $d(,)?) => {
                $crate::$print(&[$d(&$d arg as &dyn ::std::fmt::Display),*])
            };
        }

        #[doc = concat!("Logs the space-joined operands and a newline ", $label, ".")]
        #[macro_export]
        macro_rules! $println {
            ($d($d arg:expr),* $d(,)?) => {
                $crate::$println(&[$d(&$d arg as &dyn ::std::fmt::Display),*])
            };
        }

        #[doc = concat!("Logs formatted arguments ", $label, ".")]
        #[macro_export]
        macro_rules! $printf {
            ($d($d fmt:tt)+) => {
                $crate::$printf(::std::format_args!($d($d fmt)+))
            };
        }
    };
}

define_family_macros!($, info, infoln, infof, "at INFO");
define_family_macros!($, warning, warningln, warningf, "at WARNING");
define_family_macros!($, error, errorln, errorf, "at ERROR");
define_family_macros!($, fatal, fatalln, fatalf, "at FATAL and terminates with a stack dump");
define_family_macros!($, exit, exitln, exitf, "and terminates without a stack dump");
