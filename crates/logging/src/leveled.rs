//! crates/logging/src/leveled.rs
//! Severity-leveled call families bound to one logger.
//!
//! Each severity has six entry points: plain (`info`), explicit depth
//! (`info_depth`), line (`infoln`, `infoln_depth`) and format (`infof`,
//! `infof_depth`). The plain forms delegate to the depth forms with a depth
//! of zero, and every entry point is `#[track_caller]`, so both report the
//! same call site and depth.

use std::error::Error;
use std::fmt::{self, Display};
use std::panic::Location;

use logging_sink::{KeyValue, Logger, Severity};

use crate::dispatch::{Logging, Message};

/// Leveled logging through a resolved logger, or the global sink.
///
/// Obtained from [`Logging::global`] or [`Logging::leveled`].
#[derive(Clone, Debug)]
pub struct Leveled<'a> {
    logging: &'a Logging,
    logger: Option<Logger>,
}

macro_rules! leveled_family {
    (
        $severity:expr, $label:literal,
        $plain:ident, $depth:ident, $ln:ident, $ln_depth:ident, $f:ident, $f_depth:ident
    ) => {
        #[doc = concat!("Logs the concatenated operands at ", $label, ".")]
        #[track_caller]
        pub fn $plain(&self, args: &[&dyn Display]) {
            self.$depth(0, args);
        }

        #[doc = concat!("Logs the concatenated operands at ", $label, ", attributed `depth` frames up.")]
        #[track_caller]
        pub fn $depth(&self, depth: usize, args: &[&dyn Display]) {
            self.emit($severity, depth, None, Message::Print(args));
        }

        #[doc = concat!("Logs the space-joined operands and a newline at ", $label, ".")]
        #[track_caller]
        pub fn $ln(&self, args: &[&dyn Display]) {
            self.$ln_depth(0, args);
        }

        #[doc = concat!("Logs the space-joined operands and a newline at ", $label, ", attributed `depth` frames up.")]
        #[track_caller]
        pub fn $ln_depth(&self, depth: usize, args: &[&dyn Display]) {
            self.emit($severity, depth, None, Message::Println(args));
        }

        #[doc = concat!("Logs formatted arguments at ", $label, ".")]
        #[track_caller]
        pub fn $f(&self, args: fmt::Arguments<'_>) {
            self.$f_depth(0, args);
        }

        #[doc = concat!("Logs formatted arguments at ", $label, ", attributed `depth` frames up.")]
        #[track_caller]
        pub fn $f_depth(&self, depth: usize, args: fmt::Arguments<'_>) {
            self.emit($severity, depth, None, Message::Printf(args));
        }
    };
}

macro_rules! terminal_family {
    (
        $dispatch:ident, $label:literal,
        $plain:ident, $depth:ident, $ln:ident, $ln_depth:ident, $f:ident, $f_depth:ident
    ) => {
        #[doc = concat!("Logs the concatenated operands, then ", $label, ".")]
        #[track_caller]
        pub fn $plain(&self, args: &[&dyn Display]) -> ! {
            self.$depth(0, args)
        }

        #[doc = concat!("Logs the concatenated operands attributed `depth` frames up, then ", $label, ".")]
        #[track_caller]
        pub fn $depth(&self, depth: usize, args: &[&dyn Display]) -> ! {
            self.logging
                .$dispatch(self.logger.as_ref(), depth, Message::Print(args), Location::caller())
        }

        #[doc = concat!("Logs the space-joined operands, then ", $label, ".")]
        #[track_caller]
        pub fn $ln(&self, args: &[&dyn Display]) -> ! {
            self.$ln_depth(0, args)
        }

        #[doc = concat!("Logs the space-joined operands attributed `depth` frames up, then ", $label, ".")]
        #[track_caller]
        pub fn $ln_depth(&self, depth: usize, args: &[&dyn Display]) -> ! {
            self.logging
                .$dispatch(self.logger.as_ref(), depth, Message::Println(args), Location::caller())
        }

        #[doc = concat!("Logs formatted arguments, then ", $label, ".")]
        #[track_caller]
        pub fn $f(&self, args: fmt::Arguments<'_>) -> ! {
            self.$f_depth(0, args)
        }

        #[doc = concat!("Logs formatted arguments attributed `depth` frames up, then ", $label, ".")]
        #[track_caller]
        pub fn $f_depth(&self, depth: usize, args: fmt::Arguments<'_>) -> ! {
            self.logging
                .$dispatch(self.logger.as_ref(), depth, Message::Printf(args), Location::caller())
        }
    };
}

impl<'a> Leveled<'a> {
    pub(crate) fn new(logging: &'a Logging, logger: Option<Logger>) -> Self {
        Self { logging, logger }
    }

    /// The logger records go to, resolving the global sink if none is bound.
    pub fn logger(&self) -> Logger {
        self.logging.resolve(self.logger.as_ref())
    }

    #[track_caller]
    fn emit(
        &self,
        severity: Severity,
        depth: usize,
        err: Option<&(dyn Error + 'static)>,
        message: Message<'_>,
    ) {
        self.logging.log(
            self.logger.as_ref(),
            severity,
            depth,
            err,
            message,
            Location::caller(),
        );
    }

    leveled_family!(Severity::Info, "INFO", info, info_depth, infoln, infoln_depth, infof, infof_depth);
    leveled_family!(
        Severity::Warning,
        "WARNING",
        warning,
        warning_depth,
        warningln,
        warningln_depth,
        warningf,
        warningf_depth
    );
    leveled_family!(Severity::Error, "ERROR", error, error_depth, errorln, errorln_depth, errorf, errorf_depth);

    terminal_family!(
        fatal,
        "terminates with a stack dump",
        fatal,
        fatal_depth,
        fatalln,
        fatalln_depth,
        fatalf,
        fatalf_depth
    );
    terminal_family!(
        exit,
        "terminates without a stack dump",
        exit,
        exit_depth,
        exitln,
        exitln_depth,
        exitf,
        exitf_depth
    );

    /// Logs `message` with ordered key/value pairs at INFO.
    #[track_caller]
    pub fn info_s(&self, message: &str, key_values: &[KeyValue<'_>]) {
        self.info_s_depth(0, message, key_values);
    }

    /// Logs `message` with key/value pairs at INFO, attributed `depth` frames
    /// up.
    #[track_caller]
    pub fn info_s_depth(&self, depth: usize, message: &str, key_values: &[KeyValue<'_>]) {
        self.emit(
            Severity::Info,
            depth,
            None,
            Message::Structured(message, key_values),
        );
    }

    /// Logs `err` and `message` with key/value pairs at ERROR.
    #[track_caller]
    pub fn error_s(
        &self,
        err: Option<&(dyn Error + 'static)>,
        message: &str,
        key_values: &[KeyValue<'_>],
    ) {
        self.error_s_depth(0, err, message, key_values);
    }

    /// Logs `err` and `message` with key/value pairs at ERROR, attributed
    /// `depth` frames up.
    #[track_caller]
    pub fn error_s_depth(
        &self,
        depth: usize,
        err: Option<&(dyn Error + 'static)>,
        message: &str,
        key_values: &[KeyValue<'_>],
    ) {
        self.emit(
            Severity::Error,
            depth,
            err,
            Message::Structured(message, key_values),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use logging_sink::testing::{CaptureSink, Route};

    fn facade() -> (Logging, CaptureSink) {
        let logging = Logging::new();
        let sink = CaptureSink::new();
        logging.settings().set_sink(sink.logger());
        (logging, sink)
    }

    #[test]
    fn families_route_by_severity() {
        let (logging, sink) = facade();
        let log = logging.global();

        log.info(&[&"i"]);
        log.warning(&[&"w"]);
        log.error(&[&"e"]);

        let routes: Vec<_> = sink.records().iter().map(|r| (r.route, r.severity)).collect();
        assert_eq!(
            routes,
            [
                (Route::Info, Severity::Info),
                (Route::Error, Severity::Warning),
                (Route::Error, Severity::Error),
            ]
        );
    }

    #[test]
    fn message_styles_render_as_documented() {
        let (logging, sink) = facade();
        let log = logging.global();

        log.info(&[&"a", &1]);
        log.infoln(&[&"a", &1]);
        log.infof(format_args!("{}-{}", "a", 1));

        let messages: Vec<_> = sink.records().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, ["a1", "a 1\n", "a-1"]);
    }

    #[test]
    fn contextual_handle_uses_attached_logger() {
        let (logging, global) = facade();
        let local = CaptureSink::new();
        let ctx = Context::new().with_logger(local.logger());

        logging.leveled(&ctx).warningf(format_args!("local"));

        assert!(global.is_empty());
        assert_eq!(local.records()[0].message, "local");
    }

    #[test]
    fn contextual_handle_falls_back_when_disabled() {
        let (logging, global) = facade();
        logging.settings().switch_contextual(false);
        let local = CaptureSink::new();
        let ctx = Context::new().with_logger(local.logger());

        logging.leveled(&ctx).info(&[&"global"]);

        assert!(local.is_empty());
        assert_eq!(global.len(), 1);
    }

    #[test]
    fn handle_logger_resolves_binding() {
        let (logging, _) = facade();
        let local = CaptureSink::new().logger();
        let ctx = Context::new().with_logger(local.clone());
        assert!(logging.leveled(&ctx).logger().same_sink(&local));
    }
}
