//! crates/logging/src/exit.rs
//! Flush-then-terminate coordination for FATAL and exit calls.
//!
//! Termination flushes the active sink on a helper thread and waits at most
//! the configured timeout for it. A flush that overruns writes one line to
//! standard error and termination proceeds regardless. The process exits with
//! [`FATAL_EXIT_CODE`] unless an exit call has selected the no-stack path, in
//! which case it exits with [`NO_STACK_EXIT_CODE`].

use std::convert::Infallible;
use std::fmt;
use std::io::{self, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use logging_sink::Logger;

/// Exit status after a FATAL record.
pub const FATAL_EXIT_CODE: i32 = 255;

/// Exit status after an exit call, which skips the stack dump.
pub const NO_STACK_EXIT_CODE: i32 = 1;

/// How long termination waits for the sink to flush by default.
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Process termination hook. The default calls [`process::exit`].
pub type ExitFn = Arc<dyn Fn(i32) -> Infallible + Send + Sync>;

/// Result of a bounded flush.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlushOutcome {
    /// The flush returned before the timeout.
    Completed,
    /// The timeout elapsed first; the flush may still be running.
    TimedOut,
}

/// Runs `logger`'s flush on a helper thread and waits up to `timeout`.
///
/// On timeout a diagnostic line is written to standard error.
pub fn timeout_flush(logger: &Logger, timeout: Duration) -> FlushOutcome {
    let (tx, rx) = crossbeam_channel::bounded(1);
    let flusher = logger.clone();
    let spawned = thread::Builder::new()
        .name("xlog-flush".into())
        .spawn(move || {
            let _ = tx.send(flusher.flush());
        });
    if let Err(err) = spawned {
        tracing::debug!(target: "xlog::exit", %err, "flush thread unavailable; flushing inline");
        let _ = logger.flush();
        return FlushOutcome::Completed;
    }

    match rx.recv_timeout(timeout) {
        Ok(Ok(())) | Err(RecvTimeoutError::Disconnected) => FlushOutcome::Completed,
        Ok(Err(err)) => {
            tracing::debug!(target: "xlog::exit", %err, "flush failed");
            FlushOutcome::Completed
        }
        Err(RecvTimeoutError::Timeout) => {
            let _ = writeln!(io::stderr(), "xlog: Flush took longer than {timeout:?}");
            FlushOutcome::TimedOut
        }
    }
}

/// Holds the flush timeout, the exit hook and the no-stack flag.
pub struct ExitCoordinator {
    timeout: Mutex<Duration>,
    exit: RwLock<ExitFn>,
    no_stacks: AtomicBool,
}

impl Default for ExitCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCoordinator {
    /// Coordinator with a ten second timeout that exits the process.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Mutex::new(DEFAULT_FLUSH_TIMEOUT),
            exit: RwLock::new(Arc::new(|code| -> Infallible { process::exit(code) })),
            no_stacks: AtomicBool::new(false),
        }
    }

    /// Current flush timeout.
    #[must_use]
    pub fn flush_timeout(&self) -> Duration {
        *self.timeout.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets how long termination waits for the sink to flush.
    pub fn set_flush_timeout(&self, timeout: Duration) {
        *self.timeout.lock().unwrap_or_else(PoisonError::into_inner) = timeout;
    }

    /// Replaces the process termination hook.
    pub fn set_exit_fn<F>(&self, exit: F)
    where
        F: Fn(i32) -> Infallible + Send + Sync + 'static,
    {
        *self.exit.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(exit);
    }

    /// Selects the no-stack exit path. The flag is never reset.
    pub fn set_no_stacks(&self) {
        self.no_stacks.store(true, Ordering::SeqCst);
    }

    /// Whether the no-stack exit path has been selected.
    #[must_use]
    pub fn no_stacks(&self) -> bool {
        self.no_stacks.load(Ordering::SeqCst)
    }

    /// Exit status termination will use.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.no_stacks() {
            NO_STACK_EXIT_CODE
        } else {
            FATAL_EXIT_CODE
        }
    }

    /// Flushes `logger` within `timeout` and exits with `code`.
    pub fn flush_and_exit(&self, logger: &Logger, timeout: Duration, code: i32) -> ! {
        let outcome = timeout_flush(logger, timeout);
        tracing::debug!(target: "xlog::exit", ?outcome, code, "terminating");
        let exit = Arc::clone(&self.exit.read().unwrap_or_else(PoisonError::into_inner));
        match exit(code) {}
    }

    /// Flushes `logger` within the configured timeout and exits with
    /// [`exit_code`](Self::exit_code).
    pub fn terminate(&self, logger: &Logger) -> ! {
        self.flush_and_exit(logger, self.flush_timeout(), self.exit_code())
    }
}

impl fmt::Debug for ExitCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExitCoordinator")
            .field("timeout", &self.flush_timeout())
            .field("no_stacks", &self.no_stacks())
            .finish_non_exhaustive()
    }
}
