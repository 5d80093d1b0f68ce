#![deny(unsafe_code)]

//! Command-line probe that drives the process-wide logging facade.
//!
//! The probe exists so the behaviour that only a real process can show (exit
//! statuses, abandoned flushes, file output) can be exercised from the
//! workspace integration tests.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use logging::{Level, LogConfig, Logger, Severity};
use logging_sink::{KeyValue, LogSink, Record, SinkOptions};

/// Emit records through the xlog facade.
#[derive(Parser, Debug)]
#[command(name = "xlog-probe")]
#[command(about = "Emit records through the xlog facade")]
#[command(version)]
struct Cli {
    /// Minimum severity to emit (INFO, WARNING, ERROR, FATAL or 0-3).
    #[arg(long, global = true, default_value = "INFO")]
    severity: String,

    /// Verbosity threshold for V-gated records.
    #[arg(short = 'v', long, global = true, default_value_t = 0)]
    verbosity: i32,

    /// Also write records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Rotate the log file once it would exceed this many megabytes.
    #[arg(long, global = true, default_value_t = 0)]
    log_file_max_size_mb: u64,

    /// How long a FATAL record waits for the sink to flush.
    #[arg(long, global = true)]
    flush_timeout_ms: Option<u64>,

    /// Make every flush of the sink block for this many milliseconds.
    #[arg(long, global = true)]
    stall_flush_ms: Option<u64>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Log an INFO record.
    Info { message: Vec<String> },
    /// Log a WARNING record.
    Warning { message: Vec<String> },
    /// Log an ERROR record.
    Error { message: Vec<String> },
    /// Log a FATAL record and terminate with status 255.
    Fatal { message: Vec<String> },
    /// Log a FATAL record without a stack dump and terminate with status 1.
    Exit { message: Vec<String> },
    /// Log an INFO record gated by a verbosity level.
    Verbose {
        /// Level the record is logged at.
        #[arg(long, default_value_t = 1)]
        level: i32,
        message: Vec<String>,
    },
    /// Log a structured INFO record with `key=value` pairs.
    Structured {
        message: String,
        /// Pairs in `key=value` form.
        #[arg(long = "kv")]
        pairs: Vec<String>,
    },
}

/// Delays every flush before forwarding it.
struct StallingSink {
    inner: Arc<dyn LogSink>,
    delay: Duration,
}

impl LogSink for StallingSink {
    fn info(&self, record: &Record<'_>) {
        self.inner.info(record);
    }

    fn error(&self, err: Option<&(dyn Error + 'static)>, record: &Record<'_>) {
        self.inner.error(err, record);
    }

    fn with_values(&self, key_values: &[KeyValue<'_>]) -> Arc<dyn LogSink> {
        Arc::new(Self {
            inner: self.inner.with_values(key_values),
            delay: self.delay,
        })
    }

    fn with_name(&self, name: &str) -> Arc<dyn LogSink> {
        Arc::new(Self {
            inner: self.inner.with_name(name),
            delay: self.delay,
        })
    }

    fn flush(&self) -> io::Result<()> {
        thread::sleep(self.delay);
        self.inner.flush()
    }
}

fn configure(cli: &Cli) -> Result<(), logging::ConfigError> {
    let severity: Severity = cli.severity.parse()?;
    let sink = match &cli.log_file {
        Some(path) => SinkOptions {
            max_size_mb: cli.log_file_max_size_mb,
            ..SinkOptions::file(path)
        },
        None => SinkOptions::stderr(),
    };
    logging::configure(&LogConfig {
        verbosity: Level(cli.verbosity),
        severity,
        contextual: true,
        sink,
    });

    if let Some(ms) = cli.flush_timeout_ms {
        logging::set_flush_timeout(Duration::from_millis(ms));
    }
    if let Some(ms) = cli.stall_flush_ms {
        let inner = Arc::clone(logging::global_sink().sink());
        logging::set_sink(Logger::new(StallingSink {
            inner,
            delay: Duration::from_millis(ms),
        }));
    }
    Ok(())
}

fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

fn run(action: &Action) {
    match action {
        Action::Info { message } => logging::infof(format_args!("{}", message.join(" "))),
        Action::Warning { message } => logging::warningf(format_args!("{}", message.join(" "))),
        Action::Error { message } => logging::errorf(format_args!("{}", message.join(" "))),
        Action::Fatal { message } => logging::fatalf(format_args!("{}", message.join(" "))),
        Action::Exit { message } => logging::exitf(format_args!("{}", message.join(" "))),
        Action::Verbose { level, message } => {
            logging::v(*level).infof(format_args!("{}", message.join(" ")));
        }
        Action::Structured { message, pairs } => {
            let pairs: Vec<_> = pairs.iter().map(|pair| split_pair(pair)).collect();
            let key_values: Vec<_> = pairs
                .iter()
                .map(|(key, value)| KeyValue::new(key, value))
                .collect();
            logging::info_s(message, &key_values);
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = configure(&cli) {
        eprintln!("xlog-probe: {err}");
        return ExitCode::from(2);
    }

    run(&cli.action);

    match logging::flush() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("xlog-probe: flush failed: {err}");
            ExitCode::FAILURE
        }
    }
}
