//! crates/logging-sink/src/tracing_sink.rs
//! Default sink rendering records through a private `tracing` dispatcher.
//!
//! Every [`TracingSink`] owns a [`tracing::Dispatch`] built from
//! `tracing-subscriber`'s `fmt` subscriber. Records are emitted as `tracing`
//! events scoped to that dispatcher with [`dispatcher::with_default`], so the
//! sink never touches the process-wide subscriber an application may install.
//!
//! Each line carries the timestamp and level added by the `fmt` layer, the
//! rendered record (`"<message>" err="<error>" key="value" ...`) and the
//! `severity`, `caller` and `logger` fields.

use std::error::Error;
use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::{Dispatch, dispatcher};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::{MakeWriterExt, MutexGuardWriter};

use crate::error::SinkError;
use crate::logger::{LogSink, Logger};
use crate::options::SinkOptions;
use crate::record::{KeyValue, Record};
use crate::rotating::RotatingFile;
use crate::severity::Severity;

/// Writer shared by a sink and every sink derived from it.
///
/// Locking and poison recovery come from `tracing-subscriber`'s
/// [`MakeWriter`] implementation for [`Mutex`].
#[derive(Clone)]
struct SharedWriter(Arc<Mutex<Box<dyn Write + Send>>>);

impl SharedWriter {
    fn new(writer: impl Write + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(Box::new(writer))))
    }

    fn flush(&self) -> io::Result<()> {
        MakeWriter::make_writer(&*self.0).flush()
    }
}

impl<'a> MakeWriter<'a> for SharedWriter {
    type Writer = MutexGuardWriter<'a, Box<dyn Write + Send>>;

    fn make_writer(&'a self) -> Self::Writer {
        MakeWriter::make_writer(&*self.0)
    }
}

/// Sink that formats records with `tracing-subscriber`'s `fmt` layer.
#[derive(Clone)]
pub struct TracingSink {
    dispatch: Dispatch,
    writer: SharedWriter,
    name: Option<String>,
    values: Vec<(String, String)>,
}

impl TracingSink {
    /// Creates a sink writing to `writer`.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        let writer = SharedWriter::new(writer);
        Self::assemble(writer.clone(), writer)
    }

    fn assemble<M>(make_writer: M, writer: SharedWriter) -> Self
    where
        M: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(make_writer)
            .with_ansi(false)
            .with_target(false)
            .finish();

        Self {
            dispatch: Dispatch::new(subscriber),
            writer,
            name: None,
            values: Vec::new(),
        }
    }

    /// Creates a sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Creates a sink for `options`: standard error, plus a rotating file
    /// when a path is set.
    pub fn from_options(options: &SinkOptions) -> Result<Self, SinkError> {
        match &options.path {
            Some(path) => {
                let file = SharedWriter::new(RotatingFile::open(path, options)?);
                Ok(Self::assemble(file.clone().and(io::stderr), file))
            }
            None => Ok(Self::stderr()),
        }
    }

    /// Dot-joined logger name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn render(&self, err: Option<&(dyn Error + 'static)>, record: &Record<'_>) -> String {
        let mut line = format!("{:?}", record.message.trim_end_matches('\n'));
        if let Some(err) = err {
            let _ = write!(line, " err={:?}", err.to_string());
        }
        for (key, value) in &self.values {
            let _ = write!(line, " {key}={value:?}");
        }
        for kv in record.key_values {
            let _ = write!(line, " {}={:?}", kv.key, kv.value.to_string());
        }
        line
    }

    fn emit(&self, err: Option<&(dyn Error + 'static)>, record: &Record<'_>) {
        let line = self.render(err, record);
        let severity = record.severity.flag();
        let caller = record.caller();
        let logger = self.name.as_deref().unwrap_or_default();

        macro_rules! event {
            ($level:ident) => {
                tracing::$level!(severity = %severity, caller = %caller, logger = %logger, "{line}")
            };
        }

        dispatcher::with_default(&self.dispatch, || match record.severity {
            Severity::Info => event!(info),
            Severity::Warning => event!(warn),
            Severity::Error | Severity::Fatal => event!(error),
        });
    }
}

impl fmt::Debug for TracingSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingSink")
            .field("name", &self.name)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

impl LogSink for TracingSink {
    fn info(&self, record: &Record<'_>) {
        self.emit(None, record);
    }

    fn error(&self, err: Option<&(dyn Error + 'static)>, record: &Record<'_>) {
        self.emit(err, record);
    }

    fn with_values(&self, key_values: &[KeyValue<'_>]) -> Arc<dyn LogSink> {
        let mut derived = self.clone();
        derived.values.extend(
            key_values
                .iter()
                .map(|kv| (kv.key.to_owned(), kv.value.to_string())),
        );
        Arc::new(derived)
    }

    fn with_name(&self, name: &str) -> Arc<dyn LogSink> {
        let mut derived = self.clone();
        derived.name = Some(match &self.name {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.to_owned(),
        });
        Arc::new(derived)
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Builds the default [`Logger`] for `options`.
///
/// # Errors
///
/// Returns [`SinkError`] when the log file cannot be opened.
pub fn build(options: &SinkOptions) -> Result<Logger, SinkError> {
    TracingSink::from_options(options).map(Logger::new)
}
