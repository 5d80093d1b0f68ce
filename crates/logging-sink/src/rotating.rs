//! crates/logging-sink/src/rotating.rs
//! Log file destination backed by `file-rotate`.
//!
//! The active file rolls over once a write takes it past the size limit, so a
//! record is never split across files. Backups are named
//! `<file name>.<timestamp>` and pruned by count, or by age when no count is
//! set.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use file_rotate::compression::Compression;
use file_rotate::suffix::{AppendTimestamp, FileLimit};
use file_rotate::{ContentLimit, FileRotate};

use crate::error::SinkError;
use crate::options::SinkOptions;

/// Size-rotated, append-only log file.
pub struct RotatingFile {
    path: PathBuf,
    inner: FileRotate<AppendTimestamp>,
}

impl RotatingFile {
    /// Opens (creating parent directories) the file at `path` for appending,
    /// using the rotation limits from `options`.
    pub fn open(path: impl Into<PathBuf>, options: &SinkOptions) -> Result<Self, SinkError> {
        let path = path.into();
        if path.file_name().is_none() {
            return Err(SinkError::NotAFile(path));
        }
        let open_error = |source| SinkError::Open {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(open_error)?;
        }
        // `FileRotate` defers open failures to the first write.
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(open_error)?;

        let inner = FileRotate::new(
            &path,
            AppendTimestamp::default(file_limit(options)),
            content_limit(options),
            Compression::None,
            #[cfg(unix)]
            None,
        );
        Ok(Self { path, inner })
    }

    /// Path of the active file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn content_limit(options: &SinkOptions) -> ContentLimit {
    options
        .max_size_bytes()
        .and_then(|bytes| usize::try_from(bytes).ok())
        .map_or(ContentLimit::None, ContentLimit::BytesSurpassed)
}

fn file_limit(options: &SinkOptions) -> FileLimit {
    if options.max_backups > 0 {
        return FileLimit::MaxFiles(options.max_backups);
    }
    i64::try_from(options.max_age_days)
        .ok()
        .filter(|days| *days > 0)
        .and_then(chrono::Duration::try_days)
        .map_or(FileLimit::Unlimited, FileLimit::Age)
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
