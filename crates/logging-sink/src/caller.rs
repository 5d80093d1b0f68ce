//! crates/logging-sink/src/caller.rs
//! Call-site attribution for records logged through wrappers.
//!
//! Entry points are `#[track_caller]`, so a record's [`Location`] is the frame
//! that called the logging function. When a wrapper asks for extra depth, the
//! reported site is found by walking the stack with the `backtrace` crate:
//! the frame matching the tracked location is the anchor, and the site is the
//! frame `frames_up` levels above it.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};

/// Frames between a public logging entry point and the sink.
///
/// Records produced by the public entry points carry this much depth on top
/// of whatever the caller asked for, so `info(...)` and `info_depth(0, ...)`
/// report the same depth.
pub const CALL_DEPTH_OFFSET: usize = 1;

/// Source position a record is attributed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    file: Cow<'static, str>,
    line: u32,
    column: u32,
}

impl CallSite {
    /// The site of a tracked caller location.
    #[must_use]
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: Cow::Borrowed(location.file()),
            line: location.line(),
            column: location.column(),
        }
    }

    /// Resolves the frame `frames_up` levels above `location`.
    ///
    /// Falls back to `location` when the stack cannot be symbolized, for
    /// example in binaries built without debug info.
    #[must_use]
    pub fn resolve(location: &'static Location<'static>, frames_up: usize) -> Self {
        if frames_up == 0 {
            return Self::from_location(location);
        }
        let frames = symbolized_frames();
        let anchor = frames
            .iter()
            .position(|frame| frame.line == location.line() && frame.is_in(location.file()))
            .or_else(|| frames.iter().position(|frame| frame.is_in(location.file())));
        anchor
            .and_then(|index| frames.get(index + frames_up))
            .map_or_else(|| Self::from_location(location), |frame| frame.to_call_site(location))
    }

    /// Source file.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// One-based line.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// One-based column, or zero when the debug info has none.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

struct Frame {
    file: PathBuf,
    line: u32,
    column: u32,
}

impl Frame {
    fn is_in(&self, file: &str) -> bool {
        self.file.ends_with(Path::new(file))
    }

    fn to_call_site(&self, anchor: &'static Location<'static>) -> CallSite {
        let file = if self.is_in(anchor.file()) {
            Cow::Borrowed(anchor.file())
        } else {
            Cow::Owned(self.file.display().to_string())
        };
        CallSite {
            file,
            line: self.line,
            column: self.column,
        }
    }
}

/// Every symbol with a source position, innermost first. Inlined functions
/// contribute one entry each.
fn symbolized_frames() -> Vec<Frame> {
    let mut frames = Vec::new();
    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
                frames.push(Frame {
                    file: file.to_path_buf(),
                    line,
                    column: symbol.colno().unwrap_or(0),
                });
            }
        });
        true
    });
    frames
}
