//! Error logging for store operations.
//!
//! [`ErrorLog`] is the logging context a [`crate::store::FileStore`] is built
//! with. It is configured once and never touches global logger state, so two
//! stores with different sinks can live side by side.
//!
//! [`guard`] wraps a single fallible operation: when the operation fails with
//! the declared [`FailureKind`] it writes one line of the form
//! `<timestamp> - ERROR - <message>` to the sink and hands the error back
//! unchanged. Any other outcome passes through untouched.

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::{Local, NaiveDateTime};
use log::{Level, debug, warn};

use crate::error::{FailureKind, StoreError, StoreResult};

pub const DEFAULT_LOG_FILE: &str = "log.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Console,
    File,
}

impl FromStr for LogMode {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(LogMode::Console),
            "file" => Ok(LogMode::File),
            _ => Err(StoreError::InvalidConfiguration {
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ErrorLog {
    sink: LogSink,
}

impl ErrorLog {
    /// Builds a log for `mode`; `file` is only used in [`LogMode::File`].
    pub fn new(mode: LogMode, file: impl Into<PathBuf>) -> Self {
        match mode {
            LogMode::Console => Self::console(),
            LogMode::File => Self::file(file),
        }
    }

    pub fn console() -> Self {
        Self {
            sink: LogSink::Stderr,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            sink: LogSink::File(path.into()),
        }
    }

    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// Records a failure of `operation`. A sink that cannot be written is
    /// reported through `log` and otherwise ignored.
    pub fn error(&self, operation: &str, message: &str) {
        let line = format_line(Local::now().naive_local(), Level::Error, message);
        let written = match &self.sink {
            LogSink::Stderr => writeln!(io::stderr().lock(), "{line}"),
            LogSink::File(path) => append_line(path, &line),
        };
        let target = operation_target(operation);
        let target = target.as_str();
        match written {
            Ok(()) => debug!(target: target, "Logged failure to {:?}", self.sink),
            Err(err) => warn!(target: target, "Failed to log failure to {:?}: {err}", self.sink),
        }
    }
}

pub fn format_line(timestamp: NaiveDateTime, level: Level, message: &str) -> String {
    format!("{} - {level} - {message}", timestamp.format(TIMESTAMP_FORMAT))
}

/// `log` target for records about `operation`, nested under this module so
/// crate-level filters still apply.
pub fn operation_target(operation: &str) -> String {
    format!("{}::{operation}", module_path!())
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

/// Runs `op`, logging its error to `log` when the error is of `kind`.
///
/// The result is returned exactly as `op` produced it.
pub fn guard<T, F>(log: &ErrorLog, operation: &str, kind: FailureKind, op: F) -> StoreResult<T>
where
    F: FnOnce() -> StoreResult<T>,
{
    match op() {
        Err(err) if err.kind() == kind => {
            log.error(operation, &format!("Error: {err}"));
            Err(err)
        }
        other => other,
    }
}
