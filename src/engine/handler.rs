use super::{EngineError, LineFormatter};
use crate::domain::{Level, LogRecord};
use crate::port::{Formatter, Handler};
use parking_lot::Mutex;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Where a `StreamHandler` writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamTarget {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl StreamTarget {
    /// `stdout` and `stderr` select the process streams, everything else is a
    /// filesystem path (an optional `file://` prefix is stripped).
    pub fn parse(path: &str) -> Self {
        match path {
            "stdout" => StreamTarget::Stdout,
            "stderr" => StreamTarget::Stderr,
            other => {
                let path = other.strip_prefix("file://").unwrap_or(other);
                StreamTarget::File(PathBuf::from(path))
            }
        }
    }
}

impl fmt::Display for StreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamTarget::Stdout => f.write_str("stdout"),
            StreamTarget::Stderr => f.write_str("stderr"),
            StreamTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Writes formatted records to stdout, stderr or an append-only file.
///
/// Files are opened on the first record that passes the level filter, so
/// registering a handler never touches the filesystem.
pub struct StreamHandler {
    target: StreamTarget,
    level: Level,
    bubble: bool,
    formatter: Box<dyn Formatter>,
    writer: Mutex<Option<Box<dyn Write + Send>>>,
}

impl StreamHandler {
    pub fn new(path: &str, level: Level, bubble: bool) -> Self {
        Self {
            target: StreamTarget::parse(path),
            level,
            bubble,
            formatter: Box::new(LineFormatter::default()),
            writer: Mutex::new(None),
        }
    }

    pub fn set_formatter(&mut self, formatter: Box<dyn Formatter>) {
        self.formatter = formatter;
    }

    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    pub fn target(&self) -> &StreamTarget {
        &self.target
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn is_open(&self) -> bool {
        self.writer.lock().is_some()
    }

    /// Flush and drop the underlying stream. The next record reopens it.
    pub fn close(&self) -> Result<(), EngineError> {
        if let Some(mut writer) = self.writer.lock().take() {
            writer.flush().map_err(|source| EngineError::Write {
                target: self.target.to_string(),
                source,
            })?;
        }
        Ok(())
    }

    fn open(&self) -> Result<Box<dyn Write + Send>, EngineError> {
        let writer: Box<dyn Write + Send> = match &self.target {
            StreamTarget::Stdout => Box::new(io::stdout()),
            StreamTarget::Stderr => Box::new(io::stderr()),
            StreamTarget::File(path) => {
                let open_error = |source: io::Error| EngineError::Open {
                    target: self.target.to_string(),
                    source,
                };
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                    && !parent.exists()
                {
                    fs::create_dir_all(parent).map_err(open_error)?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(open_error)?;
                Box::new(file)
            }
        };
        debug!(target_stream = %self.target, "opened log stream");
        Ok(writer)
    }
}

impl fmt::Debug for StreamHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandler")
            .field("target", &self.target)
            .field("level", &self.level)
            .field("bubble", &self.bubble)
            .finish_non_exhaustive()
    }
}

impl Handler for StreamHandler {
    fn is_handling(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &LogRecord) -> Result<(), EngineError> {
        let line = self.formatter.format(record);

        let mut guard = self.writer.lock();
        if guard.is_none() {
            *guard = Some(self.open()?);
        }
        if let Some(writer) = guard.as_mut() {
            let written = writer
                .write_all(line.as_bytes())
                .and_then(|()| writer.flush());
            if let Err(source) = written {
                warn!(target_stream = %self.target, error = %source, "failed to write log record");
                // Drop the broken stream so the next record reopens it
                *guard = None;
                return Err(EngineError::Write {
                    target: self.target.to_string(),
                    source,
                });
            }
        }
        Ok(())
    }

    fn bubble(&self) -> bool {
        self.bubble
    }
}
