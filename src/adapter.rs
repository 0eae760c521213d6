use crate::config::coerce_flag;
use crate::domain::Level;
use crate::engine::{LineFormatter, StreamHandler};
use crate::error::LoggerError;
use crate::port::{ConfigurationSource, LoggingEngine};
use std::sync::Arc;
use tracing::debug;

pub const ALLOW_LINE_BREAKS_KEY: &str = "log_allow_line_breaks";
pub const IGNORE_EMPTY_CONTEXT_KEY: &str = "log_ignore_empty_context";

/// Level-name front end for a shared logging engine.
///
/// Level names are resolved through the fixed table in [`crate::domain::LEVELS`];
/// anything else is rejected with [`LoggerError::InvalidLevel`] before the
/// engine is touched.
#[derive(Clone)]
pub struct LogAdapter {
    engine: Arc<dyn LoggingEngine>,
    configuration: Arc<dyn ConfigurationSource>,
}

impl LogAdapter {
    pub fn new(
        engine: Arc<dyn LoggingEngine>,
        configuration: Arc<dyn ConfigurationSource>,
    ) -> Self {
        Self {
            engine,
            configuration,
        }
    }

    pub fn engine(&self) -> &Arc<dyn LoggingEngine> {
        &self.engine
    }

    pub fn configuration(&self) -> &Arc<dyn ConfigurationSource> {
        &self.configuration
    }

    /// Register a bubbling stream handler for `path` at `level` and above.
    pub fn add_stream(&self, path: &str, level: &str) -> Result<&Self, LoggerError> {
        self.add_stream_with_bubble(path, level, true)
    }

    pub fn add_stream_with_bubble(
        &self,
        path: &str,
        level: &str,
        bubble: bool,
    ) -> Result<&Self, LoggerError> {
        let level = self.parse_level(level)?;

        let mut handler = StreamHandler::new(path, level, bubble);
        handler.set_formatter(Box::new(self.default_formatter()?));
        self.engine.push_handler(Box::new(handler));

        debug!(path, %level, bubble, "registered stream handler");
        Ok(self)
    }

    pub fn info(&self, content: &str) -> Result<bool, LoggerError> {
        self.write(content, "info")
    }

    pub fn error(&self, message: &str) -> Result<bool, LoggerError> {
        self.write(message, "error")
    }

    /// Emit `content` at the named level and return the engine's own
    /// success flag.
    pub fn write(&self, content: &str, level: &str) -> Result<bool, LoggerError> {
        let level = self.parse_level(level)?;
        Ok(self.engine.log(level, content)?)
    }

    pub(crate) fn default_formatter(&self) -> Result<LineFormatter, LoggerError> {
        let allow_line_breaks = coerce_flag(&self.configuration.get(ALLOW_LINE_BREAKS_KEY)?);
        let ignore_empty_context =
            coerce_flag(&self.configuration.get(IGNORE_EMPTY_CONTEXT_KEY)?);

        Ok(LineFormatter::new(
            None,
            None,
            allow_line_breaks,
            ignore_empty_context,
        ))
    }

    pub(crate) fn parse_level(&self, level: &str) -> Result<Level, LoggerError> {
        level.parse()
    }
}

impl std::fmt::Debug for LogAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogAdapter").finish_non_exhaustive()
    }
}
