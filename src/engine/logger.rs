use super::EngineError;
use crate::domain::{Level, LogRecord};
use crate::port::{Handler, LoggingEngine};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::fmt;

/// A named channel dispatching records to a stack of handlers.
///
/// Handlers are kept most-recently-pushed first. A record visits every handler
/// that accepts its level until one with `bubble() == false` has handled it.
pub struct Logger {
    channel: String,
    handlers: RwLock<Vec<Box<dyn Handler>>>,
}

impl Logger {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn handlers_len(&self) -> usize {
        self.handlers.read().len()
    }

    /// Returns `Ok(true)` when at least one handler processed the record.
    pub fn log_with_context(
        &self,
        level: Level,
        message: &str,
        context: Map<String, Value>,
    ) -> Result<bool, EngineError> {
        let handlers = self.handlers.read();

        let Some(first) = handlers.iter().position(|h| h.is_handling(level)) else {
            return Ok(false);
        };

        let record = LogRecord::new(self.channel.as_str(), level, message).with_context(context);

        for handler in &handlers[first..] {
            if !handler.is_handling(level) {
                continue;
            }
            handler.handle(&record)?;
            if !handler.bubble() {
                break;
            }
        }

        Ok(true)
    }

    pub fn debug(&self, message: &str) -> Result<bool, EngineError> {
        self.log(Level::Debug, message)
    }

    pub fn info(&self, message: &str) -> Result<bool, EngineError> {
        self.log(Level::Info, message)
    }

    pub fn notice(&self, message: &str) -> Result<bool, EngineError> {
        self.log(Level::Notice, message)
    }

    pub fn warning(&self, message: &str) -> Result<bool, EngineError> {
        self.log(Level::Warning, message)
    }

    pub fn error(&self, message: &str) -> Result<bool, EngineError> {
        self.log(Level::Error, message)
    }

    pub fn critical(&self, message: &str) -> Result<bool, EngineError> {
        self.log(Level::Critical, message)
    }

    pub fn alert(&self, message: &str) -> Result<bool, EngineError> {
        self.log(Level::Alert, message)
    }

    pub fn emergency(&self, message: &str) -> Result<bool, EngineError> {
        self.log(Level::Emergency, message)
    }
}

impl LoggingEngine for Logger {
    fn push_handler(&self, handler: Box<dyn Handler>) {
        self.handlers.write().insert(0, handler);
    }

    fn log(&self, level: Level, message: &str) -> Result<bool, EngineError> {
        self.log_with_context(level, message, Map::new())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("channel", &self.channel)
            .field("handlers", &self.handlers_len())
            .finish()
    }
}
