use super::Level;
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::{Map, Value};

/// A single log event as dispatched to handlers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub message: String,
    pub level: Level,
    pub channel: String,
    pub datetime: DateTime<Local>,
    pub context: Map<String, Value>,
    pub extra: Map<String, Value>,
}

impl LogRecord {
    pub fn new(channel: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            channel: channel.into(),
            datetime: Local::now(),
            context: Map::new(),
            extra: Map::new(),
        }
    }

    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = context;
        self
    }

    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    pub fn with_datetime(mut self, datetime: DateTime<Local>) -> Self {
        self.datetime = datetime;
        self
    }
}
