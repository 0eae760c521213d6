//! Seams between the adapter and its collaborators.
//!
//! The adapter only ever talks to a `LoggingEngine` and a
//! `ConfigurationSource`; the bundled `engine` module and `Settings` are one
//! implementation of each.

use crate::config::ConfigError;
use crate::domain::{Level, LogRecord};
use crate::engine::EngineError;
use serde_json::Value;

/// Renders a record into the bytes a handler writes out.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> String;
}

/// One output destination plus a minimum severity filter.
pub trait Handler: Send + Sync {
    fn is_handling(&self, level: Level) -> bool;

    fn handle(&self, record: &LogRecord) -> Result<(), EngineError>;

    /// Whether records keep propagating to the handlers after this one.
    fn bubble(&self) -> bool;
}

/// The logging engine the adapter forwards to.
///
/// Implementations are shared (`Arc`) and must be usable through `&self`.
pub trait LoggingEngine: Send + Sync {
    fn push_handler(&self, handler: Box<dyn Handler>);

    /// Emit `message` at `level`. The returned flag is the engine's own
    /// success indicator and is passed through by the adapter unchanged.
    fn log(&self, level: Level, message: &str) -> Result<bool, EngineError>;
}

/// Read-only key/value configuration.
pub trait ConfigurationSource: Send + Sync {
    fn get(&self, key: &str) -> Result<Value, ConfigError>;
}
