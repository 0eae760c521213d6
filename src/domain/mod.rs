//! Domain layer for stream-logger.
//!
//! - `Level`: the eight severities and their fixed name table
//! - `LogRecord`: what the engine hands to each handler

pub mod level;
pub mod record;

pub use level::{LEVELS, Level};
pub use record::LogRecord;
