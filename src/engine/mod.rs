//! Bundled logging engine: a channel logger with a handler stack, stream
//! handlers and a line formatter.

pub mod formatter;
pub mod handler;
pub mod logger;

pub use formatter::LineFormatter;
pub use handler::{StreamHandler, StreamTarget};
pub use logger::Logger;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to open log stream {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to log stream {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: std::io::Error,
    },
}
