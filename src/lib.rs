#![warn(rust_2018_idioms)]
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned
)]
#![allow(
    clippy::missing_errors_doc, // Internal API
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod adapter;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod factory;
pub mod port;
pub mod telemetry;

// Re-export main types for easy access
pub use adapter::LogAdapter;
pub use config::{ConfigError, Settings};
pub use domain::{LEVELS, Level, LogRecord};
pub use engine::{EngineError, LineFormatter, Logger, StreamHandler};
pub use error::LoggerError;
pub use factory::create_adapter;
pub use port::{ConfigurationSource, Formatter, Handler, LoggingEngine};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
