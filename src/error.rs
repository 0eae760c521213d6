use crate::config::ConfigError;
use crate::engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    /// The level name is not one of the eight recognised names.
    #[error("Invalid log level.")]
    InvalidLevel { input: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
