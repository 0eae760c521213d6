use crate::port::ConfigurationSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an optional YAML settings file.
pub const CONFIG_FILE_ENV: &str = "STREAM_LOGGER_CONFIG";

pub const DEFAULT_CHANNEL: &str = "stream-logger";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Environment error: {0}")]
    Env(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Logging settings, loadable from YAML with environment overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keep line breaks inside formatted messages
    pub log_allow_line_breaks: bool,
    /// Drop empty context/extra sections from formatted lines
    pub log_ignore_empty_context: bool,
    pub log_output: bool,
    pub output_log_file: Option<PathBuf>,
    pub log_errors: bool,
    pub errors_log_file: Option<PathBuf>,
    pub channel: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_allow_line_breaks: false,
            log_ignore_empty_context: false,
            log_output: false,
            output_log_file: None,
            log_errors: false,
            errors_log_file: None,
            channel: DEFAULT_CHANNEL.to_string(),
        }
    }
}

impl Settings {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File settings (or defaults when `path` is `None`), then environment
    /// overrides, then validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        settings.apply_env_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        load_env_var("LOG_ALLOW_LINE_BREAKS", &mut self.log_allow_line_breaks)?;
        load_env_var("LOG_IGNORE_EMPTY_CONTEXT", &mut self.log_ignore_empty_context)?;
        load_env_var("LOG_OUTPUT", &mut self.log_output)?;
        load_env_path_opt("OUTPUT_LOG_FILE", &mut self.output_log_file);
        load_env_var("LOG_ERRORS", &mut self.log_errors)?;
        load_env_path_opt("ERRORS_LOG_FILE", &mut self.errors_log_file);
        load_env_string("LOG_CHANNEL", &mut self.channel);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel.trim().is_empty() {
            return Err(ConfigError::Invalid("Channel cannot be empty".into()));
        }

        if self.log_output && self.output_log_file.is_none() {
            return Err(ConfigError::Invalid(
                "Output logging is enabled but output_log_file is not set".into(),
            ));
        }

        if self.log_errors && self.errors_log_file.is_none() {
            return Err(ConfigError::Invalid(
                "Error logging is enabled but errors_log_file is not set".into(),
            ));
        }

        Ok(())
    }
}

impl ConfigurationSource for Settings {
    fn get(&self, key: &str) -> Result<Value, ConfigError> {
        let path_value = |path: &Option<PathBuf>| {
            path.as_ref()
                .map_or(Value::Null, |p| Value::String(p.display().to_string()))
        };

        let value = match key {
            "log_allow_line_breaks" => Value::Bool(self.log_allow_line_breaks),
            "log_ignore_empty_context" => Value::Bool(self.log_ignore_empty_context),
            "log_output" => Value::Bool(self.log_output),
            "output_log_file" => path_value(&self.output_log_file),
            "log_errors" => Value::Bool(self.log_errors),
            "errors_log_file" => path_value(&self.errors_log_file),
            "channel" => Value::String(self.channel.clone()),
            _ => return Err(ConfigError::MissingKey(key.to_string())),
        };
        Ok(value)
    }
}

impl ConfigurationSource for HashMap<String, Value> {
    fn get(&self, key: &str) -> Result<Value, ConfigError> {
        HashMap::get(self, key)
            .cloned()
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }
}

/// Loose truthiness for values coming from untyped configuration.
///
/// Strings are true unless empty, `"0"` or `"false"` (any case); numbers are
/// true unless zero; arrays and objects are true unless empty.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false")),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Returns Ok(()) if the variable doesn't exist (keeps the current value).
fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = env::var(name) {
        *target = value
            .trim()
            .parse()
            .map_err(|e| ConfigError::Env(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}

fn load_env_string(name: &str, target: &mut String) {
    if let Ok(value) = env::var(name) {
        *target = value;
    }
}

fn load_env_path_opt(name: &str, target: &mut Option<PathBuf>) {
    if let Ok(value) = env::var(name) {
        *target = if value.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(value))
        };
    }
}

/// Settings file from `STREAM_LOGGER_CONFIG` if set, defaults otherwise, with
/// environment overrides applied and validated.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    match env::var(CONFIG_FILE_ENV) {
        Ok(raw) if !raw.trim().is_empty() => Settings::load(Some(Path::new(raw.trim()))),
        _ => Settings::load(None),
    }
}
