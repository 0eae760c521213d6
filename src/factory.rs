use crate::adapter::LogAdapter;
use crate::config::Settings;
use crate::engine::Logger;
use crate::error::LoggerError;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Build an adapter on a fresh `Logger` for `settings.channel`, with the
/// output (`info` and above) and error (`error` and above) streams the
/// settings enable.
pub fn create_adapter(settings: &Settings) -> Result<LogAdapter, LoggerError> {
    settings.validate()?;

    let engine = Arc::new(Logger::new(settings.channel.clone()));
    let adapter = LogAdapter::new(engine, Arc::new(settings.clone()));

    if settings.log_output
        && let Some(path) = settings.output_log_file.as_deref()
    {
        adapter.add_stream(&stream_path(path), "info")?;
        info!(path = %path.display(), "output logging enabled");
    }

    if settings.log_errors
        && let Some(path) = settings.errors_log_file.as_deref()
    {
        adapter.add_stream(&stream_path(path), "error")?;
        info!(path = %path.display(), "error logging enabled");
    }

    Ok(adapter)
}

fn stream_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
