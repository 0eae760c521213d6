use std::fs;
use std::path::Path;
use std::sync::Arc;
use stream_logger::{LogAdapter, Logger, Settings};
use tempfile::TempDir;

fn adapter(settings: Settings) -> (LogAdapter, Arc<Logger>) {
    let engine = Arc::new(Logger::new("scheduler"));
    let adapter = LogAdapter::new(engine.clone(), Arc::new(settings));
    (adapter, engine)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_streams_filter_by_level() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("output.log");
    let errors = temp_dir.path().join("errors.log");

    let (adapter, engine) = adapter(Settings::default());
    adapter
        .add_stream(path_str(&output), "info")
        .unwrap()
        .add_stream(path_str(&errors), "error")
        .unwrap();
    assert_eq!(engine.handlers_len(), 2);

    assert!(adapter.info("job started").unwrap());
    assert!(adapter.error("job failed").unwrap());
    assert!(!adapter.write("chatter", "debug").unwrap());

    let output = read(&output);
    let errors = read(&errors);
    assert!(output.contains("scheduler.INFO: job started [] []"), "output: {output}");
    assert!(output.contains("scheduler.ERROR: job failed [] []"), "output: {output}");
    assert!(!output.contains("chatter"));
    assert!(!errors.contains("job started"));
    assert!(errors.contains("scheduler.ERROR: job failed"), "errors: {errors}");
}

#[test]
fn test_non_bubbling_stream_keeps_records_to_itself() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("output.log");
    let errors = temp_dir.path().join("errors.log");

    let (adapter, _) = adapter(Settings::default());
    adapter.add_stream(path_str(&output), "debug").unwrap();
    adapter
        .add_stream_with_bubble(path_str(&errors), "error", false)
        .unwrap();

    adapter.write("disk full", "critical").unwrap();
    adapter.write("retrying", "notice").unwrap();

    let output = read(&output);
    let errors = read(&errors);
    assert!(errors.contains("scheduler.CRITICAL: disk full"), "errors: {errors}");
    assert!(!output.contains("disk full"), "output: {output}");
    assert!(output.contains("scheduler.NOTICE: retrying"), "output: {output}");
}

#[test]
fn test_configuration_shapes_the_line() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("output.log");

    let settings = Settings {
        log_allow_line_breaks: true,
        log_ignore_empty_context: true,
        ..Settings::default()
    };
    let (adapter, _) = adapter(settings);
    adapter.add_stream(path_str(&path), "info").unwrap();

    adapter.info("first line\nsecond line").unwrap();

    let contents = read(&path);
    assert!(
        contents.ends_with("scheduler.INFO: first line\nsecond line\n"),
        "contents: {contents:?}"
    );
}

#[test]
fn test_default_configuration_flattens_line_breaks() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("output.log");

    let (adapter, _) = adapter(Settings::default());
    adapter.add_stream(path_str(&path), "info").unwrap();

    adapter.info("first line\nsecond line").unwrap();

    let contents = read(&path);
    assert_eq!(contents.lines().count(), 1, "contents: {contents:?}");
    assert!(contents.contains("first line second line [] []"));
}

#[test]
fn test_no_streams_reports_unhandled() {
    let (adapter, engine) = adapter(Settings::default());
    assert_eq!(engine.handlers_len(), 0);
    assert!(!adapter.info("nobody listens").unwrap());
}

#[test]
fn test_unwritable_stream_fails_on_write_not_registration() {
    let temp_dir = TempDir::new().unwrap();
    let (adapter, _) = adapter(Settings::default());

    // Registration is lazy, the directory only fails once a record arrives
    adapter.add_stream(path_str(temp_dir.path()), "info").unwrap();

    let err = adapter.info("lost").unwrap_err();
    assert!(matches!(err, stream_logger::LoggerError::Engine(_)));
}
