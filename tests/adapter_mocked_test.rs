use mockall::mock;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use stream_logger::{
    ConfigurationSource, EngineError, Handler, LEVELS, Level, LogAdapter, LoggerError,
    LoggingEngine,
};

mock! {
    pub Engine {}

    impl LoggingEngine for Engine {
        fn push_handler(&self, handler: Box<dyn Handler>);
        fn log(&self, level: Level, message: &str) -> Result<bool, EngineError>;
    }
}

fn settings_source() -> Arc<dyn ConfigurationSource> {
    let mut values: HashMap<String, Value> = HashMap::new();
    values.insert("log_allow_line_breaks".to_string(), json!(false));
    values.insert("log_ignore_empty_context".to_string(), json!(true));
    Arc::new(values)
}

#[test]
fn test_write_delegates_every_level() {
    for (name, level) in LEVELS {
        let mut engine = MockEngine::new();
        engine
            .expect_log()
            .withf(move |l, message| *l == level && message == "payload")
            .times(1)
            .returning(|_, _| Ok(true));

        let adapter = LogAdapter::new(Arc::new(engine), settings_source());
        assert!(adapter.write("payload", name).unwrap(), "level {name}");
    }
}

#[test]
fn test_critical_example() {
    let mut engine = MockEngine::new();
    engine
        .expect_log()
        .withf(|level, message| *level == Level::Critical && message == "disk full")
        .times(1)
        .returning(|level, _| Ok(level.code() == 500));

    let adapter = LogAdapter::new(Arc::new(engine), settings_source());
    assert!(adapter.write("disk full", "critical").unwrap());
}

#[test]
fn test_engine_indicator_is_passed_through() {
    let mut engine = MockEngine::new();
    engine.expect_log().times(1).returning(|_, _| Ok(false));

    let adapter = LogAdapter::new(Arc::new(engine), settings_source());
    assert!(!adapter.write("ignored", "debug").unwrap());
}

#[test]
fn test_engine_error_is_passed_through() {
    let mut engine = MockEngine::new();
    engine.expect_log().times(1).returning(|_, _| {
        Err(EngineError::Write {
            target: "/var/log/app.log".to_string(),
            source: std::io::Error::other("disk full"),
        })
    });

    let adapter = LogAdapter::new(Arc::new(engine), settings_source());
    let err = adapter.error("cannot write").unwrap_err();
    assert!(matches!(err, LoggerError::Engine(EngineError::Write { .. })));
    assert!(err.to_string().contains("/var/log/app.log"));
}

#[test]
fn test_info_and_error_shortcuts() {
    let mut engine = MockEngine::new();
    engine
        .expect_log()
        .withf(|level, message| *level == Level::Info && message == "job started")
        .times(1)
        .returning(|_, _| Ok(true));
    engine
        .expect_log()
        .withf(|level, message| *level == Level::Error && message == "job failed")
        .times(1)
        .returning(|_, _| Ok(true));

    let adapter = LogAdapter::new(Arc::new(engine), settings_source());
    assert!(adapter.info("job started").unwrap());
    assert!(adapter.error("job failed").unwrap());
}

#[test]
fn test_invalid_level_makes_no_engine_call() {
    let mut engine = MockEngine::new();
    engine.expect_log().never();
    engine.expect_push_handler().never();

    let adapter = LogAdapter::new(Arc::new(engine), settings_source());

    let err = adapter.write("x", "verbose").unwrap_err();
    assert!(matches!(err, LoggerError::InvalidLevel { .. }));
    assert_eq!(err.to_string(), "Invalid log level.");

    let err = adapter.add_stream("stderr", "Error").unwrap_err();
    assert!(matches!(err, LoggerError::InvalidLevel { .. }));
}

#[test]
fn test_add_stream_registers_one_handler_and_chains() {
    let mut engine = MockEngine::new();
    engine
        .expect_push_handler()
        .withf(|handler| {
            handler.bubble() && handler.is_handling(Level::Error) && !handler.is_handling(Level::Warning)
        })
        .times(1)
        .return_const(());
    engine
        .expect_push_handler()
        .withf(|handler| !handler.bubble() && handler.is_handling(Level::Debug))
        .times(1)
        .return_const(());

    let adapter = LogAdapter::new(Arc::new(engine), settings_source());

    let returned = adapter.add_stream("stderr", "error").unwrap();
    assert!(std::ptr::eq(returned, &adapter));

    let returned = adapter
        .add_stream_with_bubble("stdout", "debug", false)
        .unwrap();
    assert!(std::ptr::eq(returned, &adapter));
}
