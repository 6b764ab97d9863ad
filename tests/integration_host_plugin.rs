use chain_logger::{
    logger_plugin, App, Event, EventKind, Kind, Logger, LoggerError, LoggerOptions, SharedBuffer,
    Value,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

fn setup() -> (App, Rc<Logger>, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let mut app = App::with_sink("base", buffer.sink());
    app.use_plugin(logger_plugin(LoggerOptions::default())).unwrap();
    let logger = app.logger().unwrap();
    (app, logger, buffer)
}

#[test]
fn existing_host_method_is_not_overwritten() {
    let buffer = SharedBuffer::new();
    let mut app = App::with_sink("base", buffer.sink());
    app.define("error", |args| {
        Ok(Value::from(format!("error: {}", args[0].as_str().unwrap_or(""))))
    });
    assert_eq!(app.call("error", &[json!("bar")]).unwrap(), json!("error: bar"));

    app.use_plugin(logger_plugin(LoggerOptions::default())).unwrap();

    assert!(app.has_own("error"));
    assert_eq!(app.call("error", &[json!("bar")]).unwrap(), json!("error: bar"));
    assert_eq!(buffer.contents(), "");
    // the logger's own `error` still works
    app.logger().unwrap().error("logged").unwrap();
    assert_eq!(buffer.contents(), "\u{1b}[31mlogged\u{1b}[39m\n");
}

#[test]
fn adding_a_name_the_host_owns_fails() {
    let mut app = App::new("base");
    app.define("foo", |args| {
        Ok(Value::from(format!("foo{}", args[0].as_str().unwrap_or(""))))
    });
    assert_eq!(app.call("foo", &[json!("bar")]).unwrap(), json!("foobar"));
    app.use_plugin(logger_plugin(LoggerOptions::default())).unwrap();
    let logger = app.logger().unwrap();

    let err = logger.add_mode("foo").unwrap_err();
    assert!(matches!(err, LoggerError::NameCollision { .. }));
    assert_eq!(
        err.to_string(),
        "App \"base\" already has a method \"foo\". Unable to add logger method \"foo\"."
    );

    let err = logger.add_logger("foo").unwrap_err();
    assert_eq!(
        err.to_string(),
        "App \"base\" already has a method \"foo\". Unable to add logger method \"foo\"."
    );
    assert!(logger.registered_mode("foo").is_none());
}

#[test]
fn add_logger_and_mode_install_names() {
    let (_app, logger, _) = setup();

    assert!(logger.get("foo").is_err());
    logger.add_logger("foo").unwrap();
    assert!(logger.get("foo").is_ok());

    assert!(logger.get("bar").is_err());
    logger.add_mode("bar").unwrap();
    assert!(logger.get("bar").is_ok());
    assert!(logger.get("bar").unwrap().get("foo").is_ok());

    assert!(logger.modes().contains(&"bar".to_string()));
    assert!(logger.modifiers().contains(&"foo".to_string()));
}

#[test]
fn re_adding_a_name_overwrites_its_descriptor() {
    let (_app, logger, buffer) = setup();
    let first = logger.add_logger("foo").unwrap();
    let second = logger.add_logger_with("foo", |msg| msg.to_uppercase()).unwrap();
    assert!(!Rc::ptr_eq(&first, &second));
    logger.call("foo", "shout").unwrap();
    assert_eq!(buffer.contents(), "SHOUT\n");
}

#[test]
fn registration_events_carry_the_descriptor() {
    let (_app, logger, _) = setup();
    let received = Rc::new(RefCell::new(Vec::new()));

    let sink = received.clone();
    logger.on("addLogger".parse().unwrap(), move |event| {
        if let Event::AddLogger { name, descriptor } = event {
            sink.borrow_mut().push((name.to_string(), Rc::clone(descriptor)));
        }
        Ok(())
    });
    let sink = received.clone();
    logger.on(EventKind::AddMode, move |event| {
        if let Event::AddMode { name, descriptor } = event {
            sink.borrow_mut().push((name.to_string(), Rc::clone(descriptor)));
        }
        Ok(())
    });

    logger.add_logger("foo").unwrap();
    logger.add_mode("bar").unwrap();

    let received = received.borrow();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].0, "foo");
    assert!(Rc::ptr_eq(
        &received[0].1,
        &logger.registered_modifier("foo").unwrap()
    ));
    assert_eq!(received[1].0, "bar");
    assert_eq!(received[1].1.kind(), Kind::Mode);
    assert!(Rc::ptr_eq(&received[1].1, &logger.registered_mode("bar").unwrap()));
}

#[test]
fn failing_listener_propagates_to_caller() {
    let (_app, logger, _) = setup();
    logger.on(EventKind::AddMode, |_| {
        Err(LoggerError::Listener("rejected".to_string()))
    });
    let err = logger.add_mode("bar").unwrap_err();
    assert_eq!(err.to_string(), "rejected");
}

#[test]
fn transforms_passed_at_registration() {
    let (_app, logger, _) = setup();
    logger
        .add_logger_with("foo", |msg| format!("[LOG]: {}", msg))
        .unwrap();
    assert_eq!(
        logger.registered_modifier("foo").unwrap().apply("foo"),
        "[LOG]: foo"
    );

    logger
        .add_mode_with("baz", |msg| format!("[FOO]: {}", msg))
        .unwrap();
    assert_eq!(
        logger.registered_mode("baz").unwrap().apply("foo"),
        "[FOO]: foo"
    );
}

#[test]
fn reassigned_method_survives_and_ignores_gates() {
    let (_app, logger, buffer) = setup();
    logger.add_logger("foo").unwrap();

    let stderr = SharedBuffer::new();
    let out = stderr.sink();
    logger.set_method("foo", move |logger, args| {
        out.write_str(&format!("{}\n", logger.format(args)))?;
        Ok(())
    });

    logger
        .verbose()
        .call("foo", "foo")
        .unwrap()
        .not()
        .verbose()
        .get("foo")
        .unwrap()
        .invoke("bar")
        .unwrap();

    assert_eq!(stderr.contents(), "foo\nbar\n");
    assert_eq!(buffer.contents(), "");
    assert!(logger.registered_modifier("foo").is_some());
}

#[test]
fn unknown_logger_in_low_level_emit() {
    let (_app, logger, _) = setup();
    let err = logger.emit_logger("foo", "bar").unwrap_err();
    assert_eq!(err.to_string(), "Unable to find logger \"foo\"");
}

#[test]
fn host_passthrough_methods_log() {
    let (app, _logger, buffer) = setup();
    app.call("info", &[json!("info message")]).unwrap();
    assert_eq!(buffer.contents(), "\u{1b}[36minfo message\u{1b}[39m\n");
}

#[test]
fn passthrough_methods_collide_with_later_registration() {
    let (_app, logger, _) = setup();
    let err = logger.add_logger("info").unwrap_err();
    assert!(matches!(err, LoggerError::NameCollision { ref name, .. } if name == "info"));
}

#[test]
fn standalone_logger_reports_its_own_host_id() {
    let buffer = SharedBuffer::new();
    let logger = Logger::with_sink(LoggerOptions::default(), buffer.sink());
    assert_eq!(logger.host_id(), "logger");
    logger.add_logger("info").unwrap();
    logger.call("info", "identity now").unwrap();
    assert_eq!(buffer.contents(), "identity now\n");
}
