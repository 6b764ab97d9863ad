//! Modes and modifiers every logger starts with

use crate::defaults;
use crate::logger::Logger;
use crate::stats::{Descriptor, Kind, Transform};
use crate::style::Stylizer;
use chrono::Local;
use std::rc::Rc;
use tracing::debug;

/// Styles applied by each default logger, innermost first
const LOGGER_STYLES: [(&str, &[&str]); 7] = [
    ("log", &["bold"]),
    ("subhead", &["bold"]),
    ("inform", &["gray"]),
    ("info", &["cyan"]),
    ("warn", &["yellow"]),
    ("error", &["red"]),
    ("success", &["green"]),
];

const TIME_STYLES: [&str; 2] = ["white", "bgBlack"];

pub(crate) fn register(logger: &Logger) {
    logger.register_builtin(Descriptor::identity(defaults::VERBOSE_MODE, Kind::Mode));

    let stylizer = logger.stylizer().clone();
    let style_names: Vec<String> = stylizer.table().names().map(str::to_string).collect();
    for name in &style_names {
        logger.register_builtin(Descriptor::new(name, Kind::Style, style(&stylizer, name)));
    }

    for (name, styles) in LOGGER_STYLES {
        let stylizer = stylizer.clone();
        let transform: Transform = Rc::new(move |msg: &str| stylizer.stylize_all(styles, msg));
        logger.register_builtin(Descriptor::new(name, Kind::Logger, transform));
    }

    let time = stylizer.clone();
    logger.register_builtin(Descriptor::new(
        "time",
        Kind::Logger,
        Rc::new(move |_msg: &str| format!("{} ", styled_time(&time))),
    ));

    let timestamp = stylizer;
    logger.register_builtin(Descriptor::new(
        "timestamp",
        Kind::Logger,
        Rc::new(move |msg: &str| {
            format!(
                "{} {}",
                styled_time(&timestamp),
                timestamp.stylize("gray", msg)
            )
        }),
    ));

    debug!(
        styles = style_names.len(),
        loggers = defaults::LOGGERS.len(),
        "registered built-in logger methods"
    );
}

fn style(stylizer: &Stylizer, name: &str) -> Transform {
    let stylizer = stylizer.clone();
    let name = name.to_string();
    Rc::new(move |text: &str| stylizer.stylize(&name, text))
}

/// Current local time in the `3:04:05 PM` form
pub fn local_time() -> String {
    Local::now().format(defaults::TIME_FORMAT).to_string()
}

fn styled_time(stylizer: &Stylizer) -> String {
    stylizer.stylize_all(&TIME_STYLES, &local_time())
}
