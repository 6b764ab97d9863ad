use crate::app::App;
use crate::defaults;
use crate::error::{LoggerError, Result};
use crate::logger::Logger;
use crate::options::LoggerOptions;
use serde_json::Value;
use std::rc::Rc;
use tracing::debug;

/// Plugin that attaches a [`Logger`] to an [`App`]
///
/// Attaching is a no-op when the host already has a logger or when
/// `options.logger` is `Some(false)`. Each default logger method is also
/// mirrored onto the host (`app.call("info", ..)`) unless the host already
/// owns a method of that name.
pub fn logger_plugin(options: LoggerOptions) -> impl FnOnce(&mut App) -> Result<()> {
    move |app: &mut App| {
        if app.logger().is_some() {
            debug!(host = app.id(), "logger already attached");
            return Ok(());
        }
        if options.logger == Some(false) {
            debug!(host = app.id(), "logger disabled by options");
            return Ok(());
        }

        let logger = Rc::new(Logger::for_host(app.host_ref(), options, app.sink()));
        for name in defaults::LOGGERS {
            if app.has_own(name) {
                debug!(host = app.id(), method = name, "host method kept, not mirrored");
                continue;
            }
            let weak = Rc::downgrade(&logger);
            app.define(name, move |args| {
                let logger = weak
                    .upgrade()
                    .ok_or_else(|| LoggerError::missing_logger(name))?;
                logger.call(name, args)?;
                Ok(Value::Null)
            });
        }

        app.attach_logger(logger);
        Ok(())
    }
}
