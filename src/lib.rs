//! # Chain Logger Library
//!
//! A chainable, event-driven logging engine. A log statement is composed from
//! *modes* (conditional gates such as `verbose`) and *modifiers* (styles such
//! as `red` and named log methods such as `info`), accessed in a chain and
//! ended by a terminal call that emits a formatted, styled line.
//!
//! ## Architecture Overview
//!
//! The library is organized into several key modules:
//!
//! - `style`: ANSI style table and the stylizer
//! - `format`: printf-style formatting of JSON value arguments
//! - `stats`: descriptors and the per-chain stats record
//! - `registry`: the mode and modifier maps
//! - `chain`: chain context and the chain facade
//! - `events`: the synchronous event bus
//! - `logger`: the engine tying registry, events, options and output together
//! - `render`: the built-in `log` listener
//! - `app` / `plugin`: a minimal host object and the plugin attaching a logger
//!
//! ## Usage Example
//!
//! ```rust
//! use chain_logger::{args, logger_plugin, App, LoggerOptions, SharedBuffer};
//!
//! # fn main() -> chain_logger::Result<()> {
//! let buffer = SharedBuffer::new();
//! let mut app = App::with_sink("base", buffer.sink());
//! app.use_plugin(logger_plugin(LoggerOptions::default()))?;
//!
//! let logger = app.logger().expect("logger attached");
//! logger.verbose().get("red")?.log("hidden unless verbose")?;
//! logger.writeln(args!["%s %s %s", "before", logger.sep(), "after"])?;
//!
//! assert_eq!(buffer.contents(), "before \u{1b}[90m · \u{1b}[39m after\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Execution Model
//!
//! Everything is single-threaded and synchronous. A terminal call returns only
//! after every `log` listener has run and the line has been written.

pub mod app;
mod builtins;
pub mod chain;
pub mod cli;
pub mod error;
pub mod events;
pub mod format;
pub mod logger;
pub mod logging;
pub mod options;
pub mod plugin;
pub mod registry;
pub mod render;
pub mod sink;
pub mod stats;
pub mod style;

pub use app::{App, HostRef};
pub use builtins::local_time;
pub use chain::{Chain, ChainContext};
pub use error::{LoggerError, LookupKind, Result};
pub use events::{Event, EventKind};
pub use format::IntoArgs;
pub use logger::Logger;
pub use options::LoggerOptions;
pub use plugin::logger_plugin;
pub use sink::{SharedBuffer, Sink};
pub use stats::{Attribute, Descriptor, Kind, ModeEntry, Stats};

/// Re-exported so that [`args!`] works without a direct `serde_json` dependency
pub use serde_json::Value;

/// The current version of the chain logger
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build an argument list of mixed types
///
/// ```rust
/// let args = chain_logger::args!["%s=%d", "answer", 42];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::Value::from($arg)),*]
    };
}

/// Default names and glyphs
pub mod defaults {
    /// Modifier a chain terminates on when it does not end on one
    pub const DEFAULT_MODIFIER: &str = "log";

    /// The built-in mode gated by the `verbose` option
    pub const VERBOSE_MODE: &str = "verbose";

    /// Log methods every logger starts with, mirrored onto the host
    pub const LOGGERS: [&str; 9] = [
        "log",
        "subhead",
        "time",
        "timestamp",
        "inform",
        "info",
        "warn",
        "error",
        "success",
    ];

    /// Separator returned by `Logger::sep`
    pub const SEPARATOR: &str = " · ";

    pub const SEPARATOR_STYLE: &str = "gray";

    /// chrono format of the `time` and `timestamp` prefixes
    pub const TIME_FORMAT: &str = "%-I:%M:%S %p";

    /// Host id reported by a logger that is not attached to an app
    pub const STANDALONE_HOST: &str = "logger";
}
