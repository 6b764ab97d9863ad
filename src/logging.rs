//! Diagnostic output for the logger's own internals
//!
//! The engine reports registrations and dispatches through `tracing`. This
//! module provides the event formatter and subscriber setup used by the
//! binary; library users are free to install their own subscriber instead.

use colored::*;
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Formats each diagnostic as `level: fields`, colored by level
///
/// The level tag is dimmed so that diagnostics on stderr are easy to tell
/// apart from the styled log lines the engine writes to stdout.
pub struct DiagnosticFormatter;

impl<S, N> FormatEvent<S, N> for DiagnosticFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut buffer = String::new();
        let mut buf_writer = Writer::new(&mut buffer);
        ctx.format_fields(buf_writer.by_ref(), event)?;

        let level = *event.metadata().level();
        let body = match level {
            Level::ERROR => buffer.red(),
            Level::WARN => buffer.yellow(),
            Level::INFO => buffer.white(),
            Level::DEBUG => buffer.blue(),
            Level::TRACE => buffer.purple(),
        };
        let tag = level.as_str().to_lowercase();

        writeln!(writer, "{}: {}", tag.dimmed(), body)
    }
}

/// Install the diagnostic subscriber on stderr
///
/// `RUST_LOG` takes precedence; otherwise `default_directive` applies
/// (e.g. `"warn"`, or `"chain_logger=debug"` when tracing is requested).
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(DiagnosticFormatter)
        .init();
}
