use crate::error::Result;
use crate::events::Event;
use crate::format;
use crate::options::LoggerOptions;
use crate::sink::Sink;
use crate::stats::Stats;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

/// The built-in `log` listener
///
/// Checks the record's mode gates against the current options, runs the
/// transforms and writes one line to the sink.
pub struct Renderer {
    options: Rc<RefCell<LoggerOptions>>,
    sink: Sink,
}

impl Renderer {
    pub fn new(options: Rc<RefCell<LoggerOptions>>, sink: Sink) -> Self {
        Self { options, sink }
    }

    pub fn handle(&self, event: &Event<'_>) -> Result<()> {
        let Event::Log(stats) = event else {
            return Ok(());
        };
        match self.render(stats) {
            Some(line) => {
                self.sink.write_str(&line)?;
                Ok(())
            }
            None => {
                trace!(name = %stats.name, "log record gated off");
                Ok(())
            }
        }
    }

    /// The line a record renders to, or `None` when a gate is closed
    pub fn render(&self, stats: &Stats) -> Option<String> {
        if !gates_pass(stats, &self.options.borrow()) {
            return None;
        }
        let mut message = format::format(&stats.args);
        for mode in &stats.modes {
            message = mode.descriptor.apply(&message);
        }
        for modifier in &stats.modifiers {
            message = modifier.apply(&message);
        }
        message.push('\n');
        Some(message)
    }
}

/// Every mode's gate must be open
///
/// A mode is open when its option is `true`, a negated mode when its option
/// is `false`. An unset option closes both. A record without modes always
/// passes.
pub fn gates_pass(stats: &Stats, options: &LoggerOptions) -> bool {
    stats
        .modes
        .iter()
        .all(|mode| options.gate(mode.name()) == Some(!mode.negated))
}
