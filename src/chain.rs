//! # Chain Builder
//!
//! A log statement is built as a chain of name accesses ended by a terminal
//! call, e.g. `logger.verbose().get("red")?.log("msg")?`. Each access is
//! resolved through [`Chain::get`], a single dispatch function over the
//! registry, and recorded in an explicit [`ChainContext`]. The terminal call
//! seals the context into a [`Stats`] record, publishes it and hands back a
//! fresh chain so that independent statements can follow in one expression:
//!
//! ```rust
//! use chain_logger::{Logger, LoggerOptions, SharedBuffer};
//!
//! # fn main() -> chain_logger::Result<()> {
//! let buffer = SharedBuffer::new();
//! let logger = Logger::with_sink(LoggerOptions::default(), buffer.sink());
//! logger
//!     .info("info message")?
//!     .verbose()
//!     .error("error message")?
//!     .not()
//!     .verbose()
//!     .warn("warn message")?;
//! // `verbose` is unset, so both the plain and the negated gate stay closed
//! assert_eq!(buffer.contents(), "\u{1b}[36minfo message\u{1b}[39m\n");
//! # Ok(())
//! # }
//! ```

use crate::defaults;
use crate::error::{LoggerError, Result};
use crate::format::IntoArgs;
use crate::logger::Logger;
use crate::stats::{Descriptor, ModeEntry, Stats};
use serde_json::Value;
use std::rc::Rc;

/// Name of the pseudo-mode that negates the mode accessed right after it
pub const NOT: &str = "not";

/// Accumulated state of one chain in progress
#[derive(Debug, Default, Clone)]
pub struct ChainContext {
    modes: Vec<ModeEntry>,
    modifiers: Vec<Rc<Descriptor>>,
    pending_not: bool,
    ends_with_modifier: bool,
}

impl ChainContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negate the gate of the next mode, if a mode comes next
    pub fn negate_next(&mut self) {
        self.pending_not = true;
        self.ends_with_modifier = false;
    }

    pub fn push_mode(&mut self, descriptor: Rc<Descriptor>) {
        let negated = std::mem::take(&mut self.pending_not);
        self.modes.push(ModeEntry { descriptor, negated });
        self.ends_with_modifier = false;
    }

    pub fn push_modifier(&mut self, descriptor: Rc<Descriptor>) {
        self.pending_not = false;
        self.modifiers.push(descriptor);
        self.ends_with_modifier = true;
    }

    /// Modifier that a call right now would terminate on, if any
    pub fn terminal(&self) -> Option<&Rc<Descriptor>> {
        if self.ends_with_modifier {
            self.modifiers.last()
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty() && self.modifiers.is_empty() && !self.pending_not
    }

    /// Seal into a stats record named after the terminal modifier
    ///
    /// Returns `None` when the chain does not end on a modifier.
    pub fn seal(self, args: Vec<Value>) -> Option<Stats> {
        let name = self.terminal()?.name().to_string();
        Some(Stats {
            name,
            modes: self.modes,
            modifiers: self.modifiers,
            args,
        })
    }
}

/// Facade returned by every non-terminal access
pub struct Chain<'a> {
    logger: &'a Logger,
    context: ChainContext,
}

macro_rules! terminal_methods {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Terminate the chain on the `", stringify!($name), "` modifier")]
            pub fn $name(self, args: impl IntoArgs) -> Result<Self> {
                self.call(stringify!($name), args)
            }
        )*
    };
}

impl<'a> Chain<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        Self {
            logger,
            context: ChainContext::new(),
        }
    }

    pub fn context(&self) -> &ChainContext {
        &self.context
    }

    /// Access a mode or modifier by name
    pub fn get(mut self, name: &str) -> Result<Self> {
        if name == NOT {
            self.context.negate_next();
            return Ok(self);
        }
        let descriptor = self
            .logger
            .resolve(name)
            .ok_or_else(|| LoggerError::missing_logger(name))?;
        if descriptor.kind().is_modifier() {
            self.context.push_modifier(descriptor);
        } else {
            self.context.push_mode(descriptor);
        }
        Ok(self)
    }

    pub fn not(mut self) -> Self {
        self.context.negate_next();
        self
    }

    pub fn verbose(mut self) -> Self {
        if let Some(mode) = self.logger.registered_mode(defaults::VERBOSE_MODE) {
            self.context.push_mode(mode);
        }
        self
    }

    /// Terminate the chain
    ///
    /// Ends on the last accessed modifier; when the last access was a mode
    /// (or nothing at all) the default `log` modifier is appended first.
    pub fn invoke(self, args: impl IntoArgs) -> Result<Chain<'a>> {
        let Chain {
            logger,
            mut context,
        } = self;
        if context.terminal().is_none() {
            let default = logger
                .registered_modifier(defaults::DEFAULT_MODIFIER)
                .ok_or_else(|| LoggerError::missing_logger(defaults::DEFAULT_MODIFIER))?;
            context.push_modifier(default);
        }
        logger.dispatch(context, args.into_args())?;
        Ok(Chain::new(logger))
    }

    /// Access `name` and terminate on it in one step
    ///
    /// A method installed with [`Logger::set_method`] takes precedence and
    /// receives the arguments directly; the chain so far is discarded.
    pub fn call(self, name: &str, args: impl IntoArgs) -> Result<Chain<'a>> {
        let logger = self.logger;
        if logger.has_method(name) {
            logger.run_method(name, &args.into_args())?;
            return Ok(Chain::new(logger));
        }
        self.get(name)?.invoke(args)
    }

    terminal_methods!(log, subhead, time, timestamp, inform, info, warn, error, success);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Kind;

    fn mode(name: &str) -> Rc<Descriptor> {
        Rc::new(Descriptor::identity(name, Kind::Mode))
    }

    fn modifier(name: &str) -> Rc<Descriptor> {
        Rc::new(Descriptor::identity(name, Kind::Style))
    }

    #[test]
    fn test_not_negates_only_the_next_mode() {
        let mut context = ChainContext::new();
        context.negate_next();
        context.push_mode(mode("verbose"));
        context.push_mode(mode("debug"));
        context.push_modifier(modifier("log"));

        let stats = context.seal(Vec::new()).unwrap();
        let negated: Vec<bool> = stats.modes.iter().map(|m| m.negated).collect();
        assert_eq!(negated, vec![true, false]);
    }

    #[test]
    fn test_not_before_modifier_is_dropped() {
        let mut context = ChainContext::new();
        context.negate_next();
        context.push_modifier(modifier("red"));
        context.push_mode(mode("verbose"));
        assert!(!context.modes[0].negated);
    }

    #[test]
    fn test_terminal_tracks_last_access() {
        let mut context = ChainContext::new();
        assert!(context.is_empty());
        assert!(context.terminal().is_none());

        context.push_modifier(modifier("red"));
        assert_eq!(context.terminal().map(|d| d.name()), Some("red"));

        context.push_mode(mode("verbose"));
        assert!(context.terminal().is_none());
        assert!(context.clone().seal(Vec::new()).is_none());
    }
}
