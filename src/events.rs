//! # Event Bus
//!
//! A small synchronous observer registry keyed by [`EventKind`]. Listeners run
//! in subscription order on the emitting thread. There is no isolation: the
//! first listener to fail stops the dispatch and its error is returned to
//! whoever emitted.
//!
//! The listener list is snapshotted before dispatch, so a listener may
//! subscribe further listeners or start a new log chain while an emit is in
//! progress. Listeners added that way only see later events.

use crate::error::{LoggerError, LookupKind, Result};
use crate::stats::{Descriptor, Stats};
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use tracing::trace;

/// Lifecycle events published by the logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A mode was registered
    AddMode,
    /// A modifier was registered
    AddLogger,
    /// A log chain was sealed
    Log,
}

impl FromStr for EventKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mode" | "addMode" => Ok(EventKind::AddMode),
            "emitter" | "addLogger" => Ok(EventKind::AddLogger),
            "log" => Ok(EventKind::Log),
            other => Err(LoggerError::Lookup {
                kind: LookupKind::Emitter,
                name: other.to_string(),
            }),
        }
    }
}

/// Event payload handed to listeners
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    AddMode {
        name: &'a str,
        descriptor: &'a Rc<Descriptor>,
    },
    AddLogger {
        name: &'a str,
        descriptor: &'a Rc<Descriptor>,
    },
    Log(&'a Stats),
}

impl Event<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::AddMode { .. } => EventKind::AddMode,
            Event::AddLogger { .. } => EventKind::AddLogger,
            Event::Log(_) => EventKind::Log,
        }
    }
}

pub type Listener = Rc<dyn Fn(&Event<'_>) -> Result<()>>;

#[derive(Default)]
pub struct Emitter {
    listeners: RefCell<Vec<(EventKind, Listener)>>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, kind: EventKind, listener: impl Fn(&Event<'_>) -> Result<()> + 'static) {
        let listener: Listener = Rc::new(listener);
        self.listeners.borrow_mut().push((kind, listener));
    }

    pub fn emit(&self, event: &Event<'_>) -> Result<()> {
        let kind = event.kind();
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, listener)| listener.clone())
            .collect();

        trace!(?kind, listeners = listeners.len(), "dispatching logger event");
        for listener in listeners {
            listener(event)?;
        }
        Ok(())
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
