//! # Host Application
//!
//! A minimal host object for the logger to attach to. It follows the usual
//! plugin convention: `use_plugin` hands the host to a plugin function which
//! installs whatever it needs. The host keeps a map of its own methods; the
//! logger consults that map through a [`HostRef`] so that registering a mode
//! or modifier never shadows a method the host already has.

use crate::error::{LoggerError, LookupKind, Result};
use crate::logger::Logger;
use crate::sink::Sink;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A method defined directly on the host
pub type HostMethod = Rc<dyn Fn(&[Value]) -> Result<Value>>;

type Members = Rc<RefCell<BTreeMap<String, HostMethod>>>;

/// Read-only view of a host's identity and own members
#[derive(Clone)]
pub struct HostRef {
    id: String,
    members: Option<Members>,
}

impl HostRef {
    /// A host with no members, for loggers used on their own
    pub fn detached(id: &str) -> Self {
        Self {
            id: id.to_string(),
            members: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn has_own(&self, name: &str) -> bool {
        self.members
            .as_ref()
            .map_or(false, |members| members.borrow().contains_key(name))
    }
}

pub struct App {
    id: String,
    members: Members,
    logger: Option<Rc<Logger>>,
    sink: Sink,
}

impl App {
    pub fn new(id: &str) -> Self {
        Self::with_sink(id, Sink::stdout())
    }

    /// Host whose plugins write to `sink`
    pub fn with_sink(id: &str, sink: Sink) -> Self {
        Self {
            id: id.to_string(),
            members: Rc::new(RefCell::new(BTreeMap::new())),
            logger: None,
            sink,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sink(&self) -> Sink {
        self.sink.clone()
    }

    pub fn host_ref(&self) -> HostRef {
        HostRef {
            id: self.id.clone(),
            members: Some(self.members.clone()),
        }
    }

    /// Define (or replace) an own method
    pub fn define(&mut self, name: &str, method: impl Fn(&[Value]) -> Result<Value> + 'static) {
        self.members
            .borrow_mut()
            .insert(name.to_string(), Rc::new(method));
    }

    pub fn has_own(&self, name: &str) -> bool {
        self.members.borrow().contains_key(name)
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let method = self.members.borrow().get(name).cloned();
        match method {
            Some(method) => method(args),
            None => Err(LoggerError::Lookup {
                kind: LookupKind::Method,
                name: name.to_string(),
            }),
        }
    }

    pub fn use_plugin(&mut self, plugin: impl FnOnce(&mut App) -> Result<()>) -> Result<&mut Self> {
        plugin(self)?;
        Ok(self)
    }

    pub fn logger(&self) -> Option<Rc<Logger>> {
        self.logger.clone()
    }

    pub(crate) fn attach_logger(&mut self, logger: Rc<Logger>) {
        self.logger = Some(logger);
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("id", &self.id)
            .field("members", &self.members.borrow().keys().collect::<Vec<_>>())
            .field("logger", &self.logger.is_some())
            .finish()
    }
}
