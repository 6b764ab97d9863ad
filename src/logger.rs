//! # Logger
//!
//! The [`Logger`] owns the registry of modes and modifiers, the event bus, the
//! shared options, the stylizer and the output sink. Chains borrow it; every
//! terminal call comes back here through [`Logger::dispatch`], which seals the
//! chain and publishes a `log` event. Rendering is done by whoever listens;
//! unless disabled, that includes the built-in renderer.
//!
//! All state sits behind `RefCell`s that are only borrowed for the duration
//! of a lookup or an insert, never across a listener call. Listeners may
//! therefore register names or start new chains while an event is being
//! dispatched.

use crate::app::HostRef;
use crate::builtins;
use crate::chain::{Chain, ChainContext};
use crate::defaults;
use crate::error::{LoggerError, Result};
use crate::events::{Emitter, Event, EventKind};
use crate::format::{self, IntoArgs};
use crate::options::LoggerOptions;
use crate::registry::Registry;
use crate::render::Renderer;
use crate::sink::Sink;
use crate::stats::{Descriptor, Kind};
use crate::style::{StyleTable, Stylizer};
use serde_json::Value;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// User-supplied replacement for an installed log method
pub type Method = Rc<dyn Fn(&Logger, &[Value]) -> Result<()>>;

pub struct Logger {
    host: HostRef,
    registry: RefCell<Registry>,
    emitter: Emitter,
    options: Rc<RefCell<LoggerOptions>>,
    stylizer: Stylizer,
    sink: Sink,
    methods: RefCell<HashMap<String, Method>>,
}

macro_rules! terminal_methods {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Log through the `", stringify!($name), "` modifier")]
            pub fn $name(&self, args: impl IntoArgs) -> Result<Chain<'_>> {
                self.chain().call(stringify!($name), args)
            }
        )*
    };
}

impl Logger {
    /// Standalone logger writing to stdout
    pub fn new(options: LoggerOptions) -> Self {
        Self::with_sink(options, Sink::stdout())
    }

    pub fn with_sink(options: LoggerOptions, sink: Sink) -> Self {
        Self::for_host(HostRef::detached(defaults::STANDALONE_HOST), options, sink)
    }

    /// Logger bound to a host object, used for collision checks
    pub fn for_host(host: HostRef, options: LoggerOptions, sink: Sink) -> Self {
        let default_listener = options.default_listener;
        let options = Rc::new(RefCell::new(options));
        let stylizer = Stylizer::new(StyleTable::ansi(), options.clone());

        let logger = Self {
            host,
            registry: RefCell::new(Registry::new()),
            emitter: Emitter::new(),
            options,
            stylizer,
            sink,
            methods: RefCell::new(HashMap::new()),
        };
        builtins::register(&logger);

        if default_listener {
            let renderer = Renderer::new(logger.options.clone(), logger.sink.clone());
            logger.emitter.on(EventKind::Log, move |event| renderer.handle(event));
        }
        logger
    }

    pub fn host_id(&self) -> &str {
        self.host.id()
    }

    // Registration

    /// Register a mode with an identity transform
    pub fn add_mode(&self, name: &str) -> Result<Rc<Descriptor>> {
        self.add(Descriptor::identity(name, Kind::Mode))
    }

    pub fn add_mode_with(
        &self,
        name: &str,
        transform: impl Fn(&str) -> String + 'static,
    ) -> Result<Rc<Descriptor>> {
        self.add(Descriptor::new(name, Kind::Mode, Rc::new(transform)))
    }

    /// Register a logger modifier with an identity transform
    pub fn add_logger(&self, name: &str) -> Result<Rc<Descriptor>> {
        self.add(Descriptor::identity(name, Kind::Logger))
    }

    pub fn add_logger_with(
        &self,
        name: &str,
        transform: impl Fn(&str) -> String + 'static,
    ) -> Result<Rc<Descriptor>> {
        self.add(Descriptor::new(name, Kind::Logger, Rc::new(transform)))
    }

    fn add(&self, descriptor: Descriptor) -> Result<Rc<Descriptor>> {
        if self.host.has_own(descriptor.name()) {
            return Err(LoggerError::NameCollision {
                host: self.host.id().to_string(),
                name: descriptor.name().to_string(),
            });
        }
        self.register(descriptor)
    }

    /// Insert a built-in name; nothing can be listening yet, so no event
    pub(crate) fn register_builtin(&self, descriptor: Descriptor) -> Rc<Descriptor> {
        self.registry.borrow_mut().insert(descriptor)
    }

    fn register(&self, descriptor: Descriptor) -> Result<Rc<Descriptor>> {
        let descriptor = self.registry.borrow_mut().insert(descriptor);
        let name = descriptor.name();
        debug!(method = name, kind = %descriptor.kind(), host = self.host.id(), "registered logger method");

        let event = if descriptor.kind().is_modifier() {
            Event::AddLogger {
                name,
                descriptor: &descriptor,
            }
        } else {
            Event::AddMode {
                name,
                descriptor: &descriptor,
            }
        };
        self.emitter.emit(&event)?;
        Ok(descriptor)
    }

    pub fn registered_mode(&self, name: &str) -> Option<Rc<Descriptor>> {
        self.registry.borrow().mode(name)
    }

    pub fn registered_modifier(&self, name: &str) -> Option<Rc<Descriptor>> {
        self.registry.borrow().modifier(name)
    }

    pub fn resolve(&self, name: &str) -> Option<Rc<Descriptor>> {
        self.registry.borrow().resolve(name)
    }

    pub fn modes(&self) -> Vec<String> {
        self.registry.borrow().mode_names()
    }

    pub fn modifiers(&self) -> Vec<String> {
        self.registry.borrow().modifier_names()
    }

    // Method overrides

    /// Replace what calling `name` does
    ///
    /// The registered descriptor is left in place; the override wins at every
    /// later terminal call on `name` and receives the raw arguments.
    pub fn set_method(&self, name: &str, method: impl Fn(&Logger, &[Value]) -> Result<()> + 'static) {
        self.methods
            .borrow_mut()
            .insert(name.to_string(), Rc::new(method));
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.borrow().contains_key(name)
    }

    pub(crate) fn run_method(&self, name: &str, args: &[Value]) -> Result<()> {
        let method = self.methods.borrow().get(name).cloned();
        match method {
            Some(method) => method(self, args),
            None => Err(LoggerError::missing_logger(name)),
        }
    }

    // Events

    pub fn on(&self, kind: EventKind, listener: impl Fn(&Event<'_>) -> Result<()> + 'static) {
        self.emitter.on(kind, listener);
    }

    pub fn emit(&self, event: &Event<'_>) -> Result<()> {
        self.emitter.emit(event)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.emitter.listener_count(kind)
    }

    /// Seal a finished chain and publish it
    pub fn dispatch(&self, context: ChainContext, args: Vec<Value>) -> Result<()> {
        let terminal = context.terminal().map(|d| d.name().to_string());
        let Some(name) = terminal else {
            return Err(LoggerError::missing_logger(defaults::DEFAULT_MODIFIER));
        };
        if self.has_method(&name) {
            return self.run_method(&name, &args);
        }
        if let Some(stats) = context.seal(args) {
            self.emitter.emit(&Event::Log(&stats))?;
        }
        Ok(())
    }

    /// Emit a log record for a single registered modifier
    ///
    /// Fails with a lookup error when `name` is not a registered modifier.
    pub fn emit_logger(&self, name: &str, args: impl IntoArgs) -> Result<()> {
        let descriptor = self
            .registered_modifier(name)
            .ok_or_else(|| LoggerError::missing_logger(name))?;
        let mut context = ChainContext::new();
        context.push_modifier(descriptor);
        self.dispatch(context, args.into_args())
    }

    // Chains

    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    pub fn get(&self, name: &str) -> Result<Chain<'_>> {
        self.chain().get(name)
    }

    pub fn not(&self) -> Chain<'_> {
        self.chain().not()
    }

    pub fn verbose(&self) -> Chain<'_> {
        self.chain().verbose()
    }

    /// Call the logger itself, which logs through the default modifier
    pub fn invoke(&self, args: impl IntoArgs) -> Result<Chain<'_>> {
        self.chain().invoke(args)
    }

    pub fn call(&self, name: &str, args: impl IntoArgs) -> Result<Chain<'_>> {
        self.chain().call(name, args)
    }

    terminal_methods!(log, subhead, time, timestamp, inform, info, warn, error, success);

    // Output helpers

    pub fn format(&self, args: impl IntoArgs) -> String {
        format::format(&args.into_args())
    }

    pub fn write(&self, args: impl IntoArgs) -> Result<()> {
        self.sink.write_str(&self.format(args))?;
        Ok(())
    }

    pub fn writeln(&self, args: impl IntoArgs) -> Result<()> {
        let mut line = self.format(args);
        line.push('\n');
        self.sink.write_str(&line)?;
        Ok(())
    }

    pub fn stylize(&self, style: &str, text: &str) -> String {
        self.stylizer.stylize(style, text)
    }

    pub fn stylizer(&self) -> &Stylizer {
        &self.stylizer
    }

    /// The default separator, ` · ` in gray
    pub fn sep(&self) -> String {
        self.sep_with(defaults::SEPARATOR)
    }

    pub fn sep_with(&self, glyph: &str) -> String {
        self.stylize(defaults::SEPARATOR_STYLE, glyph)
    }

    // Options

    pub fn options(&self) -> Ref<'_, LoggerOptions> {
        self.options.borrow()
    }

    pub fn options_mut(&self) -> RefMut<'_, LoggerOptions> {
        self.options.borrow_mut()
    }

    pub fn set_option(&self, key: &str, value: impl Into<Value>) {
        self.options.borrow_mut().set(key, value);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("host", &self.host.id())
            .field("registry", &self.registry.borrow())
            .field("options", &self.options.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SharedBuffer;
    use crate::stats::Attribute;
    use std::cell::Cell;

    fn logger() -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        (Logger::with_sink(LoggerOptions::default(), buffer.sink()), buffer)
    }

    #[test]
    fn test_builtins_registered() {
        let (logger, _) = logger();
        assert_eq!(logger.modes(), vec!["verbose"]);
        for name in defaults::LOGGERS {
            assert_eq!(
                logger.registered_modifier(name).map(|d| d.kind()),
                Some(Kind::Logger),
                "{} should be a logger",
                name
            );
        }
        assert_eq!(logger.registered_modifier("red").map(|d| d.kind()), Some(Kind::Style));
        assert!(logger.registered_modifier("foo").is_none());
    }

    #[test]
    fn test_emit_logger_unknown_name() {
        let (logger, _) = logger();
        let err = logger.emit_logger("foo", "bar").unwrap_err();
        assert_eq!(err.to_string(), "Unable to find logger \"foo\"");
    }

    #[test]
    fn test_emit_logger_publishes_record() {
        let (logger, buffer) = logger();
        logger.emit_logger("warn", "careful").unwrap();
        assert_eq!(buffer.contents(), "\u{1b}[33mcareful\u{1b}[39m\n");
    }

    #[test]
    fn test_unknown_chain_access_fails() {
        let (logger, _) = logger();
        let err = logger.get("nope").err().unwrap();
        assert_eq!(err.to_string(), "Unable to find logger \"nope\"");
    }

    #[test]
    fn test_mode_called_directly_appends_default_modifier() {
        let (logger, _) = logger();
        logger.add_mode("foo").unwrap();
        let seen = Rc::new(Cell::new(false));
        let flag = seen.clone();
        logger.on(EventKind::Log, move |event| {
            if let Event::Log(stats) = event {
                assert_eq!(stats.get_modes(Attribute::Name), vec!["foo"]);
                assert_eq!(stats.get_modifiers(Attribute::Name), vec!["log"]);
                assert_eq!(stats.name, "log");
                flag.set(true);
            }
            Ok(())
        });
        logger.call("foo", "foo").unwrap();
        assert!(seen.get());
    }

    #[test]
    fn test_write_helpers() {
        let (logger, buffer) = logger();
        logger.write("").unwrap();
        assert_eq!(buffer.take(), "");
        logger.writeln("").unwrap();
        assert_eq!(buffer.take(), "\n");
        logger.write(["%s!", "foo"]).unwrap();
        assert_eq!(buffer.take(), "foo!");
    }

    #[test]
    fn test_sep() {
        let (logger, _) = logger();
        assert_eq!(logger.sep(), "\u{1b}[90m · \u{1b}[39m");
        assert_eq!(logger.sep_with(" - "), "\u{1b}[90m - \u{1b}[39m");
    }
}
