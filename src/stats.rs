//! # Descriptors and Stats Records
//!
//! A [`Descriptor`] is what the registry stores for every mode and modifier:
//! a name, a kind, and a text transform. A [`Stats`] record is built by one
//! log chain; it captures the descriptors traversed, in order, together with
//! the arguments of the terminal call. Listeners receive the sealed record
//! through the `log` event.

use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Text transform carried by a descriptor
pub type Transform = Rc<dyn Fn(&str) -> String>;

/// What a registered name stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A conditional gate such as `verbose`
    Mode,
    /// A modifier that only styles its input
    Style,
    /// A modifier that is also a named log method (`info`, `warn`, ...)
    Logger,
}

impl Kind {
    pub fn is_modifier(self) -> bool {
        !matches!(self, Kind::Mode)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Mode => "mode",
            Kind::Style => "style",
            Kind::Logger => "logger",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered mode or modifier
pub struct Descriptor {
    name: String,
    kind: Kind,
    transform: Transform,
}

impl Descriptor {
    pub fn new(name: &str, kind: Kind, transform: Transform) -> Self {
        Self {
            name: name.to_string(),
            kind,
            transform,
        }
    }

    /// A descriptor whose transform returns its input unchanged
    pub fn identity(name: &str, kind: Kind) -> Self {
        Self::new(name, kind, Rc::new(|input: &str| input.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Run the transform
    pub fn apply(&self, input: &str) -> String {
        (self.transform)(input)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A mode traversed by a chain, possibly negated by a preceding `not`
#[derive(Debug, Clone)]
pub struct ModeEntry {
    pub descriptor: Rc<Descriptor>,
    pub negated: bool,
}

impl ModeEntry {
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }
}

/// Descriptor attribute selected by the `get_*` queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Name,
    Type,
}

/// Sealed record of one log chain
#[derive(Debug, Clone)]
pub struct Stats {
    /// Name of the terminal modifier
    pub name: String,
    pub modes: Vec<ModeEntry>,
    pub modifiers: Vec<Rc<Descriptor>>,
    /// Raw arguments of the terminal call
    pub args: Vec<Value>,
}

fn attribute(descriptor: &Descriptor, attr: Attribute) -> String {
    match attr {
        Attribute::Name => descriptor.name().to_string(),
        Attribute::Type => descriptor.kind().to_string(),
    }
}

impl Stats {
    /// Attribute of every traversed mode, in chain order
    pub fn get_modes(&self, attr: Attribute) -> Vec<String> {
        self.modes
            .iter()
            .map(|entry| attribute(&entry.descriptor, attr))
            .collect()
    }

    /// Attribute of every traversed modifier, in chain order
    pub fn get_modifiers(&self, attr: Attribute) -> Vec<String> {
        self.modifiers
            .iter()
            .map(|descriptor| attribute(descriptor, attr))
            .collect()
    }

    pub fn styles(&self) -> impl Iterator<Item = &Rc<Descriptor>> {
        self.modifiers.iter().filter(|d| d.kind() == Kind::Style)
    }

    pub fn loggers(&self) -> impl Iterator<Item = &Rc<Descriptor>> {
        self.modifiers.iter().filter(|d| d.kind() == Kind::Logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_queries_preserve_order() {
        let stats = Stats {
            name: "log".to_string(),
            modes: vec![ModeEntry {
                descriptor: Rc::new(Descriptor::identity("verbose", Kind::Mode)),
                negated: true,
            }],
            modifiers: vec![
                Rc::new(Descriptor::identity("red", Kind::Style)),
                Rc::new(Descriptor::identity("log", Kind::Logger)),
            ],
            args: vec![json!("foo")],
        };

        assert_eq!(stats.get_modes(Attribute::Name), vec!["verbose"]);
        assert_eq!(stats.get_modifiers(Attribute::Name), vec!["red", "log"]);
        assert_eq!(stats.get_modifiers(Attribute::Type), vec!["style", "logger"]);
        assert_eq!(stats.styles().count(), 1);
        assert_eq!(stats.loggers().next().map(|d| d.name()), Some("log"));
    }

    #[test]
    fn test_custom_transform() {
        let descriptor = Descriptor::new(
            "foo",
            Kind::Logger,
            Rc::new(|msg: &str| format!("[LOG]: {}", msg)),
        );
        assert_eq!(descriptor.apply("foo"), "[LOG]: foo");
        assert!(descriptor.kind().is_modifier());
        assert!(!Kind::Mode.is_modifier());
    }
}
