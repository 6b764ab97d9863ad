use crate::stats::{Descriptor, Kind};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Registered modes and modifiers
///
/// The two maps are independent: the same name may be both a mode and a
/// modifier. Re-inserting a name replaces its descriptor. Collision checks
/// against the host object live in the logger, which knows the host.
#[derive(Debug, Default)]
pub struct Registry {
    modes: BTreeMap<String, Rc<Descriptor>>,
    modifiers: BTreeMap<String, Rc<Descriptor>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor in the map matching its kind
    pub fn insert(&mut self, descriptor: Descriptor) -> Rc<Descriptor> {
        let descriptor = Rc::new(descriptor);
        let map = match descriptor.kind() {
            Kind::Mode => &mut self.modes,
            Kind::Style | Kind::Logger => &mut self.modifiers,
        };
        map.insert(descriptor.name().to_string(), descriptor.clone());
        descriptor
    }

    pub fn mode(&self, name: &str) -> Option<Rc<Descriptor>> {
        self.modes.get(name).cloned()
    }

    pub fn modifier(&self, name: &str) -> Option<Rc<Descriptor>> {
        self.modifiers.get(name).cloned()
    }

    /// Resolve a name for property access; modes shadow modifiers
    pub fn resolve(&self, name: &str) -> Option<Rc<Descriptor>> {
        self.mode(name).or_else(|| self.modifier(name))
    }

    pub fn mode_names(&self) -> Vec<String> {
        self.modes.keys().cloned().collect()
    }

    pub fn modifier_names(&self) -> Vec<String> {
        self.modifiers.keys().cloned().collect()
    }
}
