use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Configuration consumed by the logger
///
/// The three recognized keys are typed fields; anything else lands in
/// `extra` so that user-defined modes can be gated on their own option.
/// Keys use camelCase on the wire (`stripColor`, `defaultListener`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerOptions {
    /// Gates the `verbose` mode: `true` opens it, `false` opens `not.verbose`,
    /// unset keeps both closed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    /// Strip ANSI escapes instead of styling
    pub strip_color: bool,

    /// Subscribe the built-in renderer to `log` events
    pub default_listener: bool,

    /// Set to `Some(false)` to skip attaching the logger to a host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger: Option<bool>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            verbose: None,
            strip_color: false,
            default_listener: true,
            logger: None,
            extra: BTreeMap::new(),
        }
    }
}

impl LoggerOptions {
    /// Read an option as a boolean flag
    ///
    /// Unknown keys and non-boolean values read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.gate(key).unwrap_or(false)
    }

    /// Read an option as a mode gate
    ///
    /// `None` when the option is unset or not a boolean.
    pub fn gate(&self, key: &str) -> Option<bool> {
        match key {
            "verbose" => self.verbose,
            "stripColor" => Some(self.strip_color),
            "defaultListener" => Some(self.default_listener),
            "logger" => self.logger,
            _ => self.extra.get(key).and_then(Value::as_bool),
        }
    }

    /// Set an option by key
    ///
    /// Recognized keys only accept booleans; a value of another type is
    /// kept in `extra` rather than coerced.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        match (key, value.as_bool()) {
            ("verbose", Some(b)) => self.verbose = Some(b),
            ("stripColor", Some(b)) => self.strip_color = b,
            ("defaultListener", Some(b)) => self.default_listener = b,
            ("logger", Some(b)) => self.logger = Some(b),
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    /// Load options from a JSON document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoggerOptions::default();
        assert_eq!(options.verbose, None);
        assert!(!options.strip_color);
        assert!(options.default_listener);
        assert_eq!(options.logger, None);
    }

    #[test]
    fn test_flag_and_set() {
        let mut options = LoggerOptions::default();
        options.set("verbose", true);
        options.set("debug", true);
        options.set("label", "x");

        assert!(options.flag("verbose"));
        assert!(options.flag("debug"));
        assert!(!options.flag("label"));
        assert!(!options.flag("missing"));
    }

    #[test]
    fn test_gate_is_tri_state() {
        let mut options = LoggerOptions::default();
        assert_eq!(options.gate("verbose"), None);
        assert_eq!(options.gate("debug"), None);

        options.set("verbose", false);
        options.set("label", "x");
        assert_eq!(options.gate("verbose"), Some(false));
        assert_eq!(options.gate("label"), None);
        assert!(!options.flag("verbose"));

        let options = LoggerOptions::from_json(r#"{"verbose": true}"#).unwrap();
        assert_eq!(options.gate("verbose"), Some(true));
    }

    #[test]
    fn test_from_json_camel_case() {
        let options =
            LoggerOptions::from_json(r#"{"stripColor": true, "defaultListener": false, "trace": true}"#)
                .unwrap();
        assert!(options.strip_color);
        assert!(!options.default_listener);
        assert_eq!(options.verbose, None);
        assert!(options.flag("trace"));
    }
}
