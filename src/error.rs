//! # Logger Error Types
//!
//! Every fallible operation in the library returns [`LoggerError`]. Errors are
//! raised synchronously and handed straight back to the caller; nothing in the
//! engine retries or swallows them.

use thiserror::Error;

/// Errors raised by the registry, the dispatcher and the output sink
#[derive(Debug, Error)]
pub enum LoggerError {
    /// A mode or modifier name is already an own member of the host object
    #[error("App \"{host}\" already has a method \"{name}\". Unable to add logger method \"{name}\".")]
    NameCollision { host: String, name: String },

    /// A name could not be resolved to a registered logger, emitter or method
    #[error("Unable to find {kind} \"{name}\"")]
    Lookup { kind: LookupKind, name: String },

    /// The output sink rejected a write
    #[error("failed to write log output: {0}")]
    Io(#[from] std::io::Error),

    /// A listener or host method reported a failure of its own
    #[error("{0}")]
    Listener(String),
}

/// What kind of member a failed lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Logger,
    Emitter,
    Method,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupKind::Logger => write!(f, "logger"),
            LookupKind::Emitter => write!(f, "emitter"),
            LookupKind::Method => write!(f, "method"),
        }
    }
}

impl LoggerError {
    /// Shorthand for a failed logger lookup
    pub fn missing_logger(name: &str) -> Self {
        LoggerError::Lookup {
            kind: LookupKind::Logger,
            name: name.to_string(),
        }
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, LoggerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_collision_message() {
        let err = LoggerError::NameCollision {
            host: "base".to_string(),
            name: "foo".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "App \"base\" already has a method \"foo\". Unable to add logger method \"foo\"."
        );
    }

    #[test]
    fn test_lookup_messages() {
        assert_eq!(
            LoggerError::missing_logger("foo").to_string(),
            "Unable to find logger \"foo\""
        );
        let err = LoggerError::Lookup {
            kind: LookupKind::Emitter,
            name: "bar".to_string(),
        };
        assert_eq!(err.to_string(), "Unable to find emitter \"bar\"");
    }
}
