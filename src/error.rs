//! Errors raised while loading and validating configuration.
//!
//! The physics routines themselves never fail; they substitute sentinel values
//! for degenerate geometry. Everything that can go wrong happens before a body
//! or an engine reaches them.

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// The scenario file could not be read.
    Io(std::io::Error),

    /// The scenario file is not valid YAML, or does not match the expected shape.
    Parse(serde_yaml::Error),

    /// An engine constant is outside the range the physics can work with.
    InvalidConstant {
        name: &'static str,
        value: f64,
        safe_range: &'static str,
    },

    /// A body record would break an invariant the physics relies on.
    InvalidBody { name: String, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "could not read scenario: {}", err),
            ConfigError::Parse(err) => write!(f, "could not parse scenario: {}", err),
            ConfigError::InvalidConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            ConfigError::InvalidBody { name, reason } => {
                write!(f, "body '{}' is invalid: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err)
    }
}
