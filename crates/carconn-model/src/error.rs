//! Error types for the vehicle data model

use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by attributes, enumerations and command containers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Raw string does not name any member of the enumeration
    #[error("unknown {kind}: {raw:?}")]
    UnknownVariant {
        /// Enumeration name (e.g. "charging state")
        kind: &'static str,
        /// The string that failed to parse
        raw: String,
    },

    /// Value lies outside the attribute's bounds
    #[error("value {value} for '{name}' out of range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Value is not a multiple of the attribute's precision
    #[error("value {value} for '{name}' is not a multiple of {step}")]
    InvalidStep {
        name: &'static str,
        value: f64,
        step: f64,
    },

    /// NaN or infinite value
    #[error("value for '{0}' is not a finite number")]
    NotFinite(&'static str),

    /// A command with the same name is already registered
    #[error("command already registered: {0}")]
    DuplicateCommand(String),
}
