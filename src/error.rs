//! Error types for Kitbash
//!
//! Uses `thiserror` for library errors. A guard or wrapper refusing to
//! delegate is not an error: see [`crate::domain::outcome::Outcome`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Kitbash operations
pub type KitResult<T> = Result<T, KitError>;

/// Main error type for Kitbash operations
#[derive(Error, Debug)]
pub enum KitError {
    /// Unknown registry name, node, factory key or child
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// Strict registration of a name that is already taken
    #[error("template '{name}' is already registered")]
    DuplicateName { name: String },

    /// Override key that does not exist on the cloned template
    #[error("template '{template}' has no field '{field}'")]
    UnknownField { template: String, field: String },

    /// Override value that does not fit the field it replaces
    #[error("invalid override for '{field}' on template '{template}': {message}")]
    InvalidOverride {
        template: String,
        field: String,
        message: String,
    },

    /// Template whose serialized form does not read back to the same value
    #[error("template '{template}' cannot take overrides: {message}")]
    LossyTemplate { template: String, message: String },

    /// Adding the child would make a node its own descendant
    #[error("adding '{child}' under '{parent}' would create a cycle")]
    Cycle { parent: String, child: String },

    /// Children can only be attached to composite nodes
    #[error("'{label}' is a leaf and cannot hold children")]
    NotComposite { label: String },

    /// A build step was missing or failed
    #[error("construction aborted at step '{step}': {reason}")]
    ConstructionAborted { step: String, reason: String },

    /// A singleton slot holds a value of another type
    #[error("singleton '{key}' holds a different type than {expected}")]
    TypeMismatch { key: String, expected: &'static str },

    /// A singleton factory asked for the key it is creating
    #[error("re-entrant creation of singleton '{key}'")]
    ReentrantCreation { key: String },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON conversion error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KitError {
    pub(crate) fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}
