//! Error types for patchbay-core.

use thiserror::Error;

/// Result type alias for patchbay-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from descriptor tables and control lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown control: {0}")]
    UnknownControl(String),

    #[error("Invalid control descriptor '{name}': {reason}")]
    InvalidDescriptor { name: String, reason: String },

    #[error("Duplicate control name: {0}")]
    DuplicateControl(String),
}

impl Error {
    /// True when the error refers to a name that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UnknownControl(_))
    }

    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Error::InvalidDescriptor {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
