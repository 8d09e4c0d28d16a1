//! Error types for patchbay-modulation.

use thiserror::Error;

/// Result type alias for patchbay-modulation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from modulation routing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown modulation source: {0}")]
    UnknownSource(String),

    #[error("Unknown modulation destination: {0}")]
    UnknownDestination(String),

    #[error("Duplicate modulation source: {0}")]
    DuplicateSource(String),

    #[error("All {0} modulation slots are in use")]
    SlotsFull(usize),

    #[error("Modulation slot {slot} out of range (1-{count})")]
    SlotOutOfRange { slot: usize, count: usize },

    #[error("Modulation slot {0} is already connected")]
    SlotOccupied(usize),

    #[error("{source_id} -> {destination} is already connected in slot {slot}")]
    DuplicateConnection {
        source_id: String,
        destination: String,
        slot: usize,
    },
}

impl Error {
    /// True when the error refers to a source or destination that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UnknownSource(_) | Error::UnknownDestination(_))
    }
}
