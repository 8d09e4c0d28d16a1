//! Centralized error type for the patchbay umbrella crate.
//!
//! Wraps subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] patchbay_core::Error),

    #[error("Modulation: {0}")]
    Modulation(#[from] patchbay_modulation::Error),

    #[error("Invalid preset: {0}")]
    InvalidPreset(String),

    #[error("Preset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tempo: {0}. Must be between 20.0 and 999.0 BPM")]
    InvalidTempo(f32),

    #[error("Render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for references to controls, sources or files that do not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Core(e) => e.is_not_found(),
            Error::Modulation(e) => e.is_not_found(),
            Error::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
