//! Builder for configuring and constructing a `Synth`.

use crate::preset::validate_bpm;
use crate::{Result, Synth, DEFAULT_BPM};
use patchbay_core::ControlCatalog;
use patchbay_modulation::SourceCatalog;
use std::sync::Arc;

/// Catalogs default to the process-wide standard tables, which are built once
/// and shared by every synth.
///
/// # Example
///
/// ```
/// use patchbay::Synth;
///
/// let synth = Synth::builder().bpm(128.0).build()?;
/// assert_eq!(synth.bpm(), 128.0);
/// # Ok::<(), patchbay::Error>(())
/// ```
pub struct SynthBuilder {
    catalog: Option<Arc<ControlCatalog>>,
    sources: Option<Arc<SourceCatalog>>,
    bpm: f32,
}

impl Default for SynthBuilder {
    fn default() -> Self {
        Self {
            catalog: None,
            sources: None,
            bpm: DEFAULT_BPM,
        }
    }
}

impl SynthBuilder {
    /// Default: the standard control table
    pub fn catalog(mut self, catalog: Arc<ControlCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Default: the standard source set
    pub fn sources(mut self, sources: Arc<SourceCatalog>) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Default: 120.0
    pub fn bpm(mut self, bpm: f32) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn build(self) -> Result<Synth> {
        let bpm = validate_bpm(self.bpm)?;
        let catalog = self.catalog.unwrap_or_else(ControlCatalog::standard);
        let sources = self.sources.unwrap_or_else(SourceCatalog::standard);
        Ok(Synth::from_parts(catalog, sources, bpm))
    }
}
