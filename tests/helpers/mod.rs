//! Test helpers and fixtures for patchbay integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (linear mapping, clamping)
//! - `ROUNDTRIP_EPSILON` (1e-3): Normalized round trips
//! - `MODULATION_EPSILON` (1e-4): Modulated values

#![allow(dead_code)]

pub mod tolerances;

use patchbay::prelude::*;
use patchbay::SourceCatalog;

/// A synth with the standard control table and default tempo.
pub fn test_synth() -> Synth {
    Synth::builder()
        .build()
        .expect("Failed to create test synth")
}

/// The end-to-end patch: LFO 1 on filter 1 cutoff at full amount, filter on.
pub fn lfo_cutoff_patch() -> Synth {
    let synth = test_synth();
    assert!(synth.connect_modulation("lfo_1", "filter_1_cutoff"));
    synth.control("modulation_1_amount").unwrap().set(1.0);
    synth.control("filter_1_on").unwrap().set(1.0);
    synth
}

/// All standard sources at 0.0.
pub fn silent_signals() -> SourceSignals {
    SourceSignals::new(SourceCatalog::standard())
}

/// Renderer that writes the effective filter 1 cutoff into every sample.
///
/// Stands in for the external audio pipeline: it consumes the pinned
/// snapshot the same way a real renderer would.
pub struct CutoffMeter {
    pub sample_rate: u32,
    pub signals: SourceSignals,
    pub last_request: Option<RenderRequest>,
}

impl CutoffMeter {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            signals: silent_signals(),
            last_request: None,
        }
    }
}

impl Renderer for CutoffMeter {
    fn render(
        &mut self,
        snapshot: &RenderSnapshot,
        request: &RenderRequest,
    ) -> Result<AudioBuffer> {
        if !(request.total_duration >= 0.0) {
            let message = format!("bad duration {}", request.total_duration);
            return Err(Error::Render(message));
        }
        self.last_request = Some(*request);

        let cutoff = snapshot.effective_value("filter_1_cutoff", &self.signals)?;
        let frames = (request.total_duration * self.sample_rate as f32) as usize;
        let mut buffer = AudioBuffer::stereo(self.sample_rate, frames);
        for channel in &mut buffer.channels {
            channel.iter_mut().for_each(|s| *s = cutoff);
        }
        Ok(buffer)
    }
}
