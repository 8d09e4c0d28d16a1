//! # Patchbay - Synth Parameter Engine
//!
//! Named, host-automatable controls with normalized (0.0-1.0) and native
//! views, slot-based modulation routing, and lossless JSON presets.
//!
//! ## Architecture
//!
//! Patchbay is an umbrella crate that coordinates:
//! - **patchbay-core** - Scale laws, control descriptors, the standard control table
//! - **patchbay-modulation** - Modulation sources, signals and the slot graph
//!
//! and adds the live [`Control`] handles, the [`ControlRegistry`], JSON
//! [`preset`]s and the [`Synth`] facade. Audio generation is external: a
//! [`Renderer`] reads a pinned [`RenderSnapshot`] each block.
//!
//! ## Quick Start
//!
//! ```
//! use patchbay::prelude::*;
//!
//! let synth = Synth::builder().bpm(120.0).build()?;
//!
//! let cutoff = synth.control("filter_1_cutoff")?;
//! cutoff.set_normalized(0.5);
//! assert!((cutoff.value() - 72.0).abs() < 1e-3);
//!
//! synth.control("delay_style")?.set(2.0);
//! assert_eq!(synth.get_control_text("delay_style")?, "Ping Pong");
//!
//! assert!(synth.connect_modulation_with_amount("lfo_1", "filter_1_cutoff", 0.5));
//! let preset = synth.to_json();
//! assert!(synth.load_json(&preset));
//! # Ok::<(), patchbay::Error>(())
//! ```

/// Re-export of patchbay-core for direct access
pub use patchbay_core as core;

/// Re-export of patchbay-modulation for direct access
pub use patchbay_modulation as modulation;

pub use patchbay_core::{
    constants, modulation_control, ControlCatalog, ControlCell, ControlDescriptor, ValueScale,
    MAX_MODULATION_SLOTS,
};

pub use patchbay_modulation::{
    ActiveConnection, ModulationConnection, ModulationGraph, SourceCatalog, SourceSignals,
};

mod error;
pub use error::{Error, Result};

mod state;
pub use state::{EngineState, RenderSnapshot, StateReader};

mod control;
pub use control::Control;

mod registry;
pub use registry::ControlRegistry;

pub mod preset;
pub use preset::{ModulationEntry, PresetDocument};

mod render;
pub use render::{AudioBuffer, RenderRequest, Renderer};

mod builder;
mod synth;

pub use builder::SynthBuilder;
pub use synth::Synth;

/// Tempo of a new synth and of the init preset.
pub const DEFAULT_BPM: f32 = 120.0;
pub const MIN_BPM: f32 = 20.0;
pub const MAX_BPM: f32 = 999.0;

/// `synth_version` written to presets. Documents with another major version are rejected.
pub const PRESET_FORMAT_VERSION: &str = "1.0";

/// Identifiers of the standard modulation sources.
pub fn get_modulation_sources() -> Vec<String> {
    SourceCatalog::standard()
        .iter()
        .map(str::to_string)
        .collect()
}

/// Names of the standard table's modulatable (continuous) controls.
pub fn get_modulation_destinations() -> Vec<String> {
    ControlCatalog::standard()
        .iter()
        .filter(|d| !d.is_discrete())
        .map(|d| d.name.clone())
        .collect()
}

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{Control, ControlRegistry, Synth, SynthBuilder};

    pub use crate::{ControlDescriptor, ValueScale};

    // Render side
    pub use crate::{
        AudioBuffer, RenderRequest, RenderSnapshot, Renderer, SourceSignals, StateReader,
    };

    pub use crate::{Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_wide_catalogs() {
        let sources = get_modulation_sources();
        assert!(sources.contains(&"lfo_1".to_string()));
        assert!(sources.contains(&"env_1".to_string()));

        let destinations = get_modulation_destinations();
        assert!(destinations.contains(&"filter_1_cutoff".to_string()));
        assert!(!destinations.contains(&"delay_style".to_string()));
        assert_eq!(destinations, Synth::new().get_modulation_destinations());
    }
}
