//! JSON preset serialization.
//!
//! A preset captures every control value, every modulation connection and the
//! tempo:
//!
//! ```json
//! {
//!   "synth_version": "1.0",
//!   "bpm": 120.0,
//!   "controls": { "filter_1_cutoff": 60.0, ... },
//!   "modulations": [
//!     { "source": "lfo_1", "destination": "filter_1_cutoff", "amount": 1.0, "slot": 1 }
//!   ]
//! }
//! ```
//!
//! Controls are written sorted by name and connections in slot order. `f32`
//! values use their shortest round-tripping representation, so saving a
//! loaded preset reproduces the original text byte for byte.

use crate::state::EngineState;
use crate::{Error, Result, MAX_BPM, MIN_BPM, PRESET_FORMAT_VERSION};
use patchbay_core::standard::{MODULATION_AMOUNT, MODULATION_SLOT_FIELDS};
use patchbay_core::{modulation_control, ControlCatalog};
use patchbay_modulation::{ModulationGraph, SourceCatalog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Serialized synth state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetDocument {
    pub synth_version: String,
    pub bpm: f32,
    #[serde(default)]
    pub controls: BTreeMap<String, f32>,
    #[serde(default)]
    pub modulations: Vec<ModulationEntry>,
}

/// One modulation connection with its amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulationEntry {
    pub source: String,
    pub destination: String,
    pub amount: f32,
    /// 1-based slot. Optional on input; the lowest free slot is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<usize>,
}

impl ModulationEntry {
    /// Connections of a state with their amounts, in slot order.
    pub fn capture(state: &EngineState) -> Result<Vec<Self>> {
        let catalog = state.catalog();
        state
            .graph()
            .connections()
            .map(|c| {
                Ok(Self {
                    source: c.source.clone(),
                    destination: c.destination.clone(),
                    amount: state.value_at(amount_index(catalog, c.slot)?),
                    slot: Some(c.slot),
                })
            })
            .collect()
    }
}

fn amount_index(catalog: &ControlCatalog, slot: usize) -> Result<usize> {
    Ok(catalog.index_of(&modulation_control(slot, MODULATION_AMOUNT))?)
}

fn reset_slot(catalog: &ControlCatalog, values: &mut [f32], slot: usize) {
    for field in MODULATION_SLOT_FIELDS {
        if let Ok(index) = catalog.index_of(&modulation_control(slot, field)) {
            if let Some(descriptor) = catalog.at(index) {
                values[index] = descriptor.default_value;
            }
        }
    }
}

/// Tempo range check shared by presets and `set_bpm`.
pub(crate) fn validate_bpm(bpm: f32) -> Result<f32> {
    if bpm.is_finite() && (MIN_BPM..=MAX_BPM).contains(&bpm) {
        Ok(bpm)
    } else {
        Err(Error::InvalidTempo(bpm))
    }
}

fn supported_version(version: &str) -> bool {
    let major = |v: &str| v.split('.').next().map(str::trim).map(str::to_owned);
    match (major(version), major(PRESET_FORMAT_VERSION)) {
        (Some(found), Some(expected)) => !found.is_empty() && found == expected,
        _ => false,
    }
}

impl PresetDocument {
    /// Capture a state.
    pub fn capture(state: &EngineState) -> Result<Self> {
        let catalog = state.catalog();
        let controls = catalog
            .iter()
            .enumerate()
            .map(|(index, d)| (d.name.clone(), state.value_at(index)))
            .collect();

        Ok(Self {
            synth_version: PRESET_FORMAT_VERSION.to_string(),
            bpm: state.bpm(),
            controls,
            modulations: ModulationEntry::capture(state)?,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a fresh engine state from this document.
    ///
    /// Any unknown name, bad slot, unsupported version or out-of-range tempo
    /// rejects the whole document. Missing controls take their defaults.
    pub fn restore(
        &self,
        catalog: &Arc<ControlCatalog>,
        sources: &Arc<SourceCatalog>,
    ) -> Result<EngineState> {
        if !supported_version(&self.synth_version) {
            return Err(Error::InvalidPreset(format!(
                "unsupported synth_version {:?} (expected {})",
                self.synth_version, PRESET_FORMAT_VERSION
            )));
        }
        let bpm = validate_bpm(self.bpm)?;

        let mut values = catalog.defaults();
        for (name, &value) in &self.controls {
            let index = catalog.index_of(name)?;
            if let Some(descriptor) = catalog.at(index) {
                values[index] = descriptor.clamp(value);
            }
        }

        let mut graph = ModulationGraph::new(catalog.clone(), sources.clone());
        let mut placed = Vec::with_capacity(self.modulations.len());

        // Pinned slots first so unpinned entries cannot take them
        for entry in self.modulations.iter().filter(|e| e.slot.is_some()) {
            if let Some(slot) = entry.slot {
                graph.connect_at(slot, &entry.source, &entry.destination)?;
                placed.push((slot, entry.amount));
            }
        }
        for entry in self.modulations.iter().filter(|e| e.slot.is_none()) {
            if let Some(existing) = graph.connection(&entry.source, &entry.destination) {
                return Err(patchbay_modulation::Error::DuplicateConnection {
                    source_id: entry.source.clone(),
                    destination: entry.destination.clone(),
                    slot: existing.slot,
                }
                .into());
            }
            let slot = graph.connect(&entry.source, &entry.destination)?;
            // Slot controls in the document belong to pinned entries only
            reset_slot(catalog, &mut values, slot);
            placed.push((slot, entry.amount));
        }

        for (slot, amount) in placed {
            let index = amount_index(catalog, slot)?;
            if let Some(descriptor) = catalog.at(index) {
                values[index] = descriptor.clamp(amount);
            }
        }

        Ok(EngineState::new(catalog.clone(), values, graph, bpm))
    }
}
