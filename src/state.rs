//! Shared engine state.
//!
//! One [`EngineState`] holds everything the render thread reads: the native
//! value of every control, the modulation graph and the tempo. The control
//! thread publishes whole states through an `ArcSwap`, so a preset load is a
//! single pointer swap and readers observe either the old or the new preset.
//!
//! Within a published state, individual control writes go through
//! [`ControlCell`] and graph edits are copy-on-write through a nested
//! `ArcSwap<ModulationGraph>`.

use crate::{Error, Result};
use arc_swap::ArcSwap;
use patchbay_core::{ControlCatalog, ControlCell, ControlDescriptor};
use patchbay_modulation::{ActiveConnection, ControlValues, ModulationGraph, SourceSignals};
use std::sync::Arc;

/// Handle shared by the synth, its controls and every [`StateReader`].
pub(crate) type SharedState = Arc<ArcSwap<EngineState>>;

/// Control values, modulation graph and tempo of one synth instance.
pub struct EngineState {
    catalog: Arc<ControlCatalog>,
    values: Box<[ControlCell]>,
    modulation: ArcSwap<ModulationGraph>,
    bpm: ControlCell,
}

impl EngineState {
    /// Build a state from native values in catalog order.
    ///
    /// `values` must have one entry per catalog control.
    pub(crate) fn new(
        catalog: Arc<ControlCatalog>,
        values: Vec<f32>,
        graph: ModulationGraph,
        bpm: f32,
    ) -> Self {
        debug_assert_eq!(values.len(), catalog.len());
        Self {
            values: values.into_iter().map(ControlCell::with_value).collect(),
            modulation: ArcSwap::from_pointee(graph),
            bpm: ControlCell::with_value(bpm),
            catalog,
        }
    }

    /// Every control at its default, no connections.
    pub(crate) fn initial(catalog: &Arc<ControlCatalog>, graph: ModulationGraph, bpm: f32) -> Self {
        Self::new(catalog.clone(), catalog.defaults(), graph, bpm)
    }

    pub fn catalog(&self) -> &Arc<ControlCatalog> {
        &self.catalog
    }

    /// Native value by catalog index.
    #[inline]
    pub fn value_at(&self, index: usize) -> f32 {
        self.values[index].get()
    }

    /// Clamp to the descriptor's range and store; returns the stored value.
    #[inline]
    pub(crate) fn store_at(&self, index: usize, value: f32, descriptor: &ControlDescriptor) -> f32 {
        self.values[index].store(value, descriptor)
    }

    /// Native value by name.
    pub fn value(&self, name: &str) -> Result<f32> {
        Ok(self.value_at(self.catalog.index_of(name)?))
    }

    /// Copy of all native values in catalog order.
    pub fn values(&self) -> Vec<f32> {
        self.values.iter().map(ControlCell::get).collect()
    }

    /// Current modulation graph.
    pub fn graph(&self) -> Arc<ModulationGraph> {
        self.modulation.load_full()
    }

    pub(crate) fn publish_graph(&self, graph: ModulationGraph) {
        self.modulation.store(Arc::new(graph));
    }

    #[inline]
    pub fn bpm(&self) -> f32 {
        self.bpm.get()
    }

    pub(crate) fn set_bpm(&self, bpm: f32) {
        self.bpm.store_unchecked(bpm);
    }

    /// Reset every control of a modulation slot to its default.
    pub(crate) fn reset_slot(&self, slot: usize) {
        for field in patchbay_core::standard::MODULATION_SLOT_FIELDS {
            let name = patchbay_core::modulation_control(slot, field);
            if let Ok(index) = self.catalog.index_of(&name) {
                if let Some(descriptor) = self.catalog.at(index) {
                    self.values[index].reset(descriptor);
                }
            }
        }
    }
}

impl ControlValues for EngineState {
    #[inline]
    fn value_at(&self, index: usize) -> f32 {
        EngineState::value_at(self, index)
    }
}

impl std::fmt::Debug for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineState")
            .field("controls", &self.values.len())
            .field("connections", &self.modulation.load().len())
            .field("bpm", &self.bpm())
            .finish()
    }
}

/// Read-only handle for the render thread.
///
/// Cheap to clone; never blocks the control thread.
#[derive(Clone)]
pub struct StateReader {
    shared: SharedState,
}

impl StateReader {
    pub(crate) fn new(shared: SharedState) -> Self {
        Self { shared }
    }

    /// Pin the current state and graph for one render block.
    pub fn snapshot(&self) -> RenderSnapshot {
        let state = self.shared.load_full();
        let graph = state.graph();
        RenderSnapshot { state, graph }
    }
}

impl std::fmt::Debug for StateReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateReader").finish_non_exhaustive()
    }
}

/// One engine state and one modulation graph, held for the length of a block.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    state: Arc<EngineState>,
    graph: Arc<ModulationGraph>,
}

impl RenderSnapshot {
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn graph(&self) -> &ModulationGraph {
        &self.graph
    }

    /// Base (unmodulated) value of a control.
    pub fn value(&self, name: &str) -> Result<f32> {
        self.state.value(name)
    }

    pub fn descriptor(&self, name: &str) -> Result<&Arc<ControlDescriptor>> {
        Ok(self.state.catalog.get(name)?)
    }

    pub fn bpm(&self) -> f32 {
        self.state.bpm()
    }

    /// Non-bypassed connections in slot order.
    pub fn active_connections(&self) -> impl Iterator<Item = ActiveConnection<'_>> {
        self.graph.active_connections(self.state.as_ref())
    }

    /// Base value plus active modulation, clamped to the control's range.
    pub fn effective_value(&self, name: &str, signals: &SourceSignals) -> Result<f32> {
        if !self.state.catalog.contains(name) {
            return Err(Error::Core(patchbay_core::Error::UnknownControl(name.to_string())));
        }
        Ok(self
            .graph
            .effective_value(name, self.state.as_ref(), signals)?)
    }
}
