//! Synth facade coordinating controls, modulation and presets.

use crate::control::Control;
use crate::preset::{validate_bpm, ModulationEntry, PresetDocument};
use crate::registry::ControlRegistry;
use crate::render::{AudioBuffer, RenderRequest, Renderer};
use crate::state::{EngineState, SharedState, StateReader};
use crate::{Result, SynthBuilder, DEFAULT_BPM};
use arc_swap::ArcSwap;
use patchbay_core::standard::MODULATION_AMOUNT;
use patchbay_core::{modulation_control, ControlCatalog, ControlDescriptor};
use patchbay_modulation::{ModulationGraph, SourceCatalog};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// One synth instance's parameter state.
///
/// All mutating calls belong to a single control thread. The render thread
/// reads through a [`StateReader`] from [`Synth::reader`].
///
/// # Example
///
/// ```
/// use patchbay::Synth;
///
/// let synth = Synth::new();
/// assert!(synth.connect_modulation("lfo_1", "filter_1_cutoff"));
/// synth.control("modulation_1_amount")?.set(1.0);
/// synth.control("filter_1_on")?.set(1.0);
///
/// let json = synth.to_json();
/// let copy = Synth::new();
/// assert!(copy.load_json(&json));
/// assert_eq!(copy.to_json(), json);
/// # Ok::<(), patchbay::Error>(())
/// ```
pub struct Synth {
    shared: SharedState,
    registry: ControlRegistry,
    sources: Arc<SourceCatalog>,
}

impl Synth {
    /// Create a new synth builder
    pub fn builder() -> SynthBuilder {
        SynthBuilder::default()
    }

    /// Standard control table, standard sources, default tempo.
    pub fn new() -> Self {
        Self::from_parts(
            ControlCatalog::standard(),
            SourceCatalog::standard(),
            DEFAULT_BPM,
        )
    }

    /// `bpm` must already be validated.
    pub(crate) fn from_parts(
        catalog: Arc<ControlCatalog>,
        sources: Arc<SourceCatalog>,
        bpm: f32,
    ) -> Self {
        let graph = ModulationGraph::new(catalog.clone(), sources.clone());
        let state = EngineState::initial(&catalog, graph, bpm);
        let shared: SharedState = Arc::new(ArcSwap::from_pointee(state));
        let registry = ControlRegistry::new(catalog, &shared);

        tracing::debug!(
            "Synth created with {} controls, {} sources",
            registry.len(),
            sources.len()
        );

        Self {
            shared,
            registry,
            sources,
        }
    }

    // ==================== Controls ====================

    pub fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    /// All controls keyed by name.
    pub fn get_controls(&self) -> &BTreeMap<String, Control> {
        self.registry.get_controls()
    }

    pub fn control(&self, name: &str) -> Result<&Control> {
        self.registry.control(name)
    }

    pub fn get_control_details(&self, name: &str) -> Result<&Arc<ControlDescriptor>> {
        self.registry.get_control_details(name)
    }

    pub fn get_control_text(&self, name: &str) -> Result<String> {
        self.registry.get_control_text(name)
    }

    // ==================== Transport ====================

    pub fn bpm(&self) -> f32 {
        self.shared.load().bpm()
    }

    /// Set the tempo. Fails with `InvalidTempo` outside 20-999 BPM.
    pub fn set_bpm(&self, bpm: f32) -> Result<()> {
        let bpm = validate_bpm(bpm)?;
        self.shared.load().set_bpm(bpm);
        Ok(())
    }

    // ==================== Modulation ====================

    /// Known modulation source identifiers.
    pub fn get_modulation_sources(&self) -> Vec<String> {
        self.sources.iter().map(str::to_string).collect()
    }

    /// Controls that accept modulation (every continuous control).
    pub fn get_modulation_destinations(&self) -> Vec<String> {
        self.shared
            .load()
            .graph()
            .destinations()
            .map(str::to_string)
            .collect()
    }

    /// Connect a source to a destination. Returns `false` for unknown names
    /// or a full slot table, leaving the graph untouched.
    pub fn connect_modulation(&self, source: &str, destination: &str) -> bool {
        self.try_connect_modulation(source, destination, None)
            .is_ok()
    }

    /// Connect and set the connection's amount.
    pub fn connect_modulation_with_amount(
        &self,
        source: &str,
        destination: &str,
        amount: f32,
    ) -> bool {
        self.try_connect_modulation(source, destination, Some(amount))
            .is_ok()
    }

    /// Connect, returning the 1-based slot holding the connection.
    ///
    /// An existing pair keeps its slot and, without `amount`, its amount.
    pub fn try_connect_modulation(
        &self,
        source: &str,
        destination: &str,
        amount: Option<f32>,
    ) -> Result<usize> {
        let state = self.shared.load();
        let mut graph = (*state.graph()).clone();
        let existing = graph.connection(source, destination).is_some();

        let slot = match graph.connect(source, destination) {
            Ok(slot) => slot,
            Err(e) => {
                tracing::warn!("Rejected modulation {} -> {}: {}", source, destination, e);
                return Err(e.into());
            }
        };

        // A new connection starts from default slot controls, and its amount
        // lands before the connection becomes visible
        if !existing {
            state.reset_slot(slot);
        }
        if let Some(amount) = amount {
            self.registry
                .control(&modulation_control(slot, MODULATION_AMOUNT))?
                .set(amount);
        }
        state.publish_graph(graph);
        Ok(slot)
    }

    /// Remove a connection and reset its slot controls. No-op if absent.
    pub fn disconnect_modulation(&self, source: &str, destination: &str) {
        let state = self.shared.load();
        let mut graph = (*state.graph()).clone();
        if let Some(slot) = graph.disconnect(source, destination) {
            state.publish_graph(graph);
            state.reset_slot(slot);
        }
    }

    /// Remove every connection.
    pub fn clear_modulations(&self) {
        let state = self.shared.load();
        let mut graph = (*state.graph()).clone();
        let freed = graph.clear();
        if freed.is_empty() {
            return;
        }
        state.publish_graph(graph);
        for slot in freed {
            state.reset_slot(slot);
        }
    }

    /// Current connections with their amounts, in slot order.
    pub fn modulations(&self) -> Result<Vec<ModulationEntry>> {
        ModulationEntry::capture(&self.shared.load())
    }

    // ==================== Presets ====================

    /// Serialize the whole state to pretty-printed JSON.
    pub fn to_json(&self) -> String {
        match self.try_to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize preset: {}", e);
                String::new()
            }
        }
    }

    pub fn try_to_json(&self) -> Result<String> {
        PresetDocument::capture(&self.shared.load())?.to_json()
    }

    /// Replace the whole state from JSON. Returns `false` and leaves the
    /// state unchanged if the document is rejected.
    pub fn load_json(&self, json: &str) -> bool {
        match self.try_load_json(json) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Rejected preset: {}", e);
                false
            }
        }
    }

    pub fn try_load_json(&self, json: &str) -> Result<()> {
        let document = PresetDocument::from_json(json)?;
        let state = document.restore(self.registry.catalog(), &self.sources)?;
        self.shared.store(Arc::new(state));

        tracing::info!(
            "Loaded preset: {} controls, {} modulations, {} BPM",
            document.controls.len(),
            document.modulations.len(),
            document.bpm
        );
        Ok(())
    }

    /// Read a preset file and load it.
    pub fn load_preset(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.try_load_preset(path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to load preset {}: {}", path.display(), e);
                false
            }
        }
    }

    pub fn try_load_preset(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = std::fs::read_to_string(path)?;
        self.try_load_json(&json)
    }

    /// Write the current state to a preset file.
    pub fn save_preset(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.try_to_json()?)?;
        Ok(())
    }

    /// Reset every control, clear modulation and restore the default tempo
    /// in one atomic swap.
    pub fn load_init_preset(&self) {
        let catalog = self.registry.catalog();
        let graph = ModulationGraph::new(catalog.clone(), self.sources.clone());
        self.shared
            .store(Arc::new(EngineState::initial(catalog, graph, DEFAULT_BPM)));
        tracing::info!("Loaded init preset");
    }

    // ==================== Rendering ====================

    /// Handle for the render thread.
    pub fn reader(&self) -> StateReader {
        StateReader::new(self.shared.clone())
    }

    /// Render one note with the current state.
    pub fn render<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        pitch: i32,
        velocity: f32,
        note_duration: f32,
        total_duration: f32,
    ) -> Result<AudioBuffer> {
        let request = RenderRequest {
            pitch,
            velocity,
            note_duration,
            total_duration,
        };
        renderer.render(&self.reader().snapshot(), &request)
    }
}

impl Default for Synth {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Synth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Synth")
            .field("state", &*self.shared.load())
            .finish()
    }
}
