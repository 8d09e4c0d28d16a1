//! Modulation graph.
//!
//! Routes modulation sources (LFOs, envelopes, macros) to destination
//! controls through a fixed bank of numbered slots. Each slot's amount,
//! power, polarity and bypass live in ordinary controls
//! (`modulation_N_amount`, ...), so they can be automated and saved like any
//! other parameter.
//!
//! The graph owns only the connection table. Signal values come from the
//! render pipeline through [`SourceSignals`]; control values through
//! [`ControlValues`].

use crate::error::{Error, Result};
use crate::source::{SourceCatalog, SourceSignals};
use patchbay_core::standard::{
    MODULATION_AMOUNT, MODULATION_BIPOLAR, MODULATION_BYPASS, MODULATION_POWER,
};
use patchbay_core::{modulation_control, ControlCatalog, MAX_MODULATION_SLOTS};
use std::sync::Arc;

/// Read access to native control values by catalog index.
pub trait ControlValues {
    fn value_at(&self, index: usize) -> f32;
}

impl ControlValues for [f32] {
    #[inline]
    fn value_at(&self, index: usize) -> f32 {
        self[index]
    }
}

impl ControlValues for Vec<f32> {
    #[inline]
    fn value_at(&self, index: usize) -> f32 {
        self[index]
    }
}

/// A directed link from a modulation source to a destination control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulationConnection {
    /// Source identifier, e.g. `"lfo_1"`.
    pub source: String,
    /// Destination control name, e.g. `"filter_1_cutoff"`.
    pub destination: String,
    /// 1-based slot whose controls carry this connection's amount.
    pub slot: usize,
    source_index: usize,
    destination_index: usize,
}

impl ModulationConnection {
    #[inline]
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    #[inline]
    pub fn destination_index(&self) -> usize {
        self.destination_index
    }
}

/// Catalog indices of one slot's controls.
#[derive(Debug, Clone, Copy)]
struct SlotControls {
    amount: usize,
    power: usize,
    bipolar: usize,
    bypass: usize,
}

/// A connection resolved against the current control values.
#[derive(Debug, Clone, Copy)]
pub struct ActiveConnection<'a> {
    pub connection: &'a ModulationConnection,
    /// Native amount from `modulation_N_amount`.
    pub amount: f32,
    /// Curve from `modulation_N_power`.
    pub power: f32,
    /// From `modulation_N_bipolar`.
    pub bipolar: bool,
}

impl ActiveConnection<'_> {
    /// Native offset this connection adds for a given source signal.
    #[inline]
    pub fn contribution(&self, signal: f32) -> f32 {
        let shaped = power_scale(signal, self.power);
        let shaped = if self.bipolar {
            shaped * 2.0 - 1.0
        } else {
            shaped
        };
        self.amount * shaped
    }
}

/// Exponential curve used by slot power; identity near zero power.
#[inline]
pub fn power_scale(value: f32, power: f32) -> f32 {
    if power.abs() < 0.01 {
        return value;
    }
    ((power * value).exp() - 1.0) / (power.exp() - 1.0)
}

/// Connection table between modulation sources and destination controls.
///
/// Cloning is cheap enough for copy-on-write publication: catalogs are shared,
/// only the slot table is copied.
#[derive(Debug, Clone)]
pub struct ModulationGraph {
    controls: Arc<ControlCatalog>,
    sources: Arc<SourceCatalog>,
    slot_controls: Arc<[SlotControls]>,
    slots: Vec<Option<ModulationConnection>>,
}

impl ModulationGraph {
    /// Create an empty graph.
    ///
    /// The slot count is the number of consecutive slots (up to
    /// [`MAX_MODULATION_SLOTS`]) whose controls exist in `controls`.
    pub fn new(controls: Arc<ControlCatalog>, sources: Arc<SourceCatalog>) -> Self {
        let slot_controls: Vec<SlotControls> = (1..=MAX_MODULATION_SLOTS)
            .map_while(|slot| {
                let index = |field: &str| controls.index_of(&modulation_control(slot, field)).ok();
                Some(SlotControls {
                    amount: index(MODULATION_AMOUNT)?,
                    power: index(MODULATION_POWER)?,
                    bipolar: index(MODULATION_BIPOLAR)?,
                    bypass: index(MODULATION_BYPASS)?,
                })
            })
            .collect();

        Self {
            slots: vec![None; slot_controls.len()],
            slot_controls: slot_controls.into(),
            controls,
            sources,
        }
    }

    /// Number of slots.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of connected slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn source_catalog(&self) -> &Arc<SourceCatalog> {
        &self.sources
    }

    pub fn control_catalog(&self) -> &Arc<ControlCatalog> {
        &self.controls
    }

    /// Known source identifiers.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.iter()
    }

    /// Known destination names: every continuous control.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.controls
            .iter()
            .filter(|d| !d.is_discrete())
            .map(|d| d.name.as_str())
    }

    pub fn is_destination(&self, name: &str) -> bool {
        self.controls
            .get(name)
            .map(|d| !d.is_discrete())
            .unwrap_or(false)
    }

    fn resolve(&self, source: &str, destination: &str) -> Result<(usize, usize)> {
        let source_index = self.sources.index_of(source)?;
        let destination_index = match self.controls.get(destination) {
            Ok(d) if !d.is_discrete() => self.controls.index_of(destination).ok(),
            _ => None,
        }
        .ok_or_else(|| Error::UnknownDestination(destination.to_string()))?;
        Ok((source_index, destination_index))
    }

    fn slot_of(&self, source: &str, destination: &str) -> Option<usize> {
        self.connection(source, destination).map(|c| c.slot)
    }

    /// Connect `source` to `destination`, returning the 1-based slot.
    ///
    /// An existing pair keeps its slot; a new pair takes the lowest free slot.
    pub fn connect(&mut self, source: &str, destination: &str) -> Result<usize> {
        let (source_index, destination_index) = self.resolve(source, destination)?;

        if let Some(slot) = self.slot_of(source, destination) {
            return Ok(slot);
        }

        let free = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(Error::SlotsFull(self.slots.len()))?;
        let slot = free + 1;

        self.slots[free] = Some(ModulationConnection {
            source: source.to_string(),
            destination: destination.to_string(),
            slot,
            source_index,
            destination_index,
        });
        tracing::debug!("Connected {} -> {} in slot {}", source, destination, slot);
        Ok(slot)
    }

    /// Connect into a specific 1-based slot (preset restore).
    pub fn connect_at(&mut self, slot: usize, source: &str, destination: &str) -> Result<()> {
        let count = self.slots.len();
        if slot == 0 || slot > count {
            return Err(Error::SlotOutOfRange { slot, count });
        }
        let (source_index, destination_index) = self.resolve(source, destination)?;

        if let Some(existing) = self.slot_of(source, destination) {
            if existing == slot {
                return Ok(());
            }
            return Err(Error::DuplicateConnection {
                source_id: source.to_string(),
                destination: destination.to_string(),
                slot: existing,
            });
        }
        if self.slots[slot - 1].is_some() {
            return Err(Error::SlotOccupied(slot));
        }

        self.slots[slot - 1] = Some(ModulationConnection {
            source: source.to_string(),
            destination: destination.to_string(),
            slot,
            source_index,
            destination_index,
        });
        Ok(())
    }

    /// Remove a connection, returning the freed slot. No-op if absent.
    pub fn disconnect(&mut self, source: &str, destination: &str) -> Option<usize> {
        let slot = self.slot_of(source, destination)?;
        self.slots[slot - 1] = None;
        tracing::debug!(
            "Disconnected {} -> {} from slot {}",
            source,
            destination,
            slot
        );
        Some(slot)
    }

    /// Remove every connection, returning the freed slots.
    pub fn clear(&mut self) -> Vec<usize> {
        let freed: Vec<usize> = self.connections().map(|c| c.slot).collect();
        for slot in &mut self.slots {
            *slot = None;
        }
        if !freed.is_empty() {
            tracing::debug!("Cleared {} modulation connections", freed.len());
        }
        freed
    }

    /// Look up a connection by its endpoints.
    pub fn connection(&self, source: &str, destination: &str) -> Option<&ModulationConnection> {
        self.connections()
            .find(|c| c.source == source && c.destination == destination)
    }

    /// Connection in a 1-based slot.
    pub fn slot(&self, slot: usize) -> Option<&ModulationConnection> {
        slot.checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .and_then(Option::as_ref)
    }

    /// Connections in slot order.
    pub fn connections(&self) -> impl Iterator<Item = &ModulationConnection> {
        self.slots.iter().flatten()
    }

    /// Non-bypassed connections resolved against `values`, in slot order.
    pub fn active_connections<'a, V>(
        &'a self,
        values: &'a V,
    ) -> impl Iterator<Item = ActiveConnection<'a>> + 'a
    where
        V: ControlValues + ?Sized,
    {
        self.connections().filter_map(move |connection| {
            let controls = self.slot_controls[connection.slot - 1];
            if values.value_at(controls.bypass) >= 0.5 {
                return None;
            }
            Some(ActiveConnection {
                connection,
                amount: values.value_at(controls.amount),
                power: values.value_at(controls.power),
                bipolar: values.value_at(controls.bipolar) >= 0.5,
            })
        })
    }

    /// Sum of all active contributions to a destination index.
    pub fn modulation_offset<V>(
        &self,
        destination_index: usize,
        values: &V,
        signals: &SourceSignals,
    ) -> f32
    where
        V: ControlValues + ?Sized,
    {
        self.active_connections(values)
            .filter(|a| a.connection.destination_index == destination_index)
            .map(|a| a.contribution(signals.get(a.connection.source_index)))
            .sum()
    }

    /// Base value plus modulation, clamped to the destination's range.
    pub fn effective_value<V>(
        &self,
        destination: &str,
        values: &V,
        signals: &SourceSignals,
    ) -> Result<f32>
    where
        V: ControlValues + ?Sized,
    {
        let index = self
            .controls
            .index_of(destination)
            .map_err(|_| Error::UnknownDestination(destination.to_string()))?;
        let descriptor = self
            .controls
            .at(index)
            .ok_or_else(|| Error::UnknownDestination(destination.to_string()))?;
        let base = values.value_at(index);
        Ok(descriptor.clamp(base + self.modulation_offset(index, values, signals)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn graph() -> ModulationGraph {
        ModulationGraph::new(ControlCatalog::standard(), SourceCatalog::standard())
    }

    fn defaults() -> Vec<f32> {
        ControlCatalog::standard().defaults()
    }

    fn set(values: &mut [f32], name: &str, value: f32) {
        let index = ControlCatalog::standard().index_of(name).unwrap();
        values[index] = value;
    }

    fn signals() -> SourceSignals {
        SourceSignals::new(SourceCatalog::standard())
    }

    #[test]
    fn test_empty_graph() {
        let graph = graph();
        assert!(graph.is_empty());
        assert_eq!(graph.slot_count(), MAX_MODULATION_SLOTS);

        let values = defaults();
        let cutoff = graph
            .effective_value("filter_1_cutoff", &values, &signals())
            .unwrap();
        assert_abs_diff_eq!(cutoff, 60.0, epsilon = 1e-6);
    }

    #[test]
    fn test_connect_takes_lowest_free_slot() {
        let mut graph = graph();
        assert_eq!(graph.connect("lfo_1", "filter_1_cutoff").unwrap(), 1);
        assert_eq!(graph.connect("env_2", "osc_1_level").unwrap(), 2);

        graph.disconnect("lfo_1", "filter_1_cutoff");
        assert_eq!(graph.connect("lfo_3", "filter_2_cutoff").unwrap(), 1);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_reconnect_replaces() {
        let mut graph = graph();
        assert_eq!(graph.connect("lfo_1", "filter_1_cutoff").unwrap(), 1);
        assert_eq!(graph.connect("lfo_1", "filter_1_cutoff").unwrap(), 1);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_unknown_endpoints_leave_graph_untouched() {
        let mut graph = graph();

        let err = graph.connect("lfo_1", "no_such_control").unwrap_err();
        assert_eq!(err, Error::UnknownDestination("no_such_control".into()));
        assert!(err.is_not_found());

        let err = graph.connect("lfo_99", "filter_1_cutoff").unwrap_err();
        assert_eq!(err, Error::UnknownSource("lfo_99".into()));

        // Discrete controls are not destinations
        assert!(graph.connect("lfo_1", "delay_style").is_err());

        assert!(graph.is_empty());
    }

    #[test]
    fn test_disconnect_and_clear_are_idempotent() {
        let mut graph = graph();
        assert_eq!(graph.disconnect("lfo_1", "filter_1_cutoff"), None);
        assert!(graph.clear().is_empty());

        graph.connect("lfo_1", "filter_1_cutoff").unwrap();
        graph.connect("env_1", "filter_1_resonance").unwrap();
        assert_eq!(graph.clear(), vec![1, 2]);
        assert!(graph.is_empty());
        assert!(graph.clear().is_empty());
    }

    #[test]
    fn test_slots_full() {
        let mut graph = graph();
        let destinations: Vec<String> = graph.destinations().map(str::to_string).collect();

        for destination in destinations.iter().take(MAX_MODULATION_SLOTS) {
            graph.connect("lfo_1", destination).unwrap();
        }

        let err = graph
            .connect("lfo_2", &destinations[MAX_MODULATION_SLOTS])
            .unwrap_err();
        assert_eq!(err, Error::SlotsFull(MAX_MODULATION_SLOTS));
    }

    #[test]
    fn test_connect_at() {
        let mut graph = graph();
        graph.connect_at(5, "lfo_1", "filter_1_cutoff").unwrap();
        assert_eq!(graph.slot(5).unwrap().source, "lfo_1");
        assert!(graph.slot(1).is_none());

        assert_eq!(
            graph.connect_at(5, "lfo_2", "filter_1_cutoff").unwrap_err(),
            Error::SlotOccupied(5)
        );
        assert!(matches!(
            graph.connect_at(6, "lfo_1", "filter_1_cutoff").unwrap_err(),
            Error::DuplicateConnection { slot: 5, .. }
        ));
        assert!(matches!(
            graph.connect_at(0, "lfo_1", "osc_1_level").unwrap_err(),
            Error::SlotOutOfRange { .. }
        ));
        assert!(graph.connect_at(5, "lfo_1", "filter_1_cutoff").is_ok());
    }

    #[test]
    fn test_single_connection_offset() {
        let mut graph = graph();
        let slot = graph.connect("lfo_1", "filter_1_cutoff").unwrap();

        let mut values = defaults();
        let amount = modulation_control(slot, MODULATION_AMOUNT);
        set(&mut values, &amount, 1.0);

        let mut signals = signals();
        signals.set("lfo_1", 0.5).unwrap();

        let cutoff = graph
            .effective_value("filter_1_cutoff", &values, &signals)
            .unwrap();
        assert_abs_diff_eq!(cutoff, 60.5, epsilon = 1e-5);
    }

    #[test]
    fn test_multiple_connections_same_destination() {
        let mut graph = graph();
        graph.connect("lfo_1", "osc_1_pan").unwrap();
        graph.connect("env_1", "osc_1_pan").unwrap();

        let mut values = defaults();
        set(&mut values, "modulation_1_amount", 0.25);
        set(&mut values, "modulation_2_amount", 0.5);

        let mut signals = signals();
        signals.set("lfo_1", 1.0).unwrap();
        signals.set("env_1", 1.0).unwrap();

        let pan = graph
            .effective_value("osc_1_pan", &values, &signals)
            .unwrap();
        assert_abs_diff_eq!(pan, 0.75, epsilon = 1e-5);
    }

    #[test]
    fn test_result_is_clamped() {
        let mut graph = graph();
        graph.connect("lfo_1", "osc_1_pan").unwrap();
        let mut values = defaults();
        set(&mut values, "modulation_1_amount", 1.0);
        set(&mut values, "osc_1_pan", 0.8);

        let mut signals = signals();
        signals.set("lfo_1", 1.0).unwrap();

        let pan = graph
            .effective_value("osc_1_pan", &values, &signals)
            .unwrap();
        assert_eq!(pan, 1.0);
    }

    #[test]
    fn test_bipolar_and_bypass() {
        let mut graph = graph();
        graph.connect("velocity", "osc_1_pan").unwrap();
        let mut values = defaults();
        set(&mut values, "modulation_1_amount", 1.0);
        set(&mut values, "modulation_1_bipolar", 1.0);

        let mut signals = signals();
        signals.set("velocity", 0.25).unwrap();

        // Unipolar 0.25 -> bipolar -0.5
        let pan = graph
            .effective_value("osc_1_pan", &values, &signals)
            .unwrap();
        assert_abs_diff_eq!(pan, -0.5, epsilon = 1e-5);

        set(&mut values, "modulation_1_bypass", 1.0);
        assert_eq!(graph.active_connections(&values).count(), 0);
        let pan = graph
            .effective_value("osc_1_pan", &values, &signals)
            .unwrap();
        assert_abs_diff_eq!(pan, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_power_scale() {
        assert_eq!(power_scale(0.3, 0.0), 0.3);
        assert_abs_diff_eq!(power_scale(0.0, 4.0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(power_scale(1.0, 4.0), 1.0, epsilon = 1e-6);
        assert!(power_scale(0.5, 4.0) < 0.5);
        assert!(power_scale(0.5, -4.0) > 0.5);
    }

    #[test]
    fn test_destinations_exclude_discrete() {
        let graph = graph();
        assert!(graph.is_destination("filter_1_cutoff"));
        assert!(graph.is_destination("modulation_1_amount"));
        assert!(!graph.is_destination("delay_style"));
        assert!(!graph.is_destination("nope"));
        assert!(graph.destinations().all(|d| d != "filter_1_on"));
    }

    #[test]
    fn test_custom_catalog_without_slots() {
        use patchbay_core::{ControlDescriptor, ValueScale};

        let controls = Arc::new(
            ControlCatalog::new(vec![ControlDescriptor::continuous(
                "gain",
                0.0,
                1.0,
                0.5,
                ValueScale::Linear,
            )])
            .unwrap(),
        );
        let mut graph = ModulationGraph::new(controls, SourceCatalog::standard());
        assert_eq!(graph.slot_count(), 0);
        assert_eq!(
            graph.connect("lfo_1", "gain").unwrap_err(),
            Error::SlotsFull(0)
        );
    }
}
