//! Name → control lookup.

use crate::control::Control;
use crate::state::SharedState;
use crate::Result;
use patchbay_core::{ControlCatalog, ControlDescriptor};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Every control of a synth, keyed by name.
///
/// The key set is fixed at construction and equals the catalog's names.
#[derive(Debug, Clone)]
pub struct ControlRegistry {
    catalog: Arc<ControlCatalog>,
    controls: BTreeMap<String, Control>,
}

impl ControlRegistry {
    pub(crate) fn new(catalog: Arc<ControlCatalog>, shared: &SharedState) -> Self {
        let controls = catalog
            .iter()
            .enumerate()
            .map(|(index, descriptor)| {
                (
                    descriptor.name.clone(),
                    Control::new(shared.clone(), index, descriptor.clone()),
                )
            })
            .collect();
        Self { catalog, controls }
    }

    /// All controls. Handles are live: setting one changes engine state.
    pub fn get_controls(&self) -> &BTreeMap<String, Control> {
        &self.controls
    }

    pub fn control(&self, name: &str) -> Result<&Control> {
        self.controls
            .get(name)
            .ok_or_else(|| patchbay_core::Error::UnknownControl(name.to_string()).into())
    }

    /// Static metadata for a control.
    pub fn get_control_details(&self, name: &str) -> Result<&Arc<ControlDescriptor>> {
        Ok(self.catalog.get(name)?)
    }

    pub fn get_control_text(&self, name: &str) -> Result<String> {
        self.control(name).map(Control::get_text)
    }

    pub fn catalog(&self) -> &Arc<ControlCatalog> {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Reset every control to its default.
    pub fn reset_all(&self) {
        self.controls.values().for_each(Control::reset);
    }
}
