//! Descriptor tables.
//!
//! A [`ControlCatalog`] is the read-only set of control descriptors a synth is
//! built from. It is validated once at construction and never changes; its
//! declaration order defines each control's index.

use crate::descriptor::ControlDescriptor;
use crate::error::{Error, Result};
use crate::standard;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Validated, immutable table of control descriptors.
#[derive(Debug)]
pub struct ControlCatalog {
    descriptors: Vec<Arc<ControlDescriptor>>,
    index: HashMap<String, usize>,
}

impl ControlCatalog {
    /// Build a catalog, validating every descriptor and rejecting duplicate names.
    pub fn new(descriptors: Vec<ControlDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(descriptors.len());
        let mut table = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            descriptor.validate()?;
            if index.insert(descriptor.name.clone(), table.len()).is_some() {
                return Err(Error::DuplicateControl(descriptor.name));
            }
            table.push(Arc::new(descriptor));
        }

        Ok(Self {
            descriptors: table,
            index,
        })
    }

    /// Build from a compiled-in table. The table's validity is covered by tests.
    pub(crate) fn from_static(descriptors: Vec<ControlDescriptor>) -> Self {
        debug_assert!(descriptors.iter().all(|d| d.validate().is_ok()));

        let index: HashMap<String, usize> = descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.clone(), i))
            .collect();
        debug_assert_eq!(index.len(), descriptors.len(), "duplicate control names");

        Self {
            descriptors: descriptors.into_iter().map(Arc::new).collect(),
            index,
        }
    }

    /// The process-wide standard synth table, built on first use.
    pub fn standard() -> Arc<ControlCatalog> {
        static STANDARD: OnceLock<Arc<ControlCatalog>> = OnceLock::new();
        STANDARD
            .get_or_init(|| Arc::new(standard::build()))
            .clone()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Index of a control, or `UnknownControl`.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownControl(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Descriptor by name, or `UnknownControl`.
    pub fn get(&self, name: &str) -> Result<&Arc<ControlDescriptor>> {
        self.index_of(name).map(|i| &self.descriptors[i])
    }

    /// Descriptor by index.
    #[inline]
    pub fn at(&self, index: usize) -> Option<&Arc<ControlDescriptor>> {
        self.descriptors.get(index)
    }

    /// Descriptors in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ControlDescriptor>> {
        self.descriptors.iter()
    }

    /// Default native values in index order.
    pub fn defaults(&self) -> Vec<f32> {
        self.descriptors.iter().map(|d| d.default_value).collect()
    }
}
