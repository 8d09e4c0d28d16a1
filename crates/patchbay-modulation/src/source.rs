//! Modulation source catalog and per-block source signal values.

use crate::error::{Error, Result};
use patchbay_core::standard::{NUM_ENVELOPES, NUM_LFOS, NUM_MACROS, NUM_RANDOM_LFOS};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Sources that are not numbered.
const PERFORMANCE_SOURCES: [&str; 10] = [
    "velocity",
    "note",
    "note_in_octave",
    "aftertouch",
    "mod_wheel",
    "pitch_wheel",
    "lift",
    "slide",
    "stereo",
    "random",
];

/// Fixed, ordered set of modulation source identifiers (`"lfo_1"`, `"env_1"`, ...).
#[derive(Debug)]
pub struct SourceCatalog {
    ids: Vec<String>,
    index: HashMap<String, usize>,
}

impl SourceCatalog {
    /// Build a catalog, rejecting duplicate identifiers.
    pub fn new<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self {
            ids: Vec::new(),
            index: HashMap::new(),
        };
        for id in ids {
            let id = id.into();
            let position = catalog.ids.len();
            if catalog.index.insert(id.clone(), position).is_some() {
                return Err(Error::DuplicateSource(id));
            }
            catalog.ids.push(id);
        }
        Ok(catalog)
    }

    /// The process-wide standard source set, built on first use.
    pub fn standard() -> Arc<SourceCatalog> {
        static STANDARD: OnceLock<Arc<SourceCatalog>> = OnceLock::new();
        STANDARD
            .get_or_init(|| {
                let ids = standard_ids();
                let index = ids
                    .iter()
                    .enumerate()
                    .map(|(i, id)| (id.clone(), i))
                    .collect();
                Arc::new(SourceCatalog { ids, index })
            })
            .clone()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Index of a source, or `UnknownSource`.
    pub fn index_of(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownSource(id.to_string()))
    }

    pub fn id(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    /// Identifiers in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

fn standard_ids() -> Vec<String> {
    let numbered = [
        ("env", NUM_ENVELOPES),
        ("lfo", NUM_LFOS),
        ("random", NUM_RANDOM_LFOS),
        ("macro_control", NUM_MACROS),
    ];

    numbered
        .iter()
        .flat_map(|&(prefix, count)| (1..=count).map(move |i| format!("{}_{}", prefix, i)))
        .chain(PERFORMANCE_SOURCES.iter().map(|s| s.to_string()))
        .collect()
}

/// Current output of every modulation source, filled by the render pipeline each block.
///
/// Sources are unipolar (0.0-1.0) unless a connection is marked bipolar.
#[derive(Debug, Clone)]
pub struct SourceSignals {
    catalog: Arc<SourceCatalog>,
    values: Vec<f32>,
}

impl SourceSignals {
    /// All sources at 0.0.
    pub fn new(catalog: Arc<SourceCatalog>) -> Self {
        let values = vec![0.0; catalog.len()];
        Self { catalog, values }
    }

    /// Set a source's current value.
    pub fn set(&mut self, id: &str, value: f32) -> Result<()> {
        let index = self.catalog.index_of(id)?;
        self.values[index] = value;
        Ok(())
    }

    /// Value by source index (0.0 for out-of-range indices).
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    pub fn get_by_id(&self, id: &str) -> Result<f32> {
        self.catalog.index_of(id).map(|i| self.values[i])
    }

    /// Reset all sources to 0.0.
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.0);
    }

    pub fn catalog(&self) -> &Arc<SourceCatalog> {
        &self.catalog
    }
}
