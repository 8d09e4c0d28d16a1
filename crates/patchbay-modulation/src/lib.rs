//! Modulation routing for the patchbay parameter engine.
//!
//! - **[`SourceCatalog`]** - Fixed set of modulation source identifiers
//! - **[`SourceSignals`]** - Current output of every source, filled per block
//! - **[`ModulationGraph`]** - Slot-based connections from sources to controls
//!
//! # Quick Start
//!
//! ```
//! use patchbay_core::ControlCatalog;
//! use patchbay_modulation::{ModulationGraph, SourceCatalog, SourceSignals};
//!
//! let controls = ControlCatalog::standard();
//! let mut graph = ModulationGraph::new(controls.clone(), SourceCatalog::standard());
//! let slot = graph.connect("lfo_1", "filter_1_cutoff")?;
//!
//! let mut values = controls.defaults();
//! values[controls.index_of(&patchbay_core::modulation_control(slot, "amount"))?] = 0.5;
//!
//! let mut signals = SourceSignals::new(SourceCatalog::standard());
//! signals.set("lfo_1", 1.0)?;
//!
//! let cutoff = graph.effective_value("filter_1_cutoff", &values, &signals)?;
//! assert!((cutoff - 60.5).abs() < 1e-5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub use error::{Error, Result};

mod source;
pub use source::{SourceCatalog, SourceSignals};

mod graph;
pub use graph::{
    power_scale, ActiveConnection, ControlValues, ModulationConnection, ModulationGraph,
};
