//! Control metadata and primitives for the patchbay parameter engine.
//!
//! # Primary API
//!
//! - [`ValueScale`]: normalized (0.0-1.0) ↔ native conversion per scale kind
//! - [`ControlDescriptor`]: immutable bounds, scale, options and display info
//! - [`ControlCatalog`]: validated descriptor table, including the
//!   process-wide [standard synth table](ControlCatalog::standard)
//! - [`ControlCell`]: lock-free, range-clamped storage for a control's native value
//! - [`constants`]: typed option indices for the standard table's discrete controls
//!
//! # Example
//!
//! ```
//! use patchbay_core::{ControlCatalog, ValueScale};
//!
//! let catalog = ControlCatalog::standard();
//! let style = catalog.get("delay_style")?;
//!
//! assert_eq!(style.scale, ValueScale::Indexed);
//! assert_eq!(style.text(2.0), "Ping Pong");
//! # Ok::<(), patchbay_core::Error>(())
//! ```

pub mod error;
pub use error::{Error, Result};

mod scale;
pub use scale::ValueScale;

mod descriptor;
pub use descriptor::ControlDescriptor;

mod catalog;
pub use catalog::ControlCatalog;

pub mod constants;

pub mod standard;
pub use standard::{modulation_control, MAX_MODULATION_SLOTS};

mod lockfree;
pub use lockfree::ControlCell;
