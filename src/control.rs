//! Live control handles.

use crate::state::SharedState;
use patchbay_core::ControlDescriptor;
use std::sync::Arc;

/// A named, host-automatable control bound to one synth instance.
///
/// Handles are cheap to clone and stay valid across preset loads: every call
/// resolves the synth's current state. Out-of-range input is clamped, never
/// rejected.
///
/// `value()` is the base value; modulation is applied by the renderer on top
/// (see [`RenderSnapshot::effective_value`](crate::RenderSnapshot::effective_value)).
#[derive(Clone)]
pub struct Control {
    shared: SharedState,
    index: usize,
    descriptor: Arc<ControlDescriptor>,
}

impl Control {
    pub(crate) fn new(
        shared: SharedState,
        index: usize,
        descriptor: Arc<ControlDescriptor>,
    ) -> Self {
        Self {
            shared,
            index,
            descriptor,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &Arc<ControlDescriptor> {
        &self.descriptor
    }

    /// Position in the synth's control table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current native value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.shared.load().value_at(self.index)
    }

    /// Set the native value, clamped to `[min, max]`.
    pub fn set(&self, value: f32) {
        self.shared
            .load()
            .store_at(self.index, value, &self.descriptor);
    }

    /// Current value in `[0, 1]`.
    pub fn get_normalized(&self) -> f32 {
        self.descriptor.to_normalized(self.value())
    }

    /// Set from a normalized value; input outside `[0, 1]` is clipped.
    pub fn set_normalized(&self, normalized: f32) {
        self.set(self.descriptor.to_native(normalized));
    }

    /// Option label for discrete controls, formatted number with units otherwise.
    pub fn get_text(&self) -> String {
        self.descriptor.text(self.value())
    }

    pub fn is_discrete(&self) -> bool {
        self.descriptor.is_discrete()
    }

    /// Restore the descriptor's default.
    pub fn reset(&self) {
        self.set(self.descriptor.default_value);
    }
}

impl std::fmt::Debug for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Control")
            .field("name", &self.descriptor.name)
            .field("value", &self.value())
            .finish()
    }
}
