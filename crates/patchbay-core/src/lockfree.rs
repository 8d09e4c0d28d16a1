//! Lock-free storage for control values shared with the render thread.

use crate::descriptor::ControlDescriptor;
use atomic_float::AtomicF32;
use std::sync::atomic::Ordering;

/// Native value of one control.
///
/// Written by the control thread and read by the render thread; a load
/// never observes a torn value. Writes through [`ControlCell::store`] are
/// clamped to the control's range first, so readers only see values the
/// descriptor allows.
#[derive(Debug)]
#[repr(align(64))]
pub struct ControlCell {
    value: AtomicF32,
}

impl ControlCell {
    /// Cell holding the descriptor's default value.
    pub fn new(descriptor: &ControlDescriptor) -> Self {
        Self::with_value(descriptor.default_value)
    }

    /// Cell holding a value that is already in range.
    pub fn with_value(value: f32) -> Self {
        Self {
            value: AtomicF32::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.value.load(Ordering::Acquire)
    }

    /// Clamp to the descriptor's range, store, and return the stored value.
    ///
    /// NaN stores the minimum.
    #[inline]
    pub fn store(&self, value: f32, descriptor: &ControlDescriptor) -> f32 {
        let value = descriptor.clamp(value);
        self.value.store(value, Ordering::Release);
        value
    }

    /// Store a value validated elsewhere (tempo, restored presets).
    #[inline]
    pub fn store_unchecked(&self, value: f32) {
        self.value.store(value, Ordering::Release);
    }

    /// Back to the descriptor's default.
    #[inline]
    pub fn reset(&self, descriptor: &ControlDescriptor) {
        self.store_unchecked(descriptor.default_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ValueScale;
    use std::sync::Arc;

    fn cutoff() -> ControlDescriptor {
        ControlDescriptor::continuous("cutoff", 8.0, 136.0, 60.0, ValueScale::Linear)
    }

    #[test]
    fn test_starts_at_default() {
        let descriptor = cutoff();
        assert_eq!(ControlCell::new(&descriptor).get(), 60.0);
        assert_eq!(ControlCell::with_value(99.0).get(), 99.0);
    }

    #[test]
    fn test_store_clamps() {
        let descriptor = cutoff();
        let cell = ControlCell::new(&descriptor);

        assert_eq!(cell.store(1000.0, &descriptor), 136.0);
        assert_eq!(cell.get(), 136.0);
        assert_eq!(cell.store(-5.0, &descriptor), 8.0);
        assert_eq!(cell.store(f32::NAN, &descriptor), 8.0);
        assert_eq!(cell.store(72.5, &descriptor), 72.5);

        cell.reset(&descriptor);
        assert_eq!(cell.get(), 60.0);
    }

    #[test]
    fn test_shared_across_threads() {
        let descriptor = Arc::new(cutoff());
        let cell = Arc::new(ControlCell::new(&descriptor));
        let writer = {
            let cell = Arc::clone(&cell);
            let descriptor = Arc::clone(&descriptor);
            std::thread::spawn(move || {
                for i in 0..1000 {
                    cell.store(i as f32, &descriptor);
                }
            })
        };

        for _ in 0..1000 {
            let seen = cell.get();
            assert!((8.0..=136.0).contains(&seen));
            assert_eq!(seen.fract(), 0.0);
        }

        writer.join().unwrap();
        assert_eq!(cell.get(), 136.0);
    }
}
