//! Tolerance constants for control-value testing.

/// Floating point rounding errors (exact linear mappings, clamping).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// Normalized ↔ native round trips through non-linear scale laws.
pub const ROUNDTRIP_EPSILON: f32 = 1e-3;

/// Modulation sums (power curves, several connections).
pub const MODULATION_EPSILON: f32 = 1e-4;
