//! Scale laws mapping host-normalized values (0.0-1.0) to native control values.
//!
//! Every scale kind is a pair of pure functions over a control's `[min, max]`
//! bounds. Both directions clamp their output and are mutual inverses up to
//! floating-point error.
//!
//! # Example
//!
//! ```
//! use patchbay_core::ValueScale;
//!
//! // Envelope delay: 0 to ~1.41 seconds, quartic display curve
//! let scale = ValueScale::Quartic;
//!
//! // Host automation always maps linearly onto the native range
//! let native = scale.to_native(0.5, 0.0, 1.4142135);
//! assert!((native - 0.70710677).abs() < 1e-6);
//!
//! // The knob display is where the quartic curve shows up
//! let shown = scale.skew(native, false);
//! assert!((shown - 0.25).abs() < 1e-6);
//! ```

/// How a control's native value relates to its normalized position and its display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueScale {
    /// Integer option indices with a text label each.
    ///
    /// `native = round(min + normalized * (max - min))`
    Indexed,

    /// Linear mapping (default)
    ///
    /// `native = min + normalized * (max - min)`
    #[default]
    Linear,

    /// `native = min + sqrt(normalized) * (max - min)`, displayed as `native^2`.
    Quadratic,

    /// `native = min + cbrt(normalized) * (max - min)`, displayed as `native^3`.
    Cubic,

    /// Linear automation mapping, displayed as `native^4`.
    ///
    /// Hosts see a linear range; the quartic curve only shapes the
    /// displayed value (envelope times, for instance).
    Quartic,

    /// `native = min + normalized^2 * (max - min)`, displayed as `sqrt(native)`.
    SquareRoot,

    /// Linear automation mapping over an exponent, displayed as `2^native`.
    ///
    /// With `display_invert`, displayed as `1 / 2^native` (rates shown as periods).
    Exponential,
}

impl ValueScale {
    /// All scale kinds, in declaration order.
    pub const ALL: [ValueScale; 7] = [
        ValueScale::Indexed,
        ValueScale::Linear,
        ValueScale::Quadratic,
        ValueScale::Cubic,
        ValueScale::Quartic,
        ValueScale::SquareRoot,
        ValueScale::Exponential,
    ];

    /// True for option-index controls.
    #[inline]
    pub fn is_discrete(self) -> bool {
        matches!(self, ValueScale::Indexed)
    }

    /// Convert a native value to its normalized position (0.0-1.0).
    #[inline]
    pub fn to_normalized(self, native: f32, min: f32, max: f32) -> f32 {
        let range = max - min;
        if range <= 0.0 {
            return 0.0;
        }

        let native = native.clamp(min, max);
        let linear = (native - min) / range;

        let normalized = match self {
            ValueScale::Indexed => (native.round() - min) / range,
            ValueScale::Linear | ValueScale::Quartic | ValueScale::Exponential => linear,
            ValueScale::Quadratic => linear * linear,
            ValueScale::Cubic => linear * linear * linear,
            ValueScale::SquareRoot => linear.sqrt(),
        };

        normalized.clamp(0.0, 1.0)
    }

    /// Convert a normalized position (0.0-1.0) to a native value.
    ///
    /// Out-of-range input is clipped to 0.0-1.0 first.
    #[inline]
    pub fn to_native(self, normalized: f32, min: f32, max: f32) -> f32 {
        let normalized = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        let range = max - min;

        let native = match self {
            ValueScale::Indexed => (min + normalized * range).round(),
            ValueScale::Linear | ValueScale::Quartic | ValueScale::Exponential => {
                min + normalized * range
            }
            ValueScale::Quadratic => min + normalized.sqrt() * range,
            ValueScale::Cubic => min + normalized.cbrt() * range,
            ValueScale::SquareRoot => min + normalized * normalized * range,
        };

        native.clamp(min, max)
    }

    /// Apply the display curve to a native value.
    #[inline]
    pub fn skew(self, native: f32, display_invert: bool) -> f32 {
        match self {
            ValueScale::Quadratic => native * native,
            ValueScale::Cubic => native * native * native,
            ValueScale::Quartic => {
                let squared = native * native;
                squared * squared
            }
            ValueScale::SquareRoot => native.max(0.0).sqrt(),
            ValueScale::Exponential => {
                if display_invert {
                    1.0 / 2.0_f32.powf(native)
                } else {
                    2.0_f32.powf(native)
                }
            }
            ValueScale::Indexed | ValueScale::Linear => native,
        }
    }
}
