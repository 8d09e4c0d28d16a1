//! Static metadata for one named control.

use crate::error::{Error, Result};
use crate::scale::ValueScale;

const TOGGLE_OPTIONS: [&str; 2] = ["Off", "On"];

/// Immutable description of a control: bounds, scale law, option labels and display info.
///
/// Built once when a catalog is assembled and shared read-only (behind `Arc`)
/// by every live control and by the preset serializer.
///
/// # Example
///
/// ```
/// use patchbay_core::ControlDescriptor;
/// use patchbay_core::ValueScale::Linear;
///
/// let cutoff = ControlDescriptor::continuous("filter_1_cutoff", 8.0, 136.0, 60.0, Linear)
///     .display_name("Filter 1 Cutoff")
///     .units(" semitones");
/// assert_eq!(cutoff.text(72.0), "72.000000 semitones");
///
/// let style = ControlDescriptor::indexed("delay_style", &["Mono", "Stereo"], 0);
/// assert_eq!(style.text(1.0), "Stereo");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ControlDescriptor {
    /// Unique key.
    pub name: String,
    /// Lowest native value.
    pub min: f32,
    /// Highest native value.
    pub max: f32,
    /// Native value a fresh control starts with.
    pub default_value: f32,
    /// Scale law.
    pub scale: ValueScale,
    /// Option labels, indexed by `native - min`. Empty for continuous controls.
    pub options: Vec<String>,
    pub display_name: String,
    pub display_units: String,
    /// Multiplier applied to the skewed value for display.
    pub display_multiply: f32,
    /// Offset added after `display_multiply`.
    pub post_offset: f32,
    /// Exponential controls only: display `1 / 2^native` instead of `2^native`.
    pub display_invert: bool,
}

impl ControlDescriptor {
    /// A continuous control.
    pub fn continuous(
        name: impl Into<String>,
        min: f32,
        max: f32,
        default_value: f32,
        scale: ValueScale,
    ) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            min,
            max,
            default_value,
            scale,
            options: Vec::new(),
            display_units: String::new(),
            display_multiply: 1.0,
            post_offset: 0.0,
            display_invert: false,
        }
    }

    /// A discrete control whose indices start at 0.
    pub fn indexed(name: impl Into<String>, options: &[&str], default_index: usize) -> Self {
        Self::indexed_from(
            name,
            0,
            options.iter().map(|o| o.to_string()).collect(),
            default_index as i32,
        )
    }

    /// A discrete control whose indices start at `min` (polyphony counts from 1, for instance).
    pub fn indexed_from(
        name: impl Into<String>,
        min: i32,
        options: Vec<String>,
        default_value: i32,
    ) -> Self {
        let max = min + options.len() as i32 - 1;
        let mut descriptor = Self::continuous(
            name,
            min as f32,
            max as f32,
            default_value as f32,
            ValueScale::Indexed,
        );
        descriptor.options = options;
        descriptor
    }

    /// An Off/On switch.
    pub fn toggle(name: impl Into<String>, default_on: bool) -> Self {
        Self::indexed(name, &TOGGLE_OPTIONS, usize::from(default_on))
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.display_units = units.into();
        self
    }

    pub fn multiply(mut self, display_multiply: f32) -> Self {
        self.display_multiply = display_multiply;
        self
    }

    pub fn offset(mut self, post_offset: f32) -> Self {
        self.post_offset = post_offset;
        self
    }

    pub fn inverted(mut self) -> Self {
        self.display_invert = true;
        self
    }

    /// True iff the scale is [`ValueScale::Indexed`].
    #[inline]
    pub fn is_discrete(&self) -> bool {
        self.scale.is_discrete()
    }

    /// Clamp a native value to `[min, max]`. NaN maps to `min`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    #[inline]
    pub fn to_normalized(&self, native: f32) -> f32 {
        self.scale.to_normalized(native, self.min, self.max)
    }

    #[inline]
    pub fn to_native(&self, normalized: f32) -> f32 {
        self.clamp(self.scale.to_native(normalized, self.min, self.max))
    }

    pub fn default_normalized(&self) -> f32 {
        self.to_normalized(self.default_value)
    }

    /// Number of options (0 for continuous controls).
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Option index for a native value, clamped to the option list.
    pub fn option_index(&self, native: f32) -> Option<usize> {
        if self.options.is_empty() {
            return None;
        }
        let last = self.options.len() as i64 - 1;
        let index = (self.clamp(native).round() - self.min).round() as i64;
        Some(index.clamp(0, last) as usize)
    }

    /// Display text for a native value.
    pub fn text(&self, native: f32) -> String {
        if let Some(index) = self.option_index(native) {
            return self.options[index].clone();
        }

        let skewed = self.scale.skew(native, self.display_invert);
        let display = self.display_multiply * skewed + self.post_offset;
        format!("{:.6}{}", display, self.display_units)
    }

    /// Check the descriptor's invariants.
    pub fn validate(&self) -> Result<()> {
        let name = self.name.as_str();
        if name.is_empty() {
            return Err(Error::invalid(name, "empty name"));
        }
        if !(self.min.is_finite() && self.max.is_finite() && self.default_value.is_finite()) {
            return Err(Error::invalid(name, "bounds and default must be finite"));
        }

        let single_option = self.is_discrete() && self.options.len() == 1;
        if self.max < self.min || (self.max == self.min && !single_option) {
            return Err(Error::invalid(
                name,
                format!("max ({}) must be greater than min ({})", self.max, self.min),
            ));
        }
        if self.default_value < self.min || self.default_value > self.max {
            return Err(Error::invalid(
                name,
                format!(
                    "default {} outside [{}, {}]",
                    self.default_value, self.min, self.max
                ),
            ));
        }

        if self.is_discrete() {
            if self.min.fract() != 0.0 || self.max.fract() != 0.0 {
                return Err(Error::invalid(name, "indexed bounds must be integers"));
            }
            let expected = (self.max - self.min) as usize + 1;
            if self.options.len() != expected {
                return Err(Error::invalid(
                    name,
                    format!(
                        "expected {} options, found {}",
                        expected,
                        self.options.len()
                    ),
                ));
            }
        } else if !self.options.is_empty() {
            return Err(Error::invalid(name, "continuous controls take no options"));
        }

        Ok(())
    }
}
