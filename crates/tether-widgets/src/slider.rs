#![forbid(unsafe_code)]

//! A continuous-value slider.
//!
//! # Invariants
//!
//! 1. `min <= value <= max` at all times; out-of-range writes are clamped.
//! 2. A non-finite write is ignored.
//! 3. Both bounds are finite. A non-finite bound falls back to the matching
//!    bound of `[0, 1]`.

use std::cell::Cell;

use tether_core::ChangeSignal;

/// A horizontal slider over `[min, max]`.
#[derive(Debug)]
pub struct Slider {
    value: Cell<f32>,
    min: f32,
    max: f32,
    value_changed: ChangeSignal,
}

impl Slider {
    /// A slider over `[0, 1]`.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self::with_range(value, 0.0, 1.0)
    }

    /// A slider over `[min, max]`. Swapped bounds are reordered.
    #[must_use]
    pub fn with_range(value: f32, min: f32, max: f32) -> Self {
        let min = finite_or(min, 0.0);
        let max = finite_or(max, 1.0);
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let slider = Self {
            value: Cell::new(min),
            min,
            max,
            value_changed: ChangeSignal::new("value_changed"),
        };
        slider.set_value(value);
        slider
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.value.get()
    }

    #[must_use]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Set the value without firing `value_changed`. Returns the stored
    /// value after clamping.
    pub fn set_value(&self, value: f32) -> f32 {
        if !value.is_finite() {
            tracing::debug!(control = "slider", value, "non-finite value ignored");
            return self.value.get();
        }
        let clamped = value.clamp(self.min, self.max);
        if clamped != value {
            tracing::trace!(control = "slider", value, clamped, "value clamped");
        }
        self.value.set(clamped);
        clamped
    }

    #[must_use]
    pub fn value_changed(&self) -> &ChangeSignal {
        &self.value_changed
    }

    /// Simulate the user dragging the thumb to `value`.
    pub fn user_slide(&self, value: f32) {
        let before = self.value.get();
        if self.set_value(value) != before {
            self.value_changed.emit();
        }
    }
}

fn finite_or(bound: f32, fallback: f32) -> f32 {
    if bound.is_finite() {
        bound
    } else {
        tracing::warn!(control = "slider", bound, fallback, "non-finite bound replaced");
        fallback
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new(0.0)
    }
}
