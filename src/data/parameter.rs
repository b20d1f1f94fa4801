//! Slider-backed real parameters.

use std::ops::RangeInclusive;

/// A named real value driven by an integer slider.
///
/// The slider holds `raw`, bounded by `range`; the real value is `raw / scale`.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderParam {
    pub name: &'static str,
    pub range: RangeInclusive<i32>,
    pub scale: f64,
    raw: i32,
}

impl SliderParam {
    pub fn new(name: &'static str, range: RangeInclusive<i32>, scale: f64, raw: i32) -> Self {
        let mut p = Self {
            name,
            range,
            scale,
            raw: 0,
        };
        p.set_raw(raw);
        p
    }

    pub fn raw(&self) -> i32 {
        self.raw
    }

    /// Store a new slider position, clamped into `range`.
    /// Returns `true` if the stored value changed.
    pub fn set_raw(&mut self, raw: i32) -> bool {
        let clamped = raw.clamp(*self.range.start(), *self.range.end());
        let changed = clamped != self.raw;
        self.raw = clamped;
        changed
    }

    pub fn value(&self) -> f64 {
        self.raw as f64 / self.scale
    }
}

/// Format a float the way the UI labels show it: shortest round-trip text
/// that always keeps a fractional part (`1.0`, `0.25`, `3.14`).
pub fn format_value(v: f64) -> String {
    format!("{v:?}")
}
