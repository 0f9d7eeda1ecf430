//! Amplitude envelope of a note
//!
//! Mirrors the UST `Envelope=` value domain: 3–5 point offsets in
//! milliseconds and their levels (0–200). The UST line carries one more
//! level than points (the level paired with the note end), so `value` may
//! be one entry longer than `point`.

use serde::{Deserialize, Serialize};

/// Envelope levels are clamped to 0–200 on write
pub const MAX_ENVELOPE_VALUE: f64 = 200.0;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Envelope {
    point: Vec<f64>,
    value: Vec<f64>,
}

impl Envelope {
    /// Build an envelope, clamping points to ≥ 0 ms and levels to 0–200
    pub fn new(point: Vec<f64>, value: Vec<f64>) -> Self {
        Self {
            point: point.into_iter().map(|p| p.max(0.0)).collect(),
            value: value
                .into_iter()
                .map(|v| v.clamp(0.0, MAX_ENVELOPE_VALUE))
                .collect(),
        }
    }

    pub fn points(&self) -> &[f64] {
        &self.point
    }

    pub fn values(&self) -> &[f64] {
        &self.value
    }

    /// Sum of all point offsets, the quantity normalization compares
    /// against the note's millisecond length
    pub fn point_sum(&self) -> f64 {
        self.point.iter().sum()
    }

    pub fn set_points(&mut self, point: Vec<f64>) {
        self.point = point.into_iter().map(|p| p.max(0.0)).collect();
    }

    pub fn set_values(&mut self, value: Vec<f64>) {
        self.value = value
            .into_iter()
            .map(|v| v.clamp(0.0, MAX_ENVELOPE_VALUE))
            .collect();
    }
}
