//! Mode-2 pitch bend primitives
//!
//! A mode-2 curve is a start point (`PBS=`) plus parallel arrays of segment
//! durations (`PBW=`), interior control-point heights (`PBY=`) and segment
//! interpolation modes (`PBM=`). Heights are in 10-cent units (10.0 = one
//! semitone); durations are milliseconds.

use serde::{Deserialize, Serialize};

/// Height values are clamped to this magnitude on write
pub const MAX_BEND_HEIGHT: f64 = 200.0;

/// Interpolation mode of one pitch-bend segment
///
/// Matches the UST `PBM=` value domain: empty string, `s`, `r`, `j`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PitchBendMode {
    /// Full sine ease (UST empty string)
    #[serde(rename = "")]
    #[default]
    Sine,
    /// Straight line (`s`)
    #[serde(rename = "s")]
    Linear,
    /// First half of a sine (`r`)
    #[serde(rename = "r")]
    RSine,
    /// Second half of a sine (`j`)
    #[serde(rename = "j")]
    JSine,
}

impl PitchBendMode {
    /// UST text value for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            PitchBendMode::Sine => "",
            PitchBendMode::Linear => "s",
            PitchBendMode::RSine => "r",
            PitchBendMode::JSine => "j",
        }
    }

    /// Parse a UST `PBM=` entry; unknown text falls back to [`PitchBendMode::Sine`]
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "s" => PitchBendMode::Linear,
            "r" => PitchBendMode::RSine,
            "j" => PitchBendMode::JSine,
            _ => PitchBendMode::Sine,
        }
    }

    /// Next mode in the editing cycle: `'' → s → r → j → ''`
    pub fn rotated(&self) -> Self {
        match self {
            PitchBendMode::Sine => PitchBendMode::Linear,
            PitchBendMode::Linear => PitchBendMode::RSine,
            PitchBendMode::RSine => PitchBendMode::JSine,
            PitchBendMode::JSine => PitchBendMode::Sine,
        }
    }
}

/// Start point of a mode-2 curve (`PBS=`)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct PitchBendStart {
    /// Offset from note start in milliseconds (negative = before the note)
    pub time: f64,
    /// Height in 10-cent units, clamped to ±200
    height: f64,
}

impl PitchBendStart {
    pub fn new(time: f64, height: f64) -> Self {
        Self {
            time,
            height: clamp_height(height),
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = clamp_height(height);
    }
}

/// Clamp a control-point height to the documented ±200 domain
pub fn clamp_height(height: f64) -> f64 {
    height.clamp(-MAX_BEND_HEIGHT, MAX_BEND_HEIGHT)
}
