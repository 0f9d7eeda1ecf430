//! Vibrato parameters (`VBR=`)
//!
//! All seven fields are independently range-clamped on write, matching the
//! UST value domains: length and fades as percentages of the note, cycle in
//! milliseconds, depth in cents, phase and height as signed percentages.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Vibrato {
    /// Portion of the note the vibrato covers, 0–100 %
    length: f64,
    /// Cycle period, 64–512 ms
    cycle: f64,
    /// Depth, 5–300 cent
    depth: f64,
    /// Fade-in, 0–100 % of the vibrato length
    fade_in: f64,
    /// Fade-out, 0–100 % of the vibrato length
    fade_out: f64,
    /// Phase shift, −100–100 %
    phase: f64,
    /// Pitch offset of the whole vibrato, −100–100
    height: f64,
}

impl Vibrato {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        length: f64,
        cycle: f64,
        depth: f64,
        fade_in: f64,
        fade_out: f64,
        phase: f64,
        height: f64,
    ) -> Self {
        let mut v = Self::default();
        v.set_length(length);
        v.set_cycle(cycle);
        v.set_depth(depth);
        v.set_fade_in(fade_in);
        v.set_fade_out(fade_out);
        v.set_phase(phase);
        v.set_height(height);
        v
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn cycle(&self) -> f64 {
        self.cycle
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn fade_in(&self) -> f64 {
        self.fade_in
    }

    pub fn fade_out(&self) -> f64 {
        self.fade_out
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_length(&mut self, length: f64) {
        self.length = length.clamp(0.0, 100.0);
    }

    pub fn set_cycle(&mut self, cycle: f64) {
        self.cycle = cycle.clamp(64.0, 512.0);
    }

    pub fn set_depth(&mut self, depth: f64) {
        self.depth = depth.clamp(5.0, 300.0);
    }

    pub fn set_fade_in(&mut self, fade_in: f64) {
        self.fade_in = fade_in.clamp(0.0, 100.0);
    }

    pub fn set_fade_out(&mut self, fade_out: f64) {
        self.fade_out = fade_out.clamp(0.0, 100.0);
    }

    pub fn set_phase(&mut self, phase: f64) {
        self.phase = phase.clamp(-100.0, 100.0);
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height.clamp(-100.0, 100.0);
    }
}
