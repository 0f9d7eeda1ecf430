//! The Note entity — one scored event and its derived parameters
//!
//! Fields start uninitialized (`None`) and are assigned by the UST loader or
//! by edit operations. Out-of-range numeric writes are clamped silently to
//! the documented UST value domains; reading a derived quantity before its
//! inputs are set is a programming-contract violation and errors instead.
//!
//! Every operation in the crate clones the Note it edits and returns the
//! copy, so Notes behave as immutable snapshots chained by undo/redo.

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

use super::envelope::Envelope;
use super::pitchbend::{clamp_height, PitchBendMode, PitchBendStart};
use super::vibrato::Vibrato;

/// Lowest supported pitch (C1)
pub const NOTENUM_MIN: i32 = 24;
/// Highest supported pitch (B7)
pub const NOTENUM_MAX: i32 = 107;
/// Tempo clamp bounds in BPM
pub const TEMPO_MIN: f64 = 10.0;
pub const TEMPO_MAX: f64 = 512.0;
/// Ticks per quarter note in the UST format
pub const TICKS_PER_QUARTER: f64 = 480.0;
/// The UST rest lyric
pub const REST_LYRIC: &str = "R";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Note {
    /// Position in the owning sequence; recomputed by
    /// [`crate::models::score::relink`] after any structural change
    pub index: usize,

    pub lyric: Option<String>,
    /// Free-text synthesis flags (`Flags=`)
    pub flags: Option<String>,
    /// UST `Label=` annotation, round-tripped untouched
    pub label: Option<String>,

    /// Whether this note carries its own tempo rather than inheriting
    /// the previous note's
    pub has_tempo: bool,

    length: Option<i32>,
    tempo: Option<f64>,
    notenum: Option<i32>,
    velocity: Option<i32>,
    intensity: Option<i32>,
    modulation: Option<i32>,

    /// Raw consonant-timing inputs, user- or oto-sourced
    pub preutter: Option<f64>,
    pub overlap: Option<f64>,
    pub stp: Option<f64>,

    /// Auto-fit outputs, written only by the timing engine
    pub(crate) at_preutter: Option<f64>,
    pub(crate) at_overlap: Option<f64>,
    pub(crate) at_stp: Option<f64>,
    /// Resolved by the external voicebank lookup
    pub at_alias: Option<String>,
    pub at_filename: Option<String>,

    /// Cached oto record values from the last voicebank lookup
    pub oto_preutter: Option<f64>,
    pub oto_overlap: Option<f64>,
    pub oto_alias: Option<String>,
    pub oto_filename: Option<String>,

    pub(crate) pbs: Option<PitchBendStart>,
    pub(crate) pby: Option<Vec<f64>>,
    pub(crate) pbw: Option<Vec<f64>>,
    pub(crate) pbm: Option<Vec<PitchBendMode>>,

    pub envelope: Option<Envelope>,
    pub vibrato: Option<Vibrato>,
}

impl Note {
    /// Create an empty note; fields are assigned by the loader or by edits
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this note is the UST rest lyric
    pub fn is_rest(&self) -> bool {
        self.lyric.as_deref() == Some(REST_LYRIC)
    }

    /// Whether this note has an initialized, non-rest lyric
    pub fn is_sung(&self) -> bool {
        matches!(self.lyric.as_deref(), Some(l) if l != REST_LYRIC)
    }

    /// Whether a voicebank oto record has been cached on this note
    pub fn has_oto_record(&self) -> bool {
        self.oto_preutter.is_some() || self.oto_overlap.is_some() || self.oto_alias.is_some()
    }

    // --- timing ---

    pub fn length(&self) -> Option<i32> {
        self.length
    }

    /// Length in ticks, clamped to ≥ 0
    pub fn set_length(&mut self, length: i32) {
        self.length = Some(length.max(0));
    }

    pub fn tempo(&self) -> Option<f64> {
        self.tempo
    }

    /// Tempo in BPM, clamped to 10–512
    pub fn set_tempo(&mut self, tempo: f64) {
        self.tempo = Some(tempo.clamp(TEMPO_MIN, TEMPO_MAX));
    }

    /// Duration in milliseconds: `(60 / tempo) * length / 480 * 1000`
    ///
    /// Errors if `length` or `tempo` was never initialized.
    pub fn ms_length(&self) -> Result<f64, ScoreError> {
        let length = self.length.ok_or(ScoreError::Uninitialized {
            index: self.index,
            field: "length",
        })?;
        let tempo = self.tempo.ok_or(ScoreError::Uninitialized {
            index: self.index,
            field: "tempo",
        })?;
        Ok(60.0 / tempo * f64::from(length) / TICKS_PER_QUARTER * 1000.0)
    }

    // --- pitch identity ---

    pub fn notenum(&self) -> Option<i32> {
        self.notenum
    }

    /// MIDI-style note number, clamped to 24–107 (C1–B7)
    pub fn set_notenum(&mut self, notenum: i32) {
        self.notenum = Some(notenum.clamp(NOTENUM_MIN, NOTENUM_MAX));
    }

    // --- timbre / loudness ---

    pub fn velocity(&self) -> Option<i32> {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: i32) {
        self.velocity = Some(velocity.clamp(0, 200));
    }

    pub fn intensity(&self) -> Option<i32> {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: i32) {
        self.intensity = Some(intensity.clamp(0, 200));
    }

    pub fn modulation(&self) -> Option<i32> {
        self.modulation
    }

    pub fn set_modulation(&mut self, modulation: i32) {
        self.modulation = Some(modulation.clamp(-200, 200));
    }

    // --- auto-fit outputs (read-only outside the timing engine) ---

    pub fn at_preutter(&self) -> Option<f64> {
        self.at_preutter
    }

    pub fn at_overlap(&self) -> Option<f64> {
        self.at_overlap
    }

    pub fn at_stp(&self) -> Option<f64> {
        self.at_stp
    }

    // --- mode-2 pitch bend ---

    pub fn pbs(&self) -> Option<&PitchBendStart> {
        self.pbs.as_ref()
    }

    pub fn set_pbs(&mut self, pbs: PitchBendStart) {
        self.pbs = Some(pbs);
    }

    pub fn pby(&self) -> Option<&[f64]> {
        self.pby.as_deref()
    }

    /// Interior control-point heights, each clamped to ±200
    pub fn set_pby(&mut self, pby: Vec<f64>) {
        self.pby = Some(pby.into_iter().map(clamp_height).collect());
    }

    pub fn pbw(&self) -> Option<&[f64]> {
        self.pbw.as_deref()
    }

    /// Segment durations in ms, each clamped to ≥ 0
    pub fn set_pbw(&mut self, pbw: Vec<f64>) {
        self.pbw = Some(pbw.into_iter().map(|w| w.max(0.0)).collect());
    }

    pub fn pbm(&self) -> Option<&[PitchBendMode]> {
        self.pbm.as_deref()
    }

    pub fn set_pbm(&mut self, pbm: Vec<PitchBendMode>) {
        self.pbm = Some(pbm);
    }

    /// Drop the whole mode-2 curve
    pub fn clear_pitchbend(&mut self) {
        self.pbs = None;
        self.pby = None;
        self.pbw = None;
        self.pbm = None;
    }

    /// `pbw.len() == pby.len() + 1 == pbm.len()` whenever the curve exists
    pub fn pitchbend_arity_ok(&self) -> bool {
        match (&self.pbw, &self.pby, &self.pbm) {
            (Some(pbw), Some(pby), Some(pbm)) => {
                pbw.len() == pby.len() + 1 && pbw.len() == pbm.len()
            }
            (None, None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_setters_clamp_to_domain() {
        let mut note = Note::new();
        note.set_notenum(200);
        assert_eq!(note.notenum(), Some(107));
        note.set_notenum(0);
        assert_eq!(note.notenum(), Some(24));
        note.set_velocity(-5);
        assert_eq!(note.velocity(), Some(0));
        note.set_velocity(999);
        assert_eq!(note.velocity(), Some(200));
        note.set_modulation(-999);
        assert_eq!(note.modulation(), Some(-200));
        note.set_tempo(1.0);
        assert_eq!(note.tempo(), Some(10.0));
        note.set_tempo(9999.0);
        assert_eq!(note.tempo(), Some(512.0));
        note.set_length(-10);
        assert_eq!(note.length(), Some(0));
    }

    #[test]
    fn ms_length_matches_formula() {
        let mut note = Note::new();
        note.set_length(480);
        note.set_tempo(120.0);
        // one quarter note at 120 BPM
        assert_eq!(note.ms_length().unwrap(), 500.0);
    }

    #[test]
    fn ms_length_requires_initialized_inputs() {
        let note = Note::new();
        assert_eq!(
            note.ms_length(),
            Err(ScoreError::Uninitialized {
                index: 0,
                field: "length"
            })
        );
    }

    #[test]
    fn rest_detection_uses_the_ust_rest_lyric() {
        let mut note = Note::new();
        assert!(!note.is_rest());
        assert!(!note.is_sung());
        note.lyric = Some("R".to_string());
        assert!(note.is_rest());
        note.lyric = Some("あ".to_string());
        assert!(note.is_sung());
    }

    #[test]
    fn curve_vectors_clamp_elementwise() {
        let mut note = Note::new();
        note.set_pby(vec![500.0, -500.0, 30.0]);
        assert_eq!(note.pby().unwrap(), &[200.0, -200.0, 30.0]);
        note.set_pbw(vec![-1.0, 250.0]);
        assert_eq!(note.pbw().unwrap(), &[0.0, 250.0]);
    }

    #[test]
    fn serde_round_trip_preserves_a_populated_note() {
        let mut note = Note::new();
        note.lyric = Some("か".to_string());
        note.set_length(480);
        note.set_tempo(120.0);
        note.set_notenum(60);
        note.set_velocity(100);
        note.set_pbs(PitchBendStart::new(-40.0, 0.0));
        note.set_pbw(vec![250.0, 500.0]);
        note.set_pby(vec![100.0]);
        note.set_pbm(vec![PitchBendMode::Sine, PitchBendMode::Linear]);
        note.envelope = Some(Envelope::new(
            vec![0.0, 5.0, 35.0],
            vec![0.0, 100.0, 100.0, 0.0],
        ));
        note.vibrato = Some(Vibrato::new(65.0, 180.0, 35.0, 20.0, 20.0, 0.0, 0.0));

        let json = serde_json::to_string(&note).unwrap();
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }
}
