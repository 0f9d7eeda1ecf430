//! Whole-score octave shift

use crate::error::ScoreError;
use crate::models::note::Note;

use super::BatchTransform;

/// Shift every pitched note by whole octaves; `notenum` is re-clamped to
/// the 24–107 domain by the setter
pub struct OctaveShift {
    pub delta_octaves: i32,
}

impl BatchTransform for OctaveShift {
    fn summary(&self) -> String {
        format!("shift {:+} octave(s)", self.delta_octaves)
    }

    fn transform(&self, notes: &[Note]) -> Result<Vec<Note>, ScoreError> {
        Ok(notes
            .iter()
            .map(|note| {
                let mut out = note.clone();
                if let Some(notenum) = note.notenum() {
                    out.set_notenum(notenum + 12 * self.delta_octaves);
                }
                out
            })
            .collect())
    }
}
