//! Whole-score snap-to-scale

use crate::error::ScoreError;
use crate::models::note::Note;
use crate::pitch;

use super::BatchTransform;

/// Snap every note's pitch-bend heights to the scale on `tone`
pub struct SnapToScale {
    /// Tonic pitch class, 0 = C … 11 = B
    pub tone: i32,
    pub is_minor: bool,
}

impl BatchTransform for SnapToScale {
    fn summary(&self) -> String {
        format!(
            "snap pitch bends to {} {}",
            self.tone,
            if self.is_minor { "minor" } else { "major" }
        )
    }

    fn transform(&self, notes: &[Note]) -> Result<Vec<Note>, ScoreError> {
        Ok(notes
            .iter()
            .map(|note| pitch::snap_note_to_scale(note, self.tone, self.is_minor))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pitchbend::PitchBendMode;

    #[test]
    fn snaps_each_note_independently() {
        let mut note = Note::new();
        note.lyric = Some("か".to_string());
        note.set_notenum(60);
        note.set_pbw(vec![100.0, 100.0]);
        note.set_pby(vec![10.0]); // C# in C major
        note.set_pbm(vec![PitchBendMode::Sine; 2]);

        let out = SnapToScale {
            tone: 0,
            is_minor: false,
        }
        .transform(&[note])
        .unwrap();
        assert_eq!(out[0].pby().unwrap(), &[20.0]);
    }
}
