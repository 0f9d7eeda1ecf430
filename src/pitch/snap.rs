//! Snap pitch-bend heights to the nearest scale tone
//!
//! Rounds every interior control-point height to the semitone grid (10-unit
//! steps), maps it to an absolute pitch, and nudges off-scale results one
//! semitone toward their diatonic neighbor. Exact zero offsets — the note's
//! own pitch — are never snapped.

use crate::models::note::Note;
use crate::scale::{is_note_in_scale, snap_direction};

/// Height offset of one semitone in `pby` units
const SEMITONE: f64 = 10.0;

/// Return a copy of `note` with every `pby` height snapped to the scale on
/// `tone`. Notes without a pitch or curve are returned unchanged.
pub fn snap_note_to_scale(note: &Note, tone: i32, is_minor: bool) -> Note {
    let mut out = note.clone();
    let (Some(notenum), Some(pby)) = (note.notenum(), note.pby()) else {
        return out;
    };

    let snapped: Vec<f64> = pby
        .iter()
        .map(|&height| {
            let semis = (height / SEMITONE).round();
            let rounded = semis * SEMITONE;
            if rounded == 0.0 {
                return rounded;
            }
            let pitch = notenum + semis as i32;
            if is_note_in_scale(pitch, tone, is_minor) {
                rounded
            } else {
                let offset = (pitch - tone).rem_euclid(12);
                rounded + f64::from(snap_direction(offset)) * SEMITONE
            }
        })
        .collect();

    out.set_pby(snapped);
    out
}
