//! Diatonic scale membership
//!
//! Pure predicates over semitone offsets, used by the pitch-pattern
//! generators and the snap-to-scale batch process.

/// Major scale intervals from the tonic
const MAJOR_INTERVALS: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];
/// Natural minor scale intervals from the tonic
const MINOR_INTERVALS: [i32; 7] = [0, 2, 3, 5, 7, 8, 10];

/// Whether `notenum` belongs to the major or natural-minor scale on `tone`
///
/// `tone` is the tonic pitch class (0 = C … 11 = B). Pure and total.
pub fn is_note_in_scale(notenum: i32, tone: i32, is_minor: bool) -> bool {
    let note_in_octave = notenum.rem_euclid(12);
    let offset = (note_in_octave - tone.rem_euclid(12)).rem_euclid(12);
    let intervals = if is_minor {
        &MINOR_INTERVALS
    } else {
        &MAJOR_INTERVALS
    };
    intervals.contains(&offset)
}

/// Snap direction for an off-scale offset from the tonic, in semitones
///
/// Fixed interval table: each off-scale interval moves one semitone toward
/// its diatonic neighbor (minor 2nd → major 2nd, major 3rd → minor 3rd, …,
/// major 7th → minor 7th). In-scale offsets return 0.
pub(crate) fn snap_direction(offset: i32) -> i32 {
    match offset.rem_euclid(12) {
        1 | 3 | 6 | 8 | 10 => 1,
        4 | 9 | 11 => -1,
        _ => 0,
    }
}
