//! The note parameter engine: timing auto-fit
//!
//! Reconciles the raw `preutter`/`overlap`/`stp` values against the previous
//! note's available duration and writes the clamped `at_*` parameters that
//! synthesis actually uses. Must be re-run for a note (and the note after it)
//! whenever `length`, `lyric`, `preutter`, `overlap`, `stp`, or `velocity`
//! changes.

use crate::error::ScoreError;
use crate::models::note::Note;
use crate::models::score;

/// Velocity-rate scaling: `2^((100 − velocity) / 100)`
///
/// An uninitialized velocity scales by 1.
pub fn velocity_rate(velocity: Option<i32>) -> f64 {
    match velocity {
        Some(v) => 2f64.powf(f64::from(100 - v) / 100.0),
        None => 1.0,
    }
}

/// Recompute `at_preutter`/`at_overlap`/`at_stp` for the note at `index`
///
/// Returns a new Note; the input sequence is untouched. Errors if the
/// previous note's `length`, `tempo`, or `lyric` was never initialized —
/// that is a programming-contract violation, not a user error.
pub fn autofit_note(notes: &[Note], index: usize) -> Result<Note, ScoreError> {
    let note = notes.get(index).ok_or(ScoreError::IndexOutOfBounds {
        index,
        len: notes.len(),
    })?;
    let mut out = note.clone();

    let rate = velocity_rate(note.velocity());
    let real_preutter = note.preutter.unwrap_or(0.0) * rate;
    let real_overlap = note.overlap.unwrap_or(0.0) * rate;
    let stp = note.stp.unwrap_or(0.0);

    let Some(prev) = score::prev(notes, index) else {
        out.at_preutter = Some(real_preutter);
        out.at_overlap = Some(real_overlap);
        out.at_stp = Some(stp);
        return Ok(out);
    };

    if prev.lyric.is_none() {
        return Err(ScoreError::Uninitialized {
            index: prev.index,
            field: "lyric",
        });
    }

    // Rest notes offer their full duration; sung notes only half, so the
    // consonant cannot devour the prior vowel.
    let window = prev.ms_length()? * if prev.is_rest() { 1.0 } else { 0.5 };

    if window < real_preutter - real_overlap {
        // The request overruns the available window: scale preutter and
        // overlap proportionally and push the shortfall into stp.
        let scale = window / (real_preutter - real_overlap);
        let at_preutter = real_preutter * scale;
        out.at_preutter = Some(at_preutter);
        out.at_overlap = Some(real_overlap * scale);
        out.at_stp = Some(stp + (real_preutter - at_preutter));
    } else {
        out.at_preutter = Some(real_preutter);
        out.at_overlap = Some(real_overlap);
        out.at_stp = Some(stp);
    }
    Ok(out)
}

/// Refresh the note at `index` and, because a lyric change can alter the
/// following consonant's timing, the note after it as well
pub fn recompute_at_params(notes: &mut [Note], index: usize) -> Result<(), ScoreError> {
    let updated = autofit_note(notes, index)?;
    notes[index] = updated;
    if index + 1 < notes.len() {
        let updated = autofit_note(notes, index + 1)?;
        notes[index + 1] = updated;
    }
    Ok(())
}

/// Refresh every note's `at_*` parameters in sequence order
pub fn autofit_score(notes: &mut [Note]) -> Result<(), ScoreError> {
    for index in 0..notes.len() {
        let updated = autofit_note(notes, index)?;
        notes[index] = updated;
    }
    Ok(())
}
