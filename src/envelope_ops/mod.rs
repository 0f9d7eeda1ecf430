//! Envelope operations: crossfade and normalization
//!
//! A crossfade writes the standard 4-level shape whose middle points follow
//! the overlap with the neighboring notes; normalization rescales envelopes
//! whose point offsets overflow the note's duration.

use crate::error::ScoreError;
use crate::models::envelope::Envelope;
use crate::models::note::Note;
use crate::models::score;

/// Fade-in width when no usable overlap with the previous note exists, ms
const DEFAULT_FADE_IN_MS: f64 = 5.0;
/// Fade-out width when no sung note follows, ms
const DEFAULT_FADE_OUT_MS: f64 = 35.0;

/// Compute the crossfade envelope for the note at `index`
///
/// `p2` is this note's overlap when it is non-negative and the previous
/// note is a sung note carrying an overlap of its own, else 5 ms. `p3` is
/// the note end minus the next note's overlap, falling back to 35 ms when
/// no sung note follows or its overlap is negative. Points are measured
/// from note start; the first point is fixed at 0.
pub fn crossfade(notes: &[Note], index: usize) -> Result<Note, ScoreError> {
    let note = notes.get(index).ok_or(ScoreError::IndexOutOfBounds {
        index,
        len: notes.len(),
    })?;
    let ms_length = note.ms_length()?;
    let mut out = note.clone();

    let p2 = match (note.overlap, score::prev_sung(notes, index)) {
        (Some(overlap), Some(prev)) if overlap >= 0.0 && prev.overlap.is_some() => overlap,
        _ => DEFAULT_FADE_IN_MS,
    };

    let fade_out = match score::next_sung(notes, index) {
        Some(next) => match next.overlap {
            Some(overlap) if overlap >= 0.0 => overlap,
            _ => DEFAULT_FADE_OUT_MS,
        },
        None => DEFAULT_FADE_OUT_MS,
    };
    let p3 = ms_length - fade_out;

    out.envelope = Some(Envelope::new(
        vec![0.0, p2, p3],
        vec![0.0, 100.0, 100.0, 0.0],
    ));
    Ok(out)
}

/// Rescale an overflowing envelope so its point-sum fits the note length
///
/// Every point is scaled by `ms_length / sum`, preserving relative ratios.
/// Rest notes and notes without an envelope are returned unchanged.
pub fn normalize(note: &Note) -> Result<Note, ScoreError> {
    let mut out = note.clone();
    if note.is_rest() {
        return Ok(out);
    }
    let Some(envelope) = &note.envelope else {
        return Ok(out);
    };

    let ms_length = note.ms_length()?;
    let sum = envelope.point_sum();
    if sum <= ms_length || sum == 0.0 {
        return Ok(out);
    }

    let factor = ms_length / sum;
    let rescaled = envelope.points().iter().map(|p| p * factor).collect();
    let mut env = envelope.clone();
    env.set_points(rescaled);
    out.envelope = Some(env);
    Ok(out)
}
