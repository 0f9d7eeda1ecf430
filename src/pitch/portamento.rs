//! Control-point editing on the mode-2 pitch curve
//!
//! All operations clone the target Note and return the copy with
//! `pbs`/`pby`/`pbw`/`pbm` consistently resized. Control point 0 is the
//! curve's start boundary (its height lives in `pbs`); interior points
//! carry `pby` heights; segment `k` runs from point `k` to point `k + 1`
//! with duration `pbw[k]` and mode `pbm[k]`.

use crate::error::ScoreError;
use crate::models::note::Note;
use crate::models::pitchbend::PitchBendMode;
use crate::models::score;

/// Default duration of a segment appended at the curve's end, in ms
const APPENDED_SEGMENT_MS: f64 = 10.0;

/// Height offset of one semitone in `pby` units
const SEMITONE: f64 = 10.0;

/// Materialize the curve arrays, defaulting missing `pby`/`pbm` to
/// length-appropriate zero/`Sine` vectors. A missing `pbw` means there is
/// no curve to edit and errors.
fn curve_parts(note: &Note) -> Result<(Vec<f64>, Vec<f64>, Vec<PitchBendMode>), ScoreError> {
    let pbw = note
        .pbw()
        .filter(|w| !w.is_empty())
        .ok_or(ScoreError::MissingPitchBend { index: note.index })?
        .to_vec();
    let mut pby = note.pby().map(<[f64]>::to_vec).unwrap_or_default();
    pby.resize(pbw.len().saturating_sub(1), 0.0);
    let mut pbm = note.pbm().map(<[PitchBendMode]>::to_vec).unwrap_or_default();
    pbm.resize(pbw.len(), PitchBendMode::Sine);
    Ok((pbw, pby, pbm))
}

fn midpoint(a: f64, b: f64) -> f64 {
    let diff = a - b;
    diff.abs() / 2.0 + a.min(b)
}

/// Insert a control point at `point` on the note at `index`
///
/// - `point == 0`: halves the first segment and prepends a point. When the
///   previous note is sung, the new height is the midpoint between the
///   previous note's pitch delta and the old first interior height;
///   otherwise it is the existing `pbs` height.
/// - `point` past the last point: appends a 10 ms segment with height 0.
/// - otherwise: splits the segment ending at `point` in two, the new height
///   being the midpoint of the segment's endpoint heights.
pub fn insert_point(notes: &[Note], index: usize, point: usize) -> Result<Note, ScoreError> {
    let note = notes.get(index).ok_or(ScoreError::IndexOutOfBounds {
        index,
        len: notes.len(),
    })?;
    let mut out = note.clone();
    let (mut pbw, mut pby, mut pbm) = curve_parts(note)?;

    if point == 0 {
        let half = pbw[0] / 2.0;
        pbw[0] = half;
        pbw.insert(0, half);

        let pbs_height = note.pbs().map(|p| p.height()).unwrap_or(0.0);
        let height = match (score::prev_sung(notes, index), note.notenum()) {
            (Some(prev), Some(notenum)) => {
                let delta = match prev.notenum() {
                    Some(prev_num) => f64::from(prev_num - notenum) * SEMITONE,
                    None => pbs_height,
                };
                midpoint(delta, pby.first().copied().unwrap_or(0.0))
            }
            _ => pbs_height,
        };
        pby.insert(0, height);
        pbm.insert(0, PitchBendMode::Sine);
    } else if point >= pbw.len() {
        pbw.push(APPENDED_SEGMENT_MS);
        pby.push(0.0);
        pbm.push(PitchBendMode::Sine);
    } else {
        let half = pbw[point - 1] / 2.0;
        pbw[point - 1] = half;
        pbw.insert(point, half);

        let left = if point == 1 {
            note.pbs().map(|p| p.height()).unwrap_or(0.0)
        } else {
            pby[point - 2]
        };
        let right = pby[point - 1];
        pby.insert(point - 1, midpoint(left, right));
        pbm.insert(point - 1, PitchBendMode::Sine);
    }

    out.set_pbw(pbw);
    out.set_pby(pby);
    out.set_pbm(pbm);
    Ok(out)
}

/// Remove the control point at `point`, merging its two adjacent segments
///
/// The start boundary (point 0) and the final point cannot be removed; the
/// call sites disable both, so an out-of-range request is an error here.
pub fn remove_point(note: &Note, point: usize) -> Result<Note, ScoreError> {
    let mut out = note.clone();
    let (mut pbw, mut pby, mut pbm) = curve_parts(note)?;

    if point == 0 || point >= pbw.len() {
        return Err(ScoreError::PointOutOfRange {
            point,
            segments: pbw.len(),
        });
    }

    pbw[point - 1] += pbw[point];
    pbw.remove(point);
    pby.remove(point - 1);
    pbm.remove(point - 1);

    out.set_pbw(pbw);
    out.set_pby(pby);
    out.set_pbm(pbm);
    Ok(out)
}

/// Cycle the interpolation mode of the segment ending at `point`
///
/// Point 0 has no incoming segment and the call site disables it; an
/// out-of-range point leaves the note unchanged.
pub fn rotate_mode(note: &Note, point: usize) -> Note {
    let mut out = note.clone();
    let Ok((pbw, pby, mut pbm)) = curve_parts(note) else {
        return out;
    };
    if point == 0 || point > pbm.len() {
        return out;
    }
    pbm[point - 1] = pbm[point - 1].rotated();
    out.set_pbw(pbw);
    out.set_pby(pby);
    out.set_pbm(pbm);
    out
}
