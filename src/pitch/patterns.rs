//! Programmatic pitch-pattern generators
//!
//! Each generator fully overwrites the note's mode-2 curve with a fixed-arity
//! shape reaching toward a nearby scale tone: a scoop from below, an approach
//! from above, a short accent grace, or a held-back ("reserve") rise. Rest
//! notes are returned unchanged.

use crate::error::ScoreError;
use crate::models::note::Note;
use crate::models::pitchbend::{PitchBendMode, PitchBendStart};
use crate::models::score;
use crate::scale::is_note_in_scale;

/// Height offset of one semitone in `pby` units
const SEMITONE: f64 = 10.0;

/// Sixteenth-note duration in ms at `tempo`
fn sixteenth_ms(tempo: f64) -> f64 {
    60.0 / tempo / 480.0 * 120.0 * 1000.0
}

/// Thirty-second-note duration in ms at `tempo`
fn thirty_second_ms(tempo: f64) -> f64 {
    30.0 / tempo / 480.0 * 120.0 * 1000.0
}

/// Pick the in-scale candidate offset (in semitones from `notenum`),
/// defaulting to the second candidate when both are off-scale
fn scale_offset(notenum: i32, candidates: [i32; 2], tone: i32, is_minor: bool) -> i32 {
    if is_note_in_scale(notenum + candidates[0], tone, is_minor) {
        candidates[0]
    } else {
        candidates[1]
    }
}

/// Curve start time and whether the note begins a phrase
///
/// The curve starts a sixteenth note (capped at half the previous note's
/// duration) before the note; at a phrase start it begins at the auto-fit
/// preutterance instead.
fn pattern_start(notes: &[Note], index: usize, tempo: f64) -> Result<(f64, bool), ScoreError> {
    match score::prev_sung(notes, index) {
        Some(prev) => {
            let time = -sixteenth_ms(tempo).min(prev.ms_length()? / 2.0);
            Ok((time, false))
        }
        None => {
            let note = &notes[index];
            Ok((-note.at_preutter().unwrap_or(0.0), true))
        }
    }
}

fn write_curve(
    note: &Note,
    pbs_time: f64,
    phrase_start: bool,
    pbw: Vec<f64>,
    pby: Vec<f64>,
) -> Note {
    let mut out = note.clone();
    let pbs_height = if phrase_start {
        pby.first().copied().unwrap_or(0.0)
    } else {
        0.0
    };
    out.set_pbs(PitchBendStart::new(pbs_time, pbs_height));
    out.set_pbm(vec![PitchBendMode::Sine; pbw.len()]);
    out.set_pbw(pbw);
    out.set_pby(pby);
    out
}

fn pattern_inputs(notes: &[Note], index: usize) -> Result<Option<(f64, i32)>, ScoreError> {
    let note = notes.get(index).ok_or(ScoreError::IndexOutOfBounds {
        index,
        len: notes.len(),
    })?;
    if note.is_rest() {
        return Ok(None);
    }
    let tempo = note.tempo().ok_or(ScoreError::Uninitialized {
        index,
        field: "tempo",
    })?;
    let notenum = note.notenum().ok_or(ScoreError::Uninitialized {
        index,
        field: "notenum",
    })?;
    Ok(Some((tempo, notenum)))
}

/// Scoop: rise from the nearest in-scale third below (2 segments)
pub fn below_pitch(
    notes: &[Note],
    index: usize,
    tone: i32,
    is_minor: bool,
) -> Result<Note, ScoreError> {
    let Some((tempo, notenum)) = pattern_inputs(notes, index)? else {
        return Ok(notes[index].clone());
    };
    let (pbs_time, phrase_start) = pattern_start(notes, index, tempo)?;
    let height = f64::from(scale_offset(notenum, [-3, -4], tone, is_minor)) * SEMITONE;
    let pbw = vec![pbs_time.abs(), sixteenth_ms(tempo)];
    Ok(write_curve(
        &notes[index],
        pbs_time,
        phrase_start,
        pbw,
        vec![height],
    ))
}

/// Fall-in: settle from the nearest in-scale third above (2 segments)
pub fn above_pitch(
    notes: &[Note],
    index: usize,
    tone: i32,
    is_minor: bool,
) -> Result<Note, ScoreError> {
    let Some((tempo, notenum)) = pattern_inputs(notes, index)? else {
        return Ok(notes[index].clone());
    };
    let (pbs_time, phrase_start) = pattern_start(notes, index, tempo)?;
    let height = f64::from(scale_offset(notenum, [3, 4], tone, is_minor)) * SEMITONE;
    let pbw = vec![pbs_time.abs(), sixteenth_ms(tempo)];
    Ok(write_curve(
        &notes[index],
        pbs_time,
        phrase_start,
        pbw,
        vec![height],
    ))
}

/// Accent: a quick grace from the second below, resolved within a
/// thirty-second note (3 segments)
pub fn accent_pitch(
    notes: &[Note],
    index: usize,
    tone: i32,
    is_minor: bool,
) -> Result<Note, ScoreError> {
    let Some((tempo, notenum)) = pattern_inputs(notes, index)? else {
        return Ok(notes[index].clone());
    };
    let (pbs_time, phrase_start) = pattern_start(notes, index, tempo)?;
    let height = f64::from(scale_offset(notenum, [-2, -1], tone, is_minor)) * SEMITONE;
    let t32 = thirty_second_ms(tempo);
    let pbw = vec![pbs_time.abs(), t32, t32];
    Ok(write_curve(
        &notes[index],
        pbs_time,
        phrase_start,
        pbw,
        vec![height, 0.0],
    ))
}

/// Reserve: hold the second below through a sixteenth, then rise late
/// (4 segments)
pub fn reserve_pitch(
    notes: &[Note],
    index: usize,
    tone: i32,
    is_minor: bool,
) -> Result<Note, ScoreError> {
    let Some((tempo, notenum)) = pattern_inputs(notes, index)? else {
        return Ok(notes[index].clone());
    };
    let (pbs_time, phrase_start) = pattern_start(notes, index, tempo)?;
    let height = f64::from(scale_offset(notenum, [-2, -1], tone, is_minor)) * SEMITONE;
    let t32 = thirty_second_ms(tempo);
    let pbw = vec![pbs_time.abs(), sixteenth_ms(tempo), t32, t32];
    Ok(write_curve(
        &notes[index],
        pbs_time,
        phrase_start,
        pbw,
        vec![height, height, 0.0],
    ))
}
