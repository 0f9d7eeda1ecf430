//! Batch transformation pipeline
//!
//! Whole-score transformations built on a shared template: a
//! [`BatchTransform`] produces a deep-copied, relinked result, and the
//! [`run`] driver registers exactly one undo/redo command for the whole
//! batch — or none at all when the input is empty or the transformation is
//! a structural no-op, so the history stays meaningful.

pub mod envelope_normalize;
pub mod lyric;
pub mod octave_shift;
pub mod pitch_snap;
pub mod preprocess;
pub mod quantize;
pub mod timing_apply;

pub use envelope_normalize::NormalizeEnvelopes;
pub use lyric::{Affix, DistributeLyrics, LyricToRest, StripAffix};
pub use octave_shift::OctaveShift;
pub use pitch_snap::SnapToScale;
pub use preprocess::{LyricStyle, Preprocess, PreprocessOptions, VibratoRule};
pub use quantize::Quantize;
pub use timing_apply::{ApplyAutofit, ApplyOto};

use crate::error::ScoreError;
use crate::models::note::Note;
use crate::models::score;
use crate::undo::{Command, History};

/// One whole-score transformation
///
/// `transform` never mutates its input; it returns a fresh sequence. The
/// driver relinks the result and handles command registration.
pub trait BatchTransform {
    /// Human-readable description used as the undo command summary
    fn summary(&self) -> String;

    /// Apply the transformation to a snapshot of the score
    fn transform(&self, notes: &[Note]) -> Result<Vec<Note>, ScoreError>;
}

/// Run a batch transformation and register its undo command
///
/// Empty input and no-op results return without touching the history.
/// The registered command is flagged `all` when the note count changed.
pub fn run(
    transform: &dyn BatchTransform,
    notes: &[Note],
    history: &mut History,
) -> Result<Vec<Note>, ScoreError> {
    if notes.is_empty() {
        log::debug!("batch `{}` skipped: empty input", transform.summary());
        return Ok(Vec::new());
    }

    let before: Vec<Note> = notes.to_vec();
    let mut after = transform.transform(&before)?;
    score::relink(&mut after);

    if after == before {
        log::debug!("batch `{}` skipped: structural no-op", transform.summary());
        return Ok(after);
    }

    let all = after.len() != before.len();
    history.register(Command::score(transform.summary(), all, before, after.clone()));
    Ok(after)
}
