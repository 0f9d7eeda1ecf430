//! Copy derived timing back into the editable fields

use crate::error::ScoreError;
use crate::models::note::Note;
use crate::timing;

use super::BatchTransform;

/// Copy the cached oto record's preutterance and overlap into the editable
/// `preutter`/`overlap` fields
///
/// Only checks that an oto record is present; rest notes are not
/// special-cased.
pub struct ApplyOto;

impl BatchTransform for ApplyOto {
    fn summary(&self) -> String {
        "apply oto timing".to_string()
    }

    fn transform(&self, notes: &[Note]) -> Result<Vec<Note>, ScoreError> {
        let mut out: Vec<Note> = notes
            .iter()
            .map(|note| {
                let mut n = note.clone();
                if note.has_oto_record() {
                    n.preutter = note.oto_preutter;
                    n.overlap = note.oto_overlap;
                }
                n
            })
            .collect();
        timing::autofit_score(&mut out)?;
        Ok(out)
    }
}

/// Freeze the auto-fit outputs into the editable fields
pub struct ApplyAutofit;

impl BatchTransform for ApplyAutofit {
    fn summary(&self) -> String {
        "apply auto-fit timing".to_string()
    }

    fn transform(&self, notes: &[Note]) -> Result<Vec<Note>, ScoreError> {
        let mut out: Vec<Note> = notes
            .iter()
            .map(|note| {
                let mut n = note.clone();
                if note.at_preutter().is_some() {
                    n.preutter = note.at_preutter();
                }
                if note.at_overlap().is_some() {
                    n.overlap = note.at_overlap();
                }
                if note.at_stp().is_some() {
                    n.stp = note.at_stp();
                }
                n
            })
            .collect();
        timing::autofit_score(&mut out)?;
        Ok(out)
    }
}
