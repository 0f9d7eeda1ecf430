//! Whole-score envelope normalization

use crate::envelope_ops;
use crate::error::ScoreError;
use crate::models::note::Note;

use super::BatchTransform;

/// Rescale every overflowing envelope to fit its note's duration
pub struct NormalizeEnvelopes;

impl BatchTransform for NormalizeEnvelopes {
    fn summary(&self) -> String {
        "normalize envelopes".to_string()
    }

    fn transform(&self, notes: &[Note]) -> Result<Vec<Note>, ScoreError> {
        notes.iter().map(envelope_ops::normalize).collect()
    }
}
