//! Length quantization

use crate::error::ScoreError;
use crate::models::note::Note;
use crate::timing;

use super::BatchTransform;

/// Round every note length to the nearest multiple of `step` ticks,
/// optionally deleting notes that quantize to zero
pub struct Quantize {
    pub step: i32,
    pub delete_zero_length: bool,
}

impl BatchTransform for Quantize {
    fn summary(&self) -> String {
        format!("quantize lengths to {} ticks", self.step)
    }

    fn transform(&self, notes: &[Note]) -> Result<Vec<Note>, ScoreError> {
        if self.step <= 0 {
            return Ok(notes.to_vec());
        }
        let step = f64::from(self.step);
        let mut out: Vec<Note> = notes
            .iter()
            .map(|note| {
                let mut n = note.clone();
                if let Some(length) = note.length() {
                    let quantized = (f64::from(length) / step).round() * step;
                    n.set_length(quantized as i32);
                }
                n
            })
            .collect();
        if self.delete_zero_length {
            out.retain(|n| n.length() != Some(0));
        }
        timing::autofit_score(&mut out)?;
        Ok(out)
    }
}
