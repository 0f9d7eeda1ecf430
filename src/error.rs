//! Error types for the score editing core
//!
//! Precondition violations (reading derived values before their inputs are
//! initialized) fail fast instead of silently defaulting, because a silent
//! default would corrupt derived timing across the whole score.

use thiserror::Error;

/// Errors raised by core operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// A derived computation consumed a field that was never initialized
    #[error("note {index}: field `{field}` is not initialized")]
    Uninitialized { index: usize, field: &'static str },

    /// A note index fell outside the owning sequence
    #[error("note index {index} out of bounds (score has {len} notes)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A pitch-curve edit targeted a note without a mode-2 pitch bend
    #[error("note {index}: no mode-2 pitch bend to edit")]
    MissingPitchBend { index: usize },

    /// A control-point index fell outside the editable range of the curve
    #[error("control point {point} out of range ({segments} segments)")]
    PointOutOfRange { point: usize, segments: usize },
}
