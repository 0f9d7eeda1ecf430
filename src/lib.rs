//! UST Editor Core
//!
//! The note parameter and pitch-curve computation engine of a UST (UTAU
//! score) editor: timing auto-fit, mode-2 pitch-bend editing, envelope
//! crossfade/normalization, vibrato selection, a two-stack undo/redo
//! manager, and the batch transformation pipeline. Rendering, UST text
//! parsing, voicebank lookup, and synthesis are external collaborators;
//! this crate consumes and returns finished `Vec<Note>` snapshots.

pub mod batch;
pub mod envelope_ops;
pub mod error;
pub mod models;
pub mod pitch;
pub mod scale;
pub mod timing;
pub mod undo;

// Re-export commonly used types
pub use error::ScoreError;
pub use models::{Envelope, Note, PitchBendMode, PitchBendStart, Vibrato};
pub use scale::is_note_in_scale;
pub use undo::{Command, History, Snapshot};
