//! Core data structures for the UST editor
//!
//! The Note entity is the common currency passed between every other
//! component; the remaining types model its UST-domain sub-objects.

pub mod envelope;
pub mod note;
pub mod pitchbend;
pub mod score;
pub mod vibrato;

// Re-export commonly used types
pub use envelope::Envelope;
pub use note::Note;
pub use pitchbend::{PitchBendMode, PitchBendStart};
pub use vibrato::Vibrato;
