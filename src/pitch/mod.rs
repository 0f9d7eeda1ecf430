//! Mode-2 pitch curve operations
//!
//! Control-point editing, programmatic pattern generators, and
//! snap-to-scale. Everything here clones its input Note and returns the
//! edited copy.

pub mod patterns;
pub mod portamento;
pub mod snap;

pub use patterns::{above_pitch, accent_pitch, below_pitch, reserve_pitch};
pub use portamento::{insert_point, remove_point, rotate_mode};
pub use snap::snap_note_to_scale;
