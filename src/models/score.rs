//! Sequence-level helpers over the owning `Vec<Note>`
//!
//! Neighbor access is index-based lookup into the owning slice. The sequence
//! owns all Notes; `index` is derived and must be recomputed with [`relink`]
//! whenever the sequence is spliced.

use super::note::Note;

/// Reassign `index` on every note after a structural change
pub fn relink(notes: &mut [Note]) {
    for (i, note) in notes.iter_mut().enumerate() {
        note.index = i;
    }
}

/// The note before `index`, if any
pub fn prev(notes: &[Note], index: usize) -> Option<&Note> {
    index.checked_sub(1).and_then(|i| notes.get(i))
}

/// The note after `index`, if any
pub fn next(notes: &[Note], index: usize) -> Option<&Note> {
    notes.get(index + 1)
}

/// The previous note when it is a sung (non-rest, initialized) lyric note
pub fn prev_sung(notes: &[Note], index: usize) -> Option<&Note> {
    prev(notes, index).filter(|n| n.is_sung())
}

/// The next note when it is a sung (non-rest, initialized) lyric note
pub fn next_sung(notes: &[Note], index: usize) -> Option<&Note> {
    next(notes, index).filter(|n| n.is_sung())
}
