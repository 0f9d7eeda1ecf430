// Undo/redo round trips across point and batch operations

use ust_editor_core::batch::{self, OctaveShift, Quantize};
use ust_editor_core::models::score;
use ust_editor_core::pitch::insert_point;
use ust_editor_core::undo::Command;
use ust_editor_core::{History, Note, PitchBendMode};

fn sung(lyric: &str, notenum: i32) -> Note {
    let mut n = Note::new();
    n.lyric = Some(lyric.to_string());
    n.set_notenum(notenum);
    n.set_length(480);
    n.set_tempo(120.0);
    n
}

#[test]
fn point_operation_round_trips_through_history() {
    let mut note = sung("か", 60);
    note.set_pbw(vec![250.0, 500.0]);
    note.set_pby(vec![100.0]);
    note.set_pbm(vec![PitchBendMode::Sine; 2]);
    let mut notes = vec![note];
    score::relink(&mut notes);
    let pristine = notes.clone();

    let mut history = History::new();
    let edited = insert_point(&notes, 0, 0).unwrap();
    history.register(Command::note(
        "insert portamento point",
        0,
        notes[0].clone(),
        edited.clone(),
    ));
    notes[0] = edited.clone();

    history.undo().unwrap().apply(&mut notes);
    assert_eq!(notes, pristine);

    history.redo().unwrap().apply(&mut notes);
    assert_eq!(notes[0], edited);
}

#[test]
fn batch_round_trips_deep_equal() {
    let mut notes = vec![sung("か", 60), sung("き", 62), sung("さ", 64)];
    score::relink(&mut notes);
    let pristine = notes.clone();

    let mut history = History::new();
    let shifted = batch::run(&OctaveShift { delta_octaves: -1 }, &notes, &mut history).unwrap();
    assert_eq!(shifted[0].notenum(), Some(48));

    let mut restored = shifted.clone();
    history.undo().unwrap().apply(&mut restored);
    assert_eq!(restored, pristine);

    let mut replayed = restored;
    history.redo().unwrap().apply(&mut replayed);
    assert_eq!(replayed, shifted);
}

#[test]
fn count_changing_batch_is_flagged_for_cache_invalidation() {
    let mut short = sung("か", 60);
    short.set_length(50);
    let mut notes = vec![short, sung("き", 62)];
    score::relink(&mut notes);
    ust_editor_core::timing::autofit_score(&mut notes).unwrap();

    let mut history = History::new();
    let out = batch::run(
        &Quantize {
            step: 240,
            delete_zero_length: true,
        },
        &notes,
        &mut history,
    )
    .unwrap();
    assert_eq!(out.len(), 1);
    assert!(history.undo_all());

    // undo restores the deleted note and its index
    let mut restored = out;
    history.undo().unwrap().apply(&mut restored);
    assert_eq!(restored.len(), 2);
    assert_eq!(restored[1].index, 1);
}

#[test]
fn sequential_registration_keeps_replay_deterministic() {
    let mut notes = vec![sung("か", 60)];
    score::relink(&mut notes);

    let mut history = History::new();
    let step1 = batch::run(&OctaveShift { delta_octaves: 1 }, &notes, &mut history).unwrap();
    let step2 = batch::run(&OctaveShift { delta_octaves: 1 }, &step1, &mut history).unwrap();
    assert_eq!(step2[0].notenum(), Some(84));

    let mut cursor = step2.clone();
    history.undo().unwrap().apply(&mut cursor);
    assert_eq!(cursor, step1);
    history.undo().unwrap().apply(&mut cursor);
    assert_eq!(cursor, notes);
    history.redo().unwrap().apply(&mut cursor);
    assert_eq!(cursor, step1);
    history.redo().unwrap().apply(&mut cursor);
    assert_eq!(cursor, step2);
}
