// Control-point editing scenarios on the mode-2 pitch curve

use ust_editor_core::models::pitchbend::PitchBendMode;
use ust_editor_core::models::score;
use ust_editor_core::pitch::{insert_point, remove_point, rotate_mode};
use ust_editor_core::Note;

fn curve_note(pbw: Vec<f64>, pby: Vec<f64>, pbm: Vec<PitchBendMode>) -> Note {
    let mut n = Note::new();
    n.lyric = Some("か".to_string());
    n.set_notenum(60);
    n.set_length(480);
    n.set_tempo(120.0);
    n.set_pbw(pbw);
    n.set_pby(pby);
    n.set_pbm(pbm);
    n
}

#[test]
fn portamento_insert_scenario() {
    // pbw=[250,500], pby=[100], pbm=["",""]; insert(0)
    let notes = vec![curve_note(
        vec![250.0, 500.0],
        vec![100.0],
        vec![PitchBendMode::Sine, PitchBendMode::Sine],
    )];
    let out = insert_point(&notes, 0, 0).unwrap();
    assert_eq!(out.pbw().unwrap(), &[125.0, 125.0, 500.0]);
    assert_eq!(out.pby().unwrap(), &[0.0, 100.0]);
    assert_eq!(out.pbm().unwrap(), &[PitchBendMode::Sine; 3]);
}

#[test]
fn portamento_remove_scenario() {
    // pbw=[150,250,350], pby=[50,100], pbm=["","s","r"]; remove(2)
    let note = curve_note(
        vec![150.0, 250.0, 350.0],
        vec![50.0, 100.0],
        vec![
            PitchBendMode::Sine,
            PitchBendMode::Linear,
            PitchBendMode::RSine,
        ],
    );
    let out = remove_point(&note, 2).unwrap();
    assert_eq!(out.pbw().unwrap(), &[150.0, 600.0]);
    assert_eq!(out.pby().unwrap(), &[50.0]);
    assert_eq!(
        out.pbm().unwrap(),
        &[PitchBendMode::Sine, PitchBendMode::RSine]
    );
}

#[test]
fn operations_never_mutate_their_input() {
    let mut notes = vec![curve_note(
        vec![250.0, 500.0],
        vec![100.0],
        vec![PitchBendMode::Sine, PitchBendMode::Sine],
    )];
    score::relink(&mut notes);
    let pristine = notes.clone();

    insert_point(&notes, 0, 0).unwrap();
    remove_point(&notes[0], 1).unwrap();
    rotate_mode(&notes[0], 1);
    assert_eq!(notes, pristine);
}

#[test]
fn arity_invariant_survives_any_edit_sequence() {
    let mut notes = vec![curve_note(
        vec![250.0, 500.0],
        vec![100.0],
        vec![PitchBendMode::Sine, PitchBendMode::Sine],
    )];
    score::relink(&mut notes);

    let mut note = insert_point(&notes, 0, 0).unwrap();
    assert!(note.pitchbend_arity_ok());
    note = insert_point(&[note.clone()], 0, 3).unwrap(); // append at the end
    assert!(note.pitchbend_arity_ok());
    note = rotate_mode(&note, 2);
    assert!(note.pitchbend_arity_ok());
    note = remove_point(&note, 1).unwrap();
    assert!(note.pitchbend_arity_ok());
    note = remove_point(&note, 1).unwrap();
    assert!(note.pitchbend_arity_ok());
}
