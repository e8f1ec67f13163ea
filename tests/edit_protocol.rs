//! End-to-end exercises of the edit protocols: insert, remove, modify, and
//! the grid extent policy reacting to each.

use cantus::curve::Vibrato;
use cantus::data::{NoteData, VibratoParams};
use cantus::pitch::{Pitch, PitchClass};
use cantus::score::{ScoreEditor, ScoreError, MIN_MEASURES};

fn c4() -> Pitch {
    Pitch::new(PitchClass::C, 4)
}

fn note(position: u32, duration: u32) -> NoteData {
    NoteData::new(position, duration, c4(), "la")
}

/// Scenario A: first note into an empty timeline.
#[test]
fn insert_into_empty_timeline_sizes_the_grid() {
    let mut editor = ScoreEditor::new();
    let response = editor.add_note(note(0, 480)).unwrap();

    assert_eq!(editor.num_measures(), 4);
    assert!(response.prev.is_none());
    assert!(response.next.is_none());
    assert_eq!(response.note.duration, 480);
}

/// Scenario B: inserting inside a sounding note shortens it to touch.
#[test]
fn insert_truncates_the_previous_note() {
    let mut editor = ScoreEditor::new();
    editor.add_note(note(0, 480)).unwrap();
    let response = editor.add_note(note(100, 200)).unwrap();

    assert_eq!(editor.note(0).unwrap().duration(), 100);
    let prev = response.prev.unwrap();
    assert_eq!(prev.delta, 100);
    assert!(response.next.is_none());
}

/// Scenario C: removing the blocker restores the natural length.
#[test]
fn remove_restores_the_previous_note_to_full_length() {
    let mut editor = ScoreEditor::new();
    editor.add_note(note(0, 480)).unwrap();
    editor.add_note(note(100, 200)).unwrap();

    let response = editor.remove_note(100);

    assert_eq!(editor.note(0).unwrap().duration(), 480);
    assert_eq!(response.prev.unwrap().delta, 100);
    assert!(response.next.is_none());
}

/// Scenario D: occupied position fails and nothing changes.
#[test]
fn duplicate_insert_fails_without_mutation() {
    let mut editor = ScoreEditor::new();
    editor.add_note(note(0, 480)).unwrap();
    let before = editor.note_data(0).unwrap();

    let err = editor.add_note(note(0, 240)).unwrap_err();

    assert_eq!(err, ScoreError::NoteAlreadyExists { position: 0 });
    assert_eq!(editor.len(), 1);
    assert_eq!(editor.note_data(0).unwrap(), before);
    assert_eq!(editor.num_measures(), 4);
}

/// Scenario E: vibrato unit conversions over the window [1000, 1400].
#[test]
fn vibrato_conversions_match_the_ust_units() {
    let params = VibratoParams {
        length_percent: 100,
        cycle_ms: 200,
        amplitude: 20,
        phase_in: 10,
        phase_out: 10,
        phase_percent: 0,
        pitch_change: 0,
        freq_slope: 0,
    };
    let vibrato = Vibrato::new(1000.0, 1400.0, &params);

    assert_eq!(vibrato.apply(1000.0), 0.0);

    // Steady state at t = 1200: amplitude 2.0 tenths, frequency 2π/200.
    let frequency = 2.0 * std::f64::consts::PI / 200.0;
    let expected = 2.0 * (200.0 * frequency).sin();
    assert!((vibrato.apply(1200.0) - expected).abs() < 1e-9);

    // Zero just before the window and from its end onward.
    assert_eq!(vibrato.apply(999.0), 0.0);
    assert_eq!(vibrato.apply(1400.0), 0.0);
}

/// Removal between two notes stitches the previous note to the next one.
#[test]
fn remove_between_neighbors_stitches_exactly() {
    let mut editor = ScoreEditor::new();
    editor.add_note(note(0, 480)).unwrap();
    editor.add_note(note(480, 480)).unwrap();
    editor.add_note(note(1200, 480)).unwrap();

    editor.remove_note(480);

    // prev_delta (480) + next_delta (720) = 1200: reaches the next note.
    assert_eq!(editor.note(0).unwrap().duration(), 1200);
}

#[test]
fn remove_of_absent_position_changes_nothing() {
    let mut editor = ScoreEditor::new();
    editor.add_note(note(0, 480)).unwrap();
    let before: Vec<NoteData> = editor.notes().map(|(p, n)| n.data(p)).collect();
    let measures = editor.num_measures();

    let response = editor.remove_note(9600);

    assert!(response.prev.is_none());
    assert!(response.next.is_none());
    let after: Vec<NoteData> = editor.notes().map(|(p, n)| n.data(p)).collect();
    assert_eq!(before, after);
    assert_eq!(editor.num_measures(), measures);
}

#[test]
fn removing_the_last_note_resets_the_grid() {
    let mut editor = ScoreEditor::new();
    editor.add_note(note(19_200, 480)).unwrap();
    assert_eq!(editor.num_measures(), 14);

    editor.remove_note(19_200);

    assert!(editor.is_empty());
    assert_eq!(editor.num_measures(), MIN_MEASURES);
}

#[test]
fn removing_the_tail_shrinks_around_the_previous_note() {
    let mut editor = ScoreEditor::new();
    editor.add_note(note(0, 480)).unwrap();
    editor.add_note(note(19_200, 480)).unwrap();
    assert_eq!(editor.num_measures(), 14);

    editor.remove_note(19_200);

    // 4 buffer measures past the surviving note.
    assert_eq!(editor.num_measures(), 4);
    // No next neighbor anymore: natural length again.
    assert_eq!(editor.note(0).unwrap().duration(), 480);
}

/// The core invariant: no two sounding intervals ever overlap, across an
/// arbitrary mix of inserts and removes.
#[test]
fn intervals_never_overlap_across_edit_sequences() {
    let mut editor = ScoreEditor::new();
    let inserts = [
        (960, 480),
        (0, 1920),
        (480, 960),
        (240, 120),
        (1440, 960),
        (720, 480),
    ];
    for (position, duration) in inserts {
        let _ = editor.add_note(note(position, duration));
        assert_no_overlap(&editor);
    }
    for position in [480, 240, 960, 5000] {
        editor.remove_note(position);
        assert_no_overlap(&editor);
    }
}

fn assert_no_overlap(editor: &ScoreEditor) {
    let spans: Vec<(u32, u32)> = editor
        .notes()
        .map(|(position, n)| (position, position + n.duration()))
        .collect();
    for pair in spans.windows(2) {
        assert!(
            pair[0].1 <= pair[1].0,
            "note [{}, {}) overlaps note starting at {}",
            pair[0].0,
            pair[0].1,
            pair[1].0
        );
    }
}
