//! Benchmarks for curve evaluation and structural edits.
//!
//! Run with: cargo bench
//!
//! Curve evaluation sits on the overlay-drawing path (one call per drawn
//! pixel column), so it is measured per-evaluation across a dense sweep.
//! Edit benchmarks measure the full insert/remove protocol including
//! neighbor truncation and curve recomputation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use cantus::curve::{pitch_offset_at, CurveShape, PitchMutation, PortamentoSegment, Vibrato};
use cantus::data::{NoteData, PitchbendData, VibratoParams};
use cantus::pitch::{Pitch, PitchClass};
use cantus::score::ScoreEditor;

/// Sweep densities, in evaluations per note.
const SWEEP_SIZES: &[usize] = &[64, 256, 1024];

fn bench_curve_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve/evaluate");

    let vibrato = Vibrato::new(0.0, 2000.0, &VibratoParams::default());
    let glide = PortamentoSegment::new(-40.0, 120.0, -20.0, 0.0, CurveShape::SCurve);
    let mutations = vec![
        PitchMutation::Portamento(glide),
        PitchMutation::Vibrato(vibrato),
    ];

    for &size in SWEEP_SIZES {
        group.bench_with_input(BenchmarkId::new("sweep", size), &size, |b, &size| {
            b.iter(|| {
                let mut total = 0.0;
                for i in 0..size {
                    let at = 2000.0 * i as f64 / size as f64;
                    total += pitch_offset_at(black_box(&mutations), black_box(at));
                }
                total
            })
        });
    }

    group.finish();
}

fn bench_edit_protocol(c: &mut Criterion) {
    let mut group = c.benchmark_group("score/edit");

    let pitch = Pitch::new(PitchClass::A, 4);
    let pitchbend = PitchbendData::new(-20.0, vec![80.0])
        .with_vibrato(VibratoParams::default());

    // Insert N notes back to front (every insert has a next neighbor to
    // truncate against), then remove them all.
    for &count in &[16u32, 128] {
        group.bench_with_input(BenchmarkId::new("insert_remove", count), &count, |b, &count| {
            b.iter(|| {
                let mut editor = ScoreEditor::new();
                for i in (0..count).rev() {
                    let data = NoteData::new(i * 480, 960, pitch, "la")
                        .with_pitchbend(pitchbend.clone());
                    editor.add_note(black_box(data)).unwrap();
                }
                for i in 0..count {
                    editor.remove_note(black_box(i * 480));
                }
                editor
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_curve_eval, bench_edit_protocol);
criterion_main!(benches);
