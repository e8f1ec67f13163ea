use std::collections::BTreeMap;

use log::warn;

use crate::curve::{PitchMutation, PortamentoSegment, Vibrato};
use crate::data::{AddResponse, NeighborInfo, NoteData, RemoveResponse};
use crate::COL_TICKS;

use super::extent::{GridExtent, MIN_MEASURES};
use super::note::Note;
use super::notemap::NoteMap;
use super::ScoreError;

/*
Overlap Resolution
==================

Notes on the timeline may not overlap: a note's sounding interval
[position, position + duration) must stop where the next note begins.
The editor enforces this at the only two points where it can break —
insertion and removal — by adjusting the DURATIONS of the notes around the
edit, never their positions.

Insert at P:                         Remove at P:

  prev ──────────────┐                 prev ────┐   next
        new ─────────┼──┐     ──→      prev ────┴───┘
  prev ──┤new ───────┘  │              (prev reaches to next again)
         └─ truncated to touch

Each structural edit is one atomic transaction: the failure cases
(occupied position, out-of-range pitch) are checked before anything
mutates, and every step after that is infallible. A half-applied edit
would leave overlapping notes, which no caller can recover from.

Durations feed the curve windows (a vibrato occupies the tail of its
note), and a note's portamento departs from its previous neighbor's
pitch. So whenever a duration or adjacency changes, the affected notes'
mutation lists are re-derived, and the response names those neighbors so
the caller's mirror copy can do the same.
*/

/// Milliseconds per tick at the given tempo (480 ticks per quarter note).
fn ms_per_tick(tempo_bpm: f64) -> f64 {
    60_000.0 / (tempo_bpm * COL_TICKS as f64)
}

/// The editing session: timeline store, derived curves, grid extent, and
/// the current selection.
///
/// Single-threaded and synchronous — every edit runs to completion before
/// the next is accepted.
#[derive(Debug, Clone)]
pub struct ScoreEditor {
    notes: NoteMap,
    /// Derived pitch mutations per note position, rebuilt whenever the
    /// owning note or an adjacent note changes. Replaced, never mutated.
    curves: BTreeMap<u32, Vec<PitchMutation>>,
    extent: GridExtent,
    selection: Option<u32>,
    tempo_bpm: f64,
}

impl ScoreEditor {
    pub fn new() -> Self {
        Self::with_tempo(120.0)
    }

    pub fn with_tempo(tempo_bpm: f64) -> Self {
        Self {
            notes: NoteMap::new(),
            curves: BTreeMap::new(),
            extent: GridExtent::new(),
            selection: None,
            tempo_bpm,
        }
    }

    pub fn tempo_bpm(&self) -> f64 {
        self.tempo_bpm
    }

    /// Change the tempo. Curve windows live in milliseconds, so every
    /// mutation list is re-derived.
    pub fn set_tempo(&mut self, tempo_bpm: f64) {
        self.tempo_bpm = tempo_bpm;
        let positions: Vec<u32> = self.notes.iter().map(|(p, _)| p).collect();
        for position in positions {
            self.rebuild_curve(position);
        }
    }

    /// Insert a note, resolving overlaps with both neighbors.
    ///
    /// Fails with the store untouched when the position is occupied or the
    /// pitch is off the grid. On success the response carries the note as
    /// stored (its duration may have been truncated against the next
    /// neighbor) and the neighbors whose curves were recomputed: the
    /// previous note when it was shortened to touch the new one, and the
    /// next note whenever there is one — its glide now departs from the
    /// new note's pitch.
    pub fn add_note(&mut self, data: NoteData) -> Result<AddResponse, ScoreError> {
        if !data.pitch.in_range() {
            return Err(ScoreError::PitchOutOfRange { pitch: data.pitch });
        }
        let position = data.position;
        self.notes.insert(position, Note::from_data(&data))?;

        // Previous neighbor: shorten it to touch the new note if it
        // currently sounds past us.
        let prev = self
            .notes
            .previous(position)
            .map(|(p, note)| (p, note.duration()));
        let mut prev_info = None;
        if let Some((prev_position, prev_duration)) = prev {
            let prev_delta = position - prev_position;
            if prev_delta < prev_duration {
                let prev_note = self
                    .notes
                    .get_mut(prev_position)
                    .expect("previous neighbor vanished during insert");
                prev_note.truncate(prev_delta);
                prev_info = Some(NeighborInfo {
                    delta: prev_delta,
                    envelope: prev_note.envelope().cloned(),
                    pitchbend: prev_note.pitchbend().cloned(),
                });
                self.rebuild_curve(prev_position);
            }
        }

        // Next neighbor: the new note must stop where it begins.
        let next_position = self.notes.next(position).map(|(p, _)| p);
        let mut next_info = None;
        match next_position {
            Some(next_position) => {
                let next_delta = next_position - position;
                if next_delta < data.duration {
                    self.notes
                        .get_mut(position)
                        .expect("note vanished during its own insert")
                        .truncate(next_delta);
                }
                let next_note = self
                    .notes
                    .get(next_position)
                    .expect("next neighbor vanished during insert");
                next_info = Some(NeighborInfo {
                    delta: next_delta,
                    envelope: next_note.envelope().cloned(),
                    pitchbend: next_note.pitchbend().cloned(),
                });
            }
            None => {
                // New last note: the grid must cover it plus buffer.
                self.extent
                    .set_extent(GridExtent::required_measures(position));
            }
        }

        // Re-derive curves with the current pitch on each side.
        self.rebuild_curve(position);
        if let Some(next_position) = next_position {
            self.rebuild_curve(next_position);
        }

        let note = self
            .notes
            .get(position)
            .expect("note vanished during its own insert");
        Ok(AddResponse {
            note: note.data(position),
            prev: prev_info,
            next: next_info,
        })
    }

    /// Remove the note at `position`, re-stitching its neighbors.
    ///
    /// Removing an empty position changes nothing. With both neighbors
    /// present the previous note reaches exactly to the next one; with
    /// only a previous neighbor it restores its natural length and the
    /// grid shrinks back around it.
    pub fn remove_note(&mut self, position: u32) -> RemoveResponse {
        if self.notes.remove(position).is_none() {
            return RemoveResponse {
                prev: None,
                next: None,
            };
        }
        self.curves.remove(&position);
        if self.selection == Some(position) {
            self.selection = None;
        }

        let prev_position = self.notes.previous(position).map(|(p, _)| p);
        let next_position = self.notes.next(position).map(|(p, _)| p);

        let mut prev_info = None;
        if let Some(prev_position) = prev_position {
            let prev_delta = position - prev_position;
            let prev_note = self
                .notes
                .get_mut(prev_position)
                .expect("previous neighbor vanished during remove");
            match next_position {
                Some(next_position) => {
                    // The removed note no longer blocks: reach to the next.
                    prev_note.stretch_to(prev_delta + (next_position - position));
                }
                None => {
                    prev_note.restore_full();
                }
            }
            self.rebuild_curve(prev_position);
            let prev_note = self
                .notes
                .get(prev_position)
                .expect("previous neighbor vanished during remove");
            prev_info = Some(NeighborInfo {
                delta: prev_delta,
                envelope: prev_note.envelope().cloned(),
                pitchbend: prev_note.pitchbend().cloned(),
            });
            if next_position.is_none() {
                // Keep 4 buffer measures past the new last note.
                self.extent
                    .set_extent(GridExtent::required_measures(prev_position));
            }
        }

        let mut next_info = None;
        if let Some(next_position) = next_position {
            // The glide into the next note departs from a different pitch now.
            self.rebuild_curve(next_position);
            let next_note = self
                .notes
                .get(next_position)
                .expect("next neighbor vanished during remove");
            next_info = Some(NeighborInfo {
                delta: next_position - position,
                envelope: next_note.envelope().cloned(),
                pitchbend: next_note.pitchbend().cloned(),
            });
        }

        if self.notes.is_empty() {
            self.extent.set_extent(MIN_MEASURES);
        }

        RemoveResponse {
            prev: prev_info,
            next: next_info,
        }
    }

    /// Non-structural update: pitch, lyric, envelope, pitchbend, vibrato.
    ///
    /// Positions, durations, and neighbors are untouched, and only this
    /// note's own mutation list is re-derived. If the note is a glide
    /// endpoint for a neighbor, refreshing that neighbor's curve is the
    /// caller's responsibility (call [`ScoreEditor::rebuild_curve`]).
    pub fn modify_note(&mut self, data: NoteData) -> Result<(), ScoreError> {
        if !data.pitch.in_range() {
            return Err(ScoreError::PitchOutOfRange { pitch: data.pitch });
        }
        let position = data.position;
        match self.notes.get_mut(position) {
            Some(note) => {
                note.update(&data);
                self.rebuild_curve(position);
                Ok(())
            }
            None => {
                warn!("modify at position {} ignored: no note there", position);
                Ok(())
            }
        }
    }

    /// Bulk load from external project data.
    ///
    /// Duplicate positions are logged and skipped rather than failing the
    /// whole load; overlapping durations are truncated the same way the
    /// insert protocol would have. Curves are derived once the structure
    /// is settled.
    pub fn load_notes(&mut self, notes: Vec<NoteData>) {
        self.clear();
        for data in notes {
            if !data.pitch.in_range() {
                warn!(
                    "skipping note at position {}: pitch {} is off the grid",
                    data.position, data.pitch
                );
                continue;
            }
            let note = Note::from_data(&data);
            if self.notes.insert(data.position, note).is_err() {
                warn!(
                    "project data holds two notes at position {}; keeping the first",
                    data.position
                );
            }
        }

        let positions: Vec<u32> = self.notes.iter().map(|(p, _)| p).collect();
        for pair in positions.windows(2) {
            let delta = pair[1] - pair[0];
            let note = self
                .notes
                .get_mut(pair[0])
                .expect("loaded note vanished before overlap pass");
            if note.duration() > delta {
                note.truncate(delta);
            }
        }
        if let Some(last) = self.notes.last_position() {
            self.extent.set_extent(GridExtent::required_measures(last));
        }
        for position in positions {
            self.rebuild_curve(position);
        }
    }

    /// Drop every note and reset the grid to its minimum.
    pub fn clear(&mut self) {
        self.notes.clear();
        self.curves.clear();
        self.selection = None;
        self.extent.set_extent(MIN_MEASURES);
    }

    /// Re-derive the mutation list for the note at `position` from its
    /// pitchbend data and the current pitch of its previous neighbor.
    pub fn rebuild_curve(&mut self, position: u32) {
        let Some(note) = self.notes.get(position) else {
            self.curves.remove(&position);
            return;
        };
        let note_num = note.pitch().note_num();
        let prev_note_num = self
            .notes
            .previous(position)
            .map(|(_, prev)| prev.pitch().note_num())
            .unwrap_or(note_num);

        let ms_per_tick = ms_per_tick(self.tempo_bpm);
        let start_ms = f64::from(position) * ms_per_tick;
        let end_ms = f64::from(position + note.duration()) * ms_per_tick;

        let mut mutations = Vec::new();
        if let Some(pitchbend) = note.pitchbend() {
            mutations.extend(
                PortamentoSegment::chain(pitchbend, start_ms, prev_note_num, note_num)
                    .into_iter()
                    .map(PitchMutation::Portamento),
            );
            if let Some(params) = pitchbend.vibrato {
                // The vibrato occupies the tail of the note's sounding span.
                let length_ms = (end_ms - start_ms) * f64::from(params.length_percent) / 100.0;
                mutations.push(PitchMutation::Vibrato(Vibrato::new(
                    end_ms - length_ms,
                    end_ms,
                    &params,
                )));
            }
        }

        if mutations.is_empty() {
            self.curves.remove(&position);
        } else {
            self.curves.insert(position, mutations);
        }
    }

    // --- read-only surface for rendering and overlays ---

    pub fn note(&self, position: u32) -> Option<&Note> {
        self.notes.get(position)
    }

    pub fn note_data(&self, position: u32) -> Option<NoteData> {
        self.notes.get(position).map(|note| note.data(position))
    }

    pub fn notes(&self) -> impl Iterator<Item = (u32, &Note)> {
        self.notes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// The derived mutation list attached at `position` (empty when the
    /// note has no pitchbend data, or there is no note).
    pub fn curve(&self, position: u32) -> &[PitchMutation] {
        self.curves
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total pitch offset in tenths at `position_ms` for the note at
    /// `position`: its own mutations plus any neighbor glide touching the
    /// instant. Every mutation is zero outside its window, so summing the
    /// adjacent lists is exact.
    pub fn pitch_offset_at(&self, position: u32, position_ms: f64) -> f64 {
        let mut total = crate::curve::pitch_offset_at(self.curve(position), position_ms);
        if let Some((prev_position, _)) = self.notes.previous(position) {
            total += crate::curve::pitch_offset_at(self.curve(prev_position), position_ms);
        }
        if let Some((next_position, _)) = self.notes.next(position) {
            total += crate::curve::pitch_offset_at(self.curve(next_position), position_ms);
        }
        total
    }

    pub fn num_measures(&self) -> u32 {
        self.extent.num_measures()
    }

    // --- selection ---

    /// Select the note at `position`. Returns false (clearing nothing)
    /// when no note is there.
    pub fn select(&mut self, position: u32) -> bool {
        if self.notes.contains(position) {
            self.selection = Some(position);
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<u32> {
        self.selection
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}

impl Default for ScoreEditor {
    fn default() -> Self {
        Self::new()
    }
}
