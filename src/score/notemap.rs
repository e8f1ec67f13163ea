use std::collections::BTreeMap;
use std::ops::Bound;

use super::note::Note;
use super::ScoreError;

/// The timeline store: an ordered map from quantized position to note.
///
/// Purely structural — it knows nothing about curves or the grid. Overlap
/// resolution and curve recomputation are the [`super::ScoreEditor`]'s job;
/// this type only guarantees exact lookup and neighbor queries.
#[derive(Debug, Clone, Default)]
pub struct NoteMap {
    notes: BTreeMap<u32, Note>,
}

impl NoteMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: u32) -> Option<&Note> {
        self.notes.get(&position)
    }

    pub fn get_mut(&mut self, position: u32) -> Option<&mut Note> {
        self.notes.get_mut(&position)
    }

    pub fn contains(&self, position: u32) -> bool {
        self.notes.contains_key(&position)
    }

    /// Nearest note strictly before `position`.
    pub fn previous(&self, position: u32) -> Option<(u32, &Note)> {
        self.notes
            .range(..position)
            .next_back()
            .map(|(p, note)| (*p, note))
    }

    /// Nearest note strictly after `position`.
    pub fn next(&self, position: u32) -> Option<(u32, &Note)> {
        self.notes
            .range((Bound::Excluded(position), Bound::Unbounded))
            .next()
            .map(|(p, note)| (*p, note))
    }

    /// Store a note at `position`. Fails without touching the store when
    /// the position is occupied.
    pub fn insert(&mut self, position: u32, note: Note) -> Result<(), ScoreError> {
        if self.notes.contains_key(&position) {
            return Err(ScoreError::NoteAlreadyExists { position });
        }
        self.notes.insert(position, note);
        Ok(())
    }

    /// Remove and return the note at `position`, `None` if absent.
    pub fn remove(&mut self, position: u32) -> Option<Note> {
        self.notes.remove(&position)
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Note)> {
        self.notes.iter().map(|(p, note)| (*p, note))
    }

    /// Position of the last note on the timeline.
    pub fn last_position(&self) -> Option<u32> {
        self.notes.keys().next_back().copied()
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NoteData;
    use crate::pitch::{Pitch, PitchClass};

    fn note(duration: u32) -> Note {
        Note::from_data(&NoteData::new(0, duration, Pitch::new(PitchClass::C, 4), "a"))
    }

    #[test]
    fn neighbor_queries_are_strict() {
        let mut map = NoteMap::new();
        map.insert(0, note(480)).unwrap();
        map.insert(480, note(480)).unwrap();
        map.insert(960, note(480)).unwrap();

        // A note is not its own neighbor.
        assert_eq!(map.previous(480).map(|(p, _)| p), Some(0));
        assert_eq!(map.next(480).map(|(p, _)| p), Some(960));

        // Queries between notes find the surrounding pair.
        assert_eq!(map.previous(700).map(|(p, _)| p), Some(480));
        assert_eq!(map.next(700).map(|(p, _)| p), Some(960));

        // Nothing before the first, nothing after the last.
        assert_eq!(map.previous(0).map(|(p, _)| p), None);
        assert_eq!(map.next(960).map(|(p, _)| p), None);
    }

    #[test]
    fn duplicate_insert_fails_and_leaves_store_unchanged() {
        let mut map = NoteMap::new();
        map.insert(100, note(480)).unwrap();
        let err = map.insert(100, note(240)).unwrap_err();
        assert_eq!(err, ScoreError::NoteAlreadyExists { position: 100 });
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(100).unwrap().duration(), 480);
    }

    #[test]
    fn remove_returns_the_note_or_none() {
        let mut map = NoteMap::new();
        map.insert(100, note(480)).unwrap();
        assert_eq!(map.remove(100).map(|n| n.duration()), Some(480));
        assert_eq!(map.remove(100).map(|n| n.duration()), None);
        assert!(map.is_empty());
    }

    #[test]
    fn last_position_tracks_the_tail() {
        let mut map = NoteMap::new();
        assert_eq!(map.last_position(), None);
        map.insert(960, note(480)).unwrap();
        map.insert(0, note(480)).unwrap();
        assert_eq!(map.last_position(), Some(960));
    }

    #[test]
    fn neighbor_at_u32_max_does_not_overflow() {
        let mut map = NoteMap::new();
        map.insert(u32::MAX, note(1)).unwrap();
        assert_eq!(map.next(u32::MAX).map(|(p, _)| p), None);
        assert_eq!(map.previous(u32::MAX).map(|(p, _)| p), None);
    }
}
