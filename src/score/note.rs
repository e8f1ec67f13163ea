use crate::data::{EnvelopeData, NoteData, PitchbendData};
use crate::pitch::Pitch;

/// A note owned by the timeline store.
///
/// `duration` is the current sounding length — the overlap resolver
/// shortens it when a later note moves in close, and lets it back out when
/// the blocker disappears. `full_duration` is the natural length fixed at
/// creation, which is what "back out" restores to when nothing follows.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pitch: Pitch,
    lyric: String,
    duration: u32,
    full_duration: u32,
    envelope: Option<EnvelopeData>,
    pitchbend: Option<PitchbendData>,
}

impl Note {
    pub fn from_data(data: &NoteData) -> Self {
        Self {
            pitch: data.pitch,
            lyric: data.lyric.clone(),
            duration: data.duration,
            full_duration: data.duration,
            envelope: data.envelope.clone(),
            pitchbend: data.pitchbend.clone(),
        }
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    pub fn lyric(&self) -> &str {
        &self.lyric
    }

    /// Current sounding length in ticks, possibly truncated.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Natural length in ticks as created.
    pub fn full_duration(&self) -> u32 {
        self.full_duration
    }

    pub fn envelope(&self) -> Option<&EnvelopeData> {
        self.envelope.as_ref()
    }

    pub fn pitchbend(&self) -> Option<&PitchbendData> {
        self.pitchbend.as_ref()
    }

    /// Shorten the sounding length to touch a following note.
    pub(crate) fn truncate(&mut self, duration: u32) {
        self.duration = duration;
    }

    /// Reach out to exactly `duration` ticks (the gap a removed note left).
    pub(crate) fn stretch_to(&mut self, duration: u32) {
        self.duration = duration;
    }

    /// Nothing follows anymore: sound for the natural length again.
    pub(crate) fn restore_full(&mut self) {
        self.duration = self.full_duration;
    }

    /// Non-structural update: pitch, lyric, and curve data only.
    /// Positions and durations belong to the overlap resolver.
    pub(crate) fn update(&mut self, data: &NoteData) {
        self.pitch = data.pitch;
        self.lyric = data.lyric.clone();
        self.envelope = data.envelope.clone();
        self.pitchbend = data.pitchbend.clone();
    }

    /// Snapshot for the rendering/model boundary.
    pub fn data(&self, position: u32) -> NoteData {
        NoteData {
            position,
            duration: self.duration,
            pitch: self.pitch,
            lyric: self.lyric.clone(),
            envelope: self.envelope.clone(),
            pitchbend: self.pitchbend.clone(),
        }
    }
}
