//! Plain-data shapes crossing the song-model boundary.
//!
//! These are the types the editing session exchanges with collaborators
//! (the canonical song model on one side, rendering on the other). They
//! carry no behavior beyond construction helpers; curve math lives in
//! [`crate::curve`] and structural logic in [`crate::score`].

use crate::curve::CurveShape;
use crate::pitch::Pitch;

/// A note as seen across the model boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteData {
    /// Quantized position from the timeline origin, in ticks.
    pub position: u32,
    /// Sounding length in ticks.
    pub duration: u32,
    pub pitch: Pitch,
    pub lyric: String,
    /// Dynamics control points, when the note carries any.
    pub envelope: Option<EnvelopeData>,
    /// Portamento control points plus optional vibrato parameters.
    pub pitchbend: Option<PitchbendData>,
}

impl NoteData {
    pub fn new(position: u32, duration: u32, pitch: Pitch, lyric: impl Into<String>) -> Self {
        Self {
            position,
            duration,
            pitch,
            lyric: lyric.into(),
            envelope: None,
            pitchbend: None,
        }
    }

    pub fn with_envelope(mut self, envelope: EnvelopeData) -> Self {
        self.envelope = Some(envelope);
        self
    }

    pub fn with_pitchbend(mut self, pitchbend: PitchbendData) -> Self {
        self.pitchbend = Some(pitchbend);
        self
    }
}

/// Dynamics curve control points: five widths (ms) and five heights (%).
///
/// Opaque to this engine — carried with the note, handed back to whoever
/// redraws or re-renders the envelope. Only the note's duration truncation
/// makes these stale, which is why they travel inside [`NeighborInfo`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvelopeData {
    pub widths_ms: [f64; 5],
    pub heights: [f64; 5],
}

impl Default for EnvelopeData {
    /// The standard singing preset: quick fade in, full body, quick fade out.
    fn default() -> Self {
        Self {
            widths_ms: [0.0, 5.0, 35.0, 0.0, 0.0],
            heights: [0.0, 100.0, 100.0, 0.0, 0.0],
        }
    }
}

/// Portamento control points plus optional vibrato parameters.
///
/// The glide departs from the previous note's pitch `start_ms` into (or
/// before) this note, passes through the interior control points, and lands
/// on this note's own pitch. Heights are in tenths (one tenth = 10 cents);
/// a missing trailing height closes the chain at 0.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchbendData {
    /// Offset of the first control point relative to note onset, in ms.
    /// Usually negative: the glide starts before the note sounds.
    pub start_ms: f64,
    /// Widths of the successive glide segments, in ms.
    pub widths_ms: Vec<f64>,
    /// Pitch offsets at the interior control points, in tenths.
    pub heights: Vec<f64>,
    /// Easing shape per segment. Segments past the end of this list
    /// default to [`CurveShape::SCurve`].
    pub shapes: Vec<CurveShape>,
    pub vibrato: Option<VibratoParams>,
}

impl PitchbendData {
    pub fn new(start_ms: f64, widths_ms: Vec<f64>) -> Self {
        Self {
            start_ms,
            widths_ms,
            heights: Vec::new(),
            shapes: Vec::new(),
            vibrato: None,
        }
    }

    pub fn with_heights(mut self, heights: Vec<f64>) -> Self {
        self.heights = heights;
        self
    }

    pub fn with_shapes(mut self, shapes: Vec<CurveShape>) -> Self {
        self.shapes = shapes;
        self
    }

    pub fn with_vibrato(mut self, vibrato: VibratoParams) -> Self {
        self.vibrato = Some(vibrato);
        self
    }
}

/// Raw vibrato parameters in UST-style integer units.
///
/// Converted to physical units (ms, tenths, rad/ms) only when a
/// [`crate::curve::Vibrato`] is built for a concrete note window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VibratoParams {
    /// Portion of the note the vibrato occupies, percent of its length,
    /// anchored at the note's end.
    pub length_percent: i32,
    /// Length of one oscillation cycle, in ms.
    pub cycle_ms: i32,
    /// Oscillation depth, in cents.
    pub amplitude: i32,
    /// Fade-in ramp, percent of the vibrato window.
    pub phase_in: i32,
    /// Fade-out ramp, percent of the vibrato window.
    pub phase_out: i32,
    /// Starting phase, percent of a full cycle.
    pub phase_percent: i32,
    /// DC offset applied with the oscillation, in double-cents.
    pub pitch_change: i32,
    /// Frequency drift across the window, ±800 = ±one base frequency.
    pub freq_slope: i32,
}

impl Default for VibratoParams {
    fn default() -> Self {
        Self {
            length_percent: 65,
            cycle_ms: 180,
            amplitude: 35,
            phase_in: 20,
            phase_out: 20,
            phase_percent: 0,
            pitch_change: 0,
            freq_slope: 0,
        }
    }
}

/// A neighbor whose curves must be recomputed after a structural edit.
///
/// `delta` is the tick distance from the edited position to this neighbor;
/// the curve data is the neighbor's current state so the caller's mirror
/// copy can rebuild without another query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighborInfo {
    pub delta: u32,
    pub envelope: Option<EnvelopeData>,
    pub pitchbend: Option<PitchbendData>,
}

/// Outcome of an insert: the note as actually stored (possibly truncated)
/// and the neighbors whose curves changed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddResponse {
    pub note: NoteData,
    pub prev: Option<NeighborInfo>,
    pub next: Option<NeighborInfo>,
}

/// Outcome of a removal: the neighbors whose curves changed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveResponse {
    pub prev: Option<NeighborInfo>,
    pub next: Option<NeighborInfo>,
}
