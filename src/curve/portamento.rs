use std::f64::consts::PI;

use crate::data::PitchbendData;

/*
Portamento Glides
=================

A portamento is the pitch glide a singer makes between two notes. On the
timeline it is a chain of eased segments: the curve leaves the PREVIOUS
note's pitch, passes through user-dragged control points, and lands on the
owning note's pitch. Offsets are expressed in tenths relative to the owning
note, so the chain always ends at 0:

  Offset (tenths)
   -10 ┤ ●
        │   ╲__
        │      ╲●___
      0 ┼───────────●●─────→ Time (ms)
        └ one whole tone below, gliding up to the note's own pitch

Each segment interpolates between two control points with its own easing
shape. The shapes mirror the classic UST mode codes: the sine s-curve
default, a straight line, and the two half-sine eases.
*/

/// Easing applied across one glide segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveShape {
    /// Sine ease in-out (the default glide).
    SCurve,
    /// Straight-line interpolation.
    Linear,
    /// Half-sine ease out: fast departure, soft landing.
    EaseOut,
    /// Half-sine ease in: soft departure, fast landing.
    EaseIn,
}

impl CurveShape {
    /// Map linear progress 0..=1 onto the eased curve, also 0..=1.
    pub fn ease(self, progress: f64) -> f64 {
        match self {
            CurveShape::SCurve => (1.0 - (PI * progress).cos()) / 2.0,
            CurveShape::Linear => progress,
            CurveShape::EaseOut => (PI / 2.0 * progress).sin(),
            CurveShape::EaseIn => 1.0 - (PI / 2.0 * progress).cos(),
        }
    }
}

/// One eased glide segment over an absolute window.
#[derive(Debug, Clone, PartialEq)]
pub struct PortamentoSegment {
    start_ms: f64,
    end_ms: f64,
    start_tenths: f64,
    end_tenths: f64,
    shape: CurveShape,
}

impl PortamentoSegment {
    pub fn new(
        start_ms: f64,
        end_ms: f64,
        start_tenths: f64,
        end_tenths: f64,
        shape: CurveShape,
    ) -> Self {
        Self {
            start_ms,
            end_ms,
            start_tenths,
            end_tenths,
            shape,
        }
    }

    /// Pitch offset in tenths at `position_ms`. Zero outside the window.
    pub fn apply(&self, position_ms: f64) -> f64 {
        if position_ms < self.start_ms || position_ms >= self.end_ms {
            return 0.0;
        }
        let span = self.end_ms - self.start_ms;
        let progress = (position_ms - self.start_ms) / span;
        self.start_tenths + (self.end_tenths - self.start_tenths) * self.shape.ease(progress)
    }

    /// Derive the glide chain for a note from its control-point data.
    ///
    /// The chain starts `data.start_ms` relative to the note onset at the
    /// previous note's pitch (`(prev - own) * 10` tenths; a note with no
    /// previous glides from its own pitch, delta 0). Interior heights come
    /// from the user's control points; the final point always lands on the
    /// owning note's pitch, so a missing trailing height closes at 0.
    pub fn chain(
        data: &PitchbendData,
        note_start_ms: f64,
        prev_note_num: i32,
        note_num: i32,
    ) -> Vec<PortamentoSegment> {
        let mut segments = Vec::with_capacity(data.widths_ms.len());
        let mut cursor_ms = note_start_ms + data.start_ms;
        let mut height = f64::from((prev_note_num - note_num) * 10);
        for (i, &width_ms) in data.widths_ms.iter().enumerate() {
            let next_height = data.heights.get(i).copied().unwrap_or(0.0);
            let shape = data.shapes.get(i).copied().unwrap_or(CurveShape::SCurve);
            segments.push(PortamentoSegment::new(
                cursor_ms,
                cursor_ms + width_ms,
                height,
                next_height,
                shape,
            ));
            cursor_ms += width_ms;
            height = next_height;
        }
        segments
    }
}
