use std::f64::consts::PI;

use crate::data::VibratoParams;

/*
Vibrato Evaluation
==================

A vibrato is a sine oscillation on top of a note's pitch, active over an
absolute window [start_ms, end_ms) and faded in and out by linear ramps:

  Offset (tenths)
        │      ___       ___
        │     ╱   ╲     ╱   ╲     ╱
      0 ┼────╱─────╲───╱─────╲───╱──────→ Time (ms)
        │   ╱ phase  ╲_╱ steady  ╲_
        │    in                 phase out
        start_ms                    end_ms

The window is cut into three branches:

  phase in    [start, start+phase_in)      oscillation scaled by a ramp
                                           rising 0 → 1
  steady      [start+phase_in,
               end-phase_out)              full-scale oscillation
  phase out   [end-phase_out, end)         ramp falling 1 → 0

Outside the window the contribution is exactly zero. The ramp factor is 1
at the inner edge of each ramp, so each ramp branch meets the steady branch
without a jump; it is 0 at start_ms/end_ms, so the whole curve fades from
and to silence. No further smoothness is promised at the branch seams —
the fade is the point.

The oscillator's angular frequency changes linearly across the window
(freq_slope), which lets the vibrato speed up or slow down. All the raw
UST-style integer inputs (percentages, cents, double-cents) are converted
to physical units once, at construction.
*/

/// An immutable vibrato oscillator positioned on the timeline.
///
/// Built from raw [`VibratoParams`] for a concrete note window; every field
/// is already in physical units (ms, tenths, radians, rad/ms).
#[derive(Debug, Clone, PartialEq)]
pub struct Vibrato {
    start_ms: f64,
    end_ms: f64,
    phase_in_ms: f64,
    phase_out_ms: f64,
    amplitude: f64,    // tenths
    phase: f64,        // radians, 0..2π
    pitch_change: f64, // tenths, DC offset
    start_freq: f64,   // rad/ms at start_ms
    freq_slope: f64,   // rad/ms per ms, usually 0
}

impl Vibrato {
    /// Position a vibrato over `[start_ms, end_ms)`.
    ///
    /// Unit conversions: amplitude cents → tenths (/10), pitch change
    /// double-cents → tenths (/20), ramp percentages → ms of the window,
    /// phase percent → radians. `freq_slope` tilts the angular frequency
    /// ±slope/800 around the base cycle frequency `2π / cycle_ms`.
    pub fn new(start_ms: f64, end_ms: f64, params: &VibratoParams) -> Self {
        let length_ms = end_ms - start_ms;
        let base_freq = 2.0 * PI / params.cycle_ms.max(1) as f64;
        let start_freq = base_freq * (1.0 - params.freq_slope as f64 / 800.0);
        let end_freq = base_freq * (1.0 + params.freq_slope as f64 / 800.0);
        Self {
            start_ms,
            end_ms,
            phase_in_ms: params.phase_in as f64 / 100.0 * length_ms,
            phase_out_ms: params.phase_out as f64 / 100.0 * length_ms,
            amplitude: params.amplitude as f64 / 10.0,
            phase: 2.0 * PI * (params.phase_percent as f64 / 100.0),
            pitch_change: params.pitch_change as f64 / 20.0,
            start_freq,
            // A zero-length window would divide by zero; the branches below
            // never enter it anyway, so the slope is irrelevant there.
            freq_slope: if length_ms == 0.0 {
                0.0
            } else {
                (end_freq - start_freq) / length_ms
            },
        }
    }

    /// Pitch offset in tenths at `position_ms`. Zero outside the window.
    pub fn apply(&self, position_ms: f64) -> f64 {
        if position_ms < self.start_ms {
            0.0
        } else if position_ms < self.start_ms + self.phase_in_ms {
            // Phase in. The branch guard keeps phase_in_ms > 0 here.
            let scale = (position_ms - self.start_ms).abs() / self.phase_in_ms;
            self.oscillation(position_ms, scale)
        } else if position_ms < self.end_ms - self.phase_out_ms {
            self.oscillation(position_ms, 1.0)
        } else if position_ms < self.end_ms {
            // Phase out.
            let scale = (self.end_ms - position_ms).abs() / self.phase_out_ms;
            self.oscillation(position_ms, scale)
        } else {
            0.0
        }
    }

    fn oscillation(&self, position_ms: f64, scale: f64) -> f64 {
        let elapsed = position_ms - self.start_ms;
        let frequency = self.start_freq + self.freq_slope * elapsed;
        self.amplitude * scale * (elapsed * frequency - self.phase).sin() + self.pitch_change * scale
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> f64 {
        self.end_ms
    }
}
