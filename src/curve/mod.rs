//! The pitch curve engine: continuous pitch-offset signals layered on notes.
//!
//! Evaluation is pure and allocation-free — a mutation is a function of an
//! absolute time offset in milliseconds to a pitch offset in tenths (one
//! tenth = 10 cents), contributing zero outside its active window. The
//! [`crate::score`] layer decides *when* mutations are rebuilt; this module
//! only knows how to evaluate them.

/// Portamento glide segments between neighboring notes' pitches.
pub mod portamento;
/// Periodic pitch oscillation with fade-in/out ramps.
pub mod vibrato;

mod mutation;

pub use mutation::{pitch_offset_at, PitchMutation};
pub use portamento::{CurveShape, PortamentoSegment};
pub use vibrato::Vibrato;
