use super::portamento::PortamentoSegment;
use super::vibrato::Vibrato;

/// One pitch-offset contribution attached to a note.
///
/// The variant set is closed and evaluation is the only shared behavior,
/// so this is a sum type rather than a trait object.
#[derive(Debug, Clone, PartialEq)]
pub enum PitchMutation {
    Vibrato(Vibrato),
    Portamento(PortamentoSegment),
}

impl PitchMutation {
    /// Pitch offset in tenths at an absolute time offset in ms.
    /// Zero outside the variant's active window.
    pub fn evaluate(&self, position_ms: f64) -> f64 {
        match self {
            PitchMutation::Vibrato(vibrato) => vibrato.apply(position_ms),
            PitchMutation::Portamento(segment) => segment.apply(position_ms),
        }
    }
}

/// Total pitch offset at `position_ms`: the sum of every active mutation.
pub fn pitch_offset_at(mutations: &[PitchMutation], position_ms: f64) -> f64 {
    mutations.iter().map(|m| m.evaluate(position_ms)).sum()
}
