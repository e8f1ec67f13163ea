/*
Pitch Representation
====================

A pitch is a chromatic pitch class plus an octave. The editable grid covers
octaves 1 through 7 (84 rows), with row 0 at the TOP of the grid:

  row  0 = B7   (highest)
  row  1 = A#7
  ...
  row 11 = C7
  row 12 = B6
  ...
  row 83 = C1   (lowest)

The row formula: row = (7 - octave) * 12 + (11 - class_index)
Where class_index: C=0, C#=1, ..., B=11.

Sharp spellings only — the editor grid has one row per chromatic step, so
Db is addressed as C#. `note_num` gives the MIDI-style absolute semitone
(C4 = 60), which is what portamento deltas are computed from.
*/

use std::fmt;
use std::str::FromStr;

/// Rows per octave (one per chromatic step).
pub const ROWS_PER_OCTAVE: u32 = 12;
/// Octaves covered by the grid (1..=7).
pub const NUM_OCTAVES: u32 = 7;
/// Total addressable grid rows.
pub const NUM_ROWS: u32 = ROWS_PER_OCTAVE * NUM_OCTAVES;

/// The twelve chromatic pitch classes, sharp spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    /// All classes in ascending chromatic order.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Chromatic index within the octave (C = 0 .. B = 11).
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Display spelling ("C", "C#", ...).
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        PitchClass::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// A concrete pitch: chromatic class plus octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: u32,
}

impl Pitch {
    pub fn new(class: PitchClass, octave: u32) -> Self {
        Self { class, octave }
    }

    /// True when this pitch lands on an addressable grid row (octaves 1..=7).
    pub fn in_range(self) -> bool {
        (1..=NUM_OCTAVES).contains(&self.octave)
    }

    /// Grid row for this pitch. Row 0 is B7 at the top of the grid.
    /// Returns `None` outside the supported octave range.
    pub fn row(self) -> Option<u32> {
        if !self.in_range() {
            return None;
        }
        Some((NUM_OCTAVES - self.octave) * ROWS_PER_OCTAVE + (11 - self.class.index()))
    }

    /// Pitch for a grid row, `None` for rows outside the grid.
    pub fn from_row(row: u32) -> Option<Self> {
        if row >= NUM_ROWS {
            return None;
        }
        let octave = NUM_OCTAVES - row / ROWS_PER_OCTAVE;
        let class = PitchClass::ALL[(11 - row % ROWS_PER_OCTAVE) as usize];
        Some(Self { class, octave })
    }

    /// MIDI-style absolute semitone number (C4 = 60).
    /// Portamento deltas are differences of these, times ten (tenths).
    pub fn note_num(self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.class.index() as i32
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class.name(), self.octave)
    }
}

impl FromStr for Pitch {
    type Err = ParsePitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| ParsePitchError(s.to_string()))?;
        let (name, octave) = s.split_at(split);
        let class = PitchClass::from_name(name).ok_or_else(|| ParsePitchError(s.to_string()))?;
        let octave: u32 = octave.parse().map_err(|_| ParsePitchError(s.to_string()))?;
        Ok(Pitch { class, octave })
    }
}

/// The string was not a recognizable pitch spelling like "C#4".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePitchError(pub String);

impl fmt::Display for ParsePitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Not a pitch spelling: {:?}", self.0)
    }
}

impl std::error::Error for ParsePitchError {}
