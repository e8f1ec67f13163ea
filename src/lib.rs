pub mod curve; // Pitch mutations: vibrato and portamento evaluation
pub mod data; // Plain-data shapes crossing the song-model boundary
pub mod pitch;
pub mod score; // Timeline store, overlap resolution, grid extent

/// Quantization units per grid column (one quarter note, UST tick convention).
pub const COL_TICKS: u32 = 480;
/// Grid columns per 4/4 measure. One measure is `COL_TICKS * COLS_PER_MEASURE` ticks.
pub const COLS_PER_MEASURE: u32 = 4;
