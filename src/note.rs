//! Note names for detected frequencies.
//!
//! Every equal-tempered note from C0 to B8 (A4 = 440 Hz) owns the band of
//! frequencies within half a semitone of it. Neighbouring bands share their
//! boundary, so the table is sorted and has neither gaps nor overlaps.
use once_cell::sync::Lazy;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const OCTAVES: usize = 9;
/// Semitones from C0 to A4.
const A4_INDEX: i32 = 57;
const A4_FREQUENCY: f64 = 440.0;

/// A labeled note and its nominal frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub name: &'static str,
    pub frequency: f64,
}

impl Note {
    /// Deviation of `frequency` from this note, in cents.
    pub fn cents_from(&self, frequency: f64) -> f64 {
        1200.0 * (frequency / self.frequency).log2()
    }
}

struct NoteBand {
    lower: f64,
    upper: f64,
    name: String,
    frequency: f64,
}

/// Lower edge of the band of the note `index` semitones above C0.
fn band_edge(index: usize) -> f64 {
    let half_steps = 2 * index as i32 - 1 - 2 * A4_INDEX;
    A4_FREQUENCY * 2f64.powf(half_steps as f64 / 24.0)
}

static NOTE_BANDS: Lazy<Vec<NoteBand>> = Lazy::new(|| {
    (0..OCTAVES * 12)
        .map(|index| NoteBand {
            lower: band_edge(index),
            upper: band_edge(index + 1),
            name: format!("{}{}", NOTE_NAMES[index % 12], index / 12),
            frequency: A4_FREQUENCY * 2f64.powf((index as i32 - A4_INDEX) as f64 / 12.0),
        })
        .collect()
});

/// The note whose band contains `frequency`, or `None` outside C0..B8.
pub fn nearest_note(frequency: f64) -> Option<Note> {
    let bands: &'static [NoteBand] = &NOTE_BANDS;
    let index = bands.partition_point(|band| band.upper <= frequency);
    bands
        .get(index)
        .filter(|band| band.lower <= frequency)
        .map(|band| Note {
            name: band.name.as_str(),
            frequency: band.frequency,
        })
}

/// Name of the note nearest to `frequency`, e.g. `"A4"` for 440 Hz.
pub fn label_for(frequency: f64) -> Option<&'static str> {
    nearest_note(frequency).map(|note| note.name)
}
