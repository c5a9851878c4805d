//! Note number <-> note name table.
//!
//! Names follow the `<pitch class>(<octave>)` form with octaves counted from 0, so
//! MIDI note 0 is `C(0)`, note 60 is `C(5)` and note 127 is `G(10)`.
//!
//! # Example
//! ```
//! use midi_message_core::NoteIndex;
//!
//! let notes = NoteIndex::shared();
//! assert_eq!(notes.name(60), Some("C(5)"));
//! assert_eq!(notes.number("C(5)"), Some(60));
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

/// Pitch classes in ascending order, sharps only.
pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Number of MIDI note numbers.
pub const NOTE_COUNT: usize = 128;

/// Immutable bidirectional note table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteIndex {
    names: Vec<String>,
    numbers: HashMap<String, u8>,
}

impl NoteIndex {
    pub fn new() -> Self {
        let mut names = Vec::with_capacity(NOTE_COUNT);
        let mut numbers = HashMap::with_capacity(NOTE_COUNT);

        for number in 0..NOTE_COUNT as u8 {
            let pitch_class = PITCH_CLASSES[number as usize % PITCH_CLASSES.len()];
            let octave = number as usize / PITCH_CLASSES.len();
            let name = format!("{pitch_class}({octave})");
            numbers.insert(name.clone(), number);
            names.push(name);
        }

        Self { names, numbers }
    }

    /// Process-wide table, built on first use.
    pub fn shared() -> &'static NoteIndex {
        static SHARED: OnceLock<NoteIndex> = OnceLock::new();
        SHARED.get_or_init(NoteIndex::new)
    }

    /// Returns `None` for numbers above 127.
    #[inline]
    pub fn name(&self, number: u8) -> Option<&str> {
        self.names.get(number as usize).map(String::as_str)
    }

    #[inline]
    pub fn number(&self, name: &str) -> Option<u8> {
        self.numbers.get(name).copied()
    }

    /// All names, indexed by note number.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for NoteIndex {
    fn default() -> Self {
        Self::new()
    }
}
