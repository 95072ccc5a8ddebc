//! Pitch arithmetic on the chromatic scale.

use std::fmt;

/// Semitones in an octave.
pub const OCTAVE: i32 = 12;

// Spellings for the twelve steps above a C; sharps carry a caret.
const STEP_NAMES: [&str; 12] = [
    "C", "^C", "D", "^D", "E", "F", "^F", "G", "^G", "A", "^A", "B",
];

/// A musical pitch: a signed semitone offset from middle C.
///
/// `Pitch` is a plain value. Transposing returns a new pitch, equality and
/// ordering are by semitone offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pitch(i32);

impl Pitch {
    /// Middle C, the reference pitch (offset 0).
    pub const MIDDLE_C: Pitch = Pitch(0);

    /// The pitch of a natural note letter in the middle octave: `C D E F G A B`
    /// sit at semitones `0 2 4 5 7 9 11`. Any other character is `None`.
    pub fn from_letter(letter: char) -> Option<Pitch> {
        let semitones = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        Some(Pitch(semitones))
    }

    /// Signed semitone distance from `other` up to `self`.
    pub fn difference(self, other: Pitch) -> i32 {
        self.0 - other.0
    }

    /// A copy of this pitch shifted by `semitones`; negative shifts downward.
    pub fn transpose(self, semitones: i32) -> Pitch {
        Pitch(self.0 + semitones)
    }

    /// MIDI note number, with middle C at 60. Pitches outside the device
    /// range are clamped to 0..=127.
    pub fn midi_note(self) -> u8 {
        (self.difference(Pitch::MIDDLE_C) + 60).clamp(0, 127) as u8
    }
}

impl fmt::Display for Pitch {
    /// Renders the pitch in the notation this crate parses: `^` marks a
    /// sharp, each trailing `'` raises an octave and each `,` lowers one
    /// (`^F'` is F-sharp above middle C, `A,,` is A two octaves down).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = self.0.rem_euclid(OCTAVE) as usize;
        let octave = self.0.div_euclid(OCTAVE);
        write!(f, "{}", STEP_NAMES[step])?;
        for _ in 0..octave.max(0) {
            write!(f, "'")?;
        }
        for _ in 0..(-octave).max(0) {
            write!(f, ",")?;
        }
        Ok(())
    }
}
