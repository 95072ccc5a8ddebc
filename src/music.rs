//! # The Music Algebra
//!
//! An immutable recursive sum type with five variants and the two structural
//! operations defined over all of them:
//!
//! ```text
//! Music
//!   ├── Note     duration (beats), pitch, instrument
//!   ├── Rest     duration (beats)
//!   ├── Concat   first, second      (sequential)
//!   ├── Together top, bottom        (simultaneous, same start)
//!   └── Forever  body               (endless repetition)
//! ```
//!
//! ## Durations
//! Durations are `f64` beats. For `Note` and `Rest` they are finite and
//! non-negative (enforced by the [`Music::note`] / [`Music::rest`]
//! constructors). `duration()` of a `Concat` is the sum of its parts, of a
//! `Together` the max, and of a `Forever` positive infinity regardless of
//! the body - even a zero-duration body (the scheduler special-cases that
//! when bounding playback).
//!
//! ## Immutability
//! Values are never mutated after construction; combinators and
//! [`Music::transpose`] always build new trees. Equality is structural:
//! two trees are equal iff they are built from equal constructors applied
//! to equal arguments.
//!
//! ## Related Modules
//! - `parser` - builds these values from notation text
//! - `combinator` - builds rounds, canons, repetitions from them
//! - `schedule` - consumes a tree, producing the timestamped event list

use std::fmt;

use crate::error::AriaError;
use crate::instrument::Instrument;
use crate::pitch::Pitch;

/// A piece of music, possibly layered across instruments and possibly
/// infinite.
#[derive(Debug, Clone, PartialEq)]
pub enum Music {
    /// A single sounding pitch.
    Note {
        duration: f64,
        pitch: Pitch,
        instrument: Instrument,
    },
    /// Silence.
    Rest { duration: f64 },
    /// Sequential play: first, then second.
    Concat(Box<Music>, Box<Music>),
    /// Simultaneous play, both starting at the same instant.
    Together(Box<Music>, Box<Music>),
    /// The body repeated without end.
    Forever(Box<Music>),
}

impl Music {
    /// A note of `duration` beats.
    ///
    /// Fails with [`AriaError::PreconditionViolation`] when the duration is
    /// negative or not finite.
    pub fn note(duration: f64, pitch: Pitch, instrument: Instrument) -> Result<Music, AriaError> {
        check_duration(duration)?;
        Ok(Music::Note {
            duration,
            pitch,
            instrument,
        })
    }

    /// A rest of `duration` beats.
    ///
    /// Fails with [`AriaError::PreconditionViolation`] when the duration is
    /// negative or not finite.
    pub fn rest(duration: f64) -> Result<Music, AriaError> {
        check_duration(duration)?;
        Ok(Music::Rest { duration })
    }

    /// `first` followed by `second`.
    pub fn concat(first: Music, second: Music) -> Music {
        Music::Concat(Box::new(first), Box::new(second))
    }

    /// `top` and `bottom` playing at the same time. The pieces start at the
    /// same instant but may end at different times.
    pub fn together(top: Music, bottom: Music) -> Music {
        Music::Together(Box::new(top), Box::new(bottom))
    }

    /// `body` repeating in an endless loop.
    pub fn forever(body: Music) -> Music {
        Music::Forever(Box::new(body))
    }

    /// Total duration of this piece in beats; `f64::INFINITY` for anything
    /// wrapped in [`Music::Forever`].
    pub fn duration(&self) -> f64 {
        match self {
            Music::Note { duration, .. } | Music::Rest { duration } => *duration,
            Music::Concat(first, second) => first.duration() + second.duration(),
            Music::Together(top, bottom) => top.duration().max(bottom.duration()),
            Music::Forever(_) => f64::INFINITY,
        }
    }

    /// A new tree in which every note's pitch is shifted by `semitones`;
    /// everything else is structurally identical.
    ///
    /// Transposition is additive - `m.transpose(i).transpose(j)` equals
    /// `m.transpose(i + j)` - and `transpose(0)` is the identity.
    pub fn transpose(&self, semitones: i32) -> Music {
        match self {
            Music::Note {
                duration,
                pitch,
                instrument,
            } => Music::Note {
                duration: *duration,
                pitch: pitch.transpose(semitones),
                instrument: *instrument,
            },
            Music::Rest { duration } => Music::Rest {
                duration: *duration,
            },
            Music::Concat(first, second) => {
                Music::concat(first.transpose(semitones), second.transpose(semitones))
            }
            Music::Together(top, bottom) => {
                Music::together(top.transpose(semitones), bottom.transpose(semitones))
            }
            Music::Forever(body) => Music::forever(body.transpose(semitones)),
        }
    }
}

fn check_duration(duration: f64) -> Result<(), AriaError> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(())
    } else {
        Err(AriaError::PreconditionViolation {
            message: format!("duration must be finite and non-negative, got {duration}"),
        })
    }
}

impl fmt::Display for Music {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Music::Note {
                duration, pitch, ..
            } => write!(f, "note({duration} {pitch})"),
            Music::Rest { duration } => write!(f, "rest({duration})"),
            Music::Concat(first, second) => write!(f, "{first} {second}"),
            Music::Together(top, bottom) => write!(f, "together({top} |||| {bottom})"),
            Music::Forever(body) => write!(f, "forever({body})"),
        }
    }
}
