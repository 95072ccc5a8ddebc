//! # aria
//!
//! A declarative algebra for composing music - notes, rests, sequencing,
//! layering, infinite repetition - with a textual notation for writing
//! pieces and a compiler that turns a composed piece into a deterministic,
//! tick-timestamped schedule of note-on/note-off events plus
//! instrument-channel assignments, ready for a synthesizer device to play.
//!
//! The crate is the pure core: it produces and consumes plain data (a
//! [`Schedule`], a channel table) and never touches device APIs, threads,
//! or the console. Opening a synthesizer and pacing real-time playback are
//! the caller's business.
//!
//! ## Example
//! ```
//! use aria::{compile, Instrument};
//!
//! let schedule = compile("C D E F | G A B C'", Instrument::AcousticGrandPiano)?;
//!
//! // one program change plus an on/off pair per note
//! assert_eq!(schedule.events.len(), 17);
//! assert_eq!(schedule.channel_for(Instrument::AcousticGrandPiano), Some(0));
//! # Ok::<(), aria::AriaError>(())
//! ```
//!
//! Pieces can also be built directly with the algebra and the combinators
//! in [`combinator`] - rounds, canons, repetitions, accompaniment - and
//! handed to [`schedule_music`].

pub mod combinator;
pub mod error;
pub mod instrument;
pub mod music;
pub mod parser;
pub mod pitch;
pub mod schedule;

pub use error::AriaError;
pub use instrument::Instrument;
pub use music::Music;
pub use parser::parse;
pub use pitch::Pitch;
pub use schedule::{schedule_music, Event, EventKind, Schedule, SequencerConfig};

/// Compile a piece of notation to a playback schedule with the default
/// sequencer configuration.
///
/// This is the main entry point for the library.
pub fn compile(source: &str, instrument: Instrument) -> Result<Schedule, AriaError> {
    compile_with_config(source, instrument, &SequencerConfig::default())
}

/// Compile a piece of notation under a caller-supplied configuration.
pub fn compile_with_config(
    source: &str,
    instrument: Instrument,
    config: &SequencerConfig,
) -> Result<Schedule, AriaError> {
    let music = parse(source, instrument)?;
    schedule_music(&music, config)
}
