//! # Schedule Module
//!
//! Turn a [`Music`](crate::music::Music) tree into a deterministic,
//! tick-timestamped schedule of device events plus instrument-channel
//! assignments, ready for a synthesizer to play.
//!
//! ## Sub-modules
//! - `types` - [`Event`], [`EventKind`], [`Schedule`], [`SequencerConfig`]
//! - `engine` - the one-pass tree walk, [`schedule_music()`]
//!
//! ## Guarantees
//! - Events appear in non-decreasing tick order; simultaneous events keep
//!   compile order, so a `Together`'s top operand's events precede the
//!   bottom's at equal ticks.
//! - Each instrument's program-change event precedes its first note-on.
//! - Endless loops are bounded by ten minutes of playback at the configured
//!   tempo; scheduling terminates for every input.
//! - A failed pass (channel exhaustion) yields no partial schedule.
//!
//! ## Example
//! ```
//! use aria::{parse, schedule_music, Instrument, SequencerConfig};
//!
//! let music = parse("C D E", Instrument::Violin)?;
//! let schedule = schedule_music(&music, &SequencerConfig::default())?;
//!
//! // one program change and three on/off pairs
//! assert_eq!(schedule.events.len(), 7);
//! assert_eq!(schedule.channel_for(Instrument::Violin), Some(0));
//! # Ok::<(), aria::AriaError>(())
//! ```

mod engine;
mod types;

#[cfg(test)]
mod tests;

pub use engine::schedule_music;
pub use types::{Event, EventKind, Schedule, SequencerConfig};
