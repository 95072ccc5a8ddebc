//! The tick scheduler: a single pass over a [`Music`] tree producing the
//! ordered event list and the channel table.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::types::{Event, EventKind, Schedule, SequencerConfig};
use crate::error::AriaError;
use crate::instrument::Instrument;
use crate::music::Music;

/// Compile `music` into a [`Schedule`] under `config`.
///
/// The pass is synchronous and owns all of its state; nothing is shared
/// across invocations. Endless loops are cut off at
/// [`SequencerConfig::max_playback_ticks`], so scheduling terminates for
/// every input.
///
/// # Errors
/// [`AriaError::ChannelCapacityExceeded`] when the piece uses more distinct
/// instruments than the device has channels. The partial schedule is
/// discarded.
pub fn schedule_music(music: &Music, config: &SequencerConfig) -> Result<Schedule, AriaError> {
    let mut scheduler = Scheduler::new(config);
    scheduler.schedule_at(music, 0)?;
    Ok(scheduler.finish())
}

/// Per-pass state: the tick-ordered event sink and the channel table.
struct Scheduler<'a> {
    config: &'a SequencerConfig,
    events: Vec<Event>,
    channel_table: HashMap<Instrument, u8>,
    // first-use order, mirrors channel_table
    channels: Vec<(Instrument, u8)>,
}

impl<'a> Scheduler<'a> {
    fn new(config: &'a SequencerConfig) -> Self {
        Self {
            config,
            events: Vec::new(),
            channel_table: HashMap::new(),
            channels: Vec::new(),
        }
    }

    fn finish(self) -> Schedule {
        Schedule {
            ticks_per_beat: self.config.ticks_per_beat,
            beats_per_minute: self.config.beats_per_minute,
            events: self.events,
            channels: self.channels,
        }
    }

    /// Beats to ticks at the configured resolution, truncating sub-tick
    /// remainders.
    fn ticks(&self, beats: f64) -> u64 {
        (beats * f64::from(self.config.ticks_per_beat)) as u64
    }

    /// Schedule `music` starting at `at_tick`.
    ///
    /// Returns the absolute end tick, except for `Forever`, which returns
    /// the total ticks it elapsed before hitting the playback bound.
    fn schedule_at(&mut self, music: &Music, at_tick: u64) -> Result<u64, AriaError> {
        match music {
            Music::Note {
                duration,
                pitch,
                instrument,
            } => {
                let channel = self.channel(*instrument)?;
                let end = at_tick + self.ticks(*duration);
                let note = pitch.midi_note();
                self.emit(Event {
                    kind: EventKind::NoteOn,
                    channel,
                    data: note,
                    tick: at_tick,
                });
                self.emit(Event {
                    kind: EventKind::NoteOff,
                    channel,
                    data: note,
                    tick: end,
                });
                Ok(end)
            }
            Music::Rest { duration } => Ok(at_tick + self.ticks(*duration)),
            Music::Concat(first, second) => {
                let middle = self.schedule_at(first, at_tick)?;
                self.schedule_at(second, middle)
            }
            Music::Together(top, bottom) => {
                let top_end = self.schedule_at(top, at_tick)?;
                let bottom_end = self.schedule_at(bottom, at_tick)?;
                Ok(top_end.max(bottom_end))
            }
            Music::Forever(body) => {
                if body.duration() == 0.0 {
                    // repeating would never advance the cursor
                    return Ok(0);
                }
                let cap = self.config.max_playback_ticks();
                let mut elapsed = 0u64;
                while elapsed < cap {
                    let end = self.schedule_at(body, at_tick + elapsed)?;
                    let advanced = end.saturating_sub(at_tick + elapsed);
                    if advanced == 0 {
                        // a body shorter than one tick cannot advance either
                        break;
                    }
                    elapsed += advanced;
                }
                debug!(elapsed, cap, "bounded endless loop");
                Ok(elapsed)
            }
        }
    }

    /// The channel assigned to `instrument`, allocating the next unused one
    /// on first use. Allocation patches the instrument's program into the
    /// channel at tick 0, before any of its notes.
    fn channel(&mut self, instrument: Instrument) -> Result<u8, AriaError> {
        if let Some(&channel) = self.channel_table.get(&instrument) {
            return Ok(channel);
        }

        let next = self.channel_table.len();
        if next >= usize::from(self.config.channel_capacity) {
            return Err(AriaError::ChannelCapacityExceeded {
                capacity: self.config.channel_capacity,
            });
        }
        let channel = next as u8;
        debug!(%instrument, channel, "allocated channel");
        self.emit(Event {
            kind: EventKind::ProgramChange,
            channel,
            data: instrument.program(),
            tick: 0,
        });
        self.channel_table.insert(instrument, channel);
        self.channels.push((instrument, channel));
        Ok(channel)
    }

    /// Append an event, keeping the sink ordered by non-decreasing tick.
    /// Ties keep insertion order, so simultaneous events stay in compile
    /// order.
    fn emit(&mut self, event: Event) {
        trace!(?event, "emit");
        let index = self.events.partition_point(|queued| queued.tick <= event.tick);
        self.events.insert(index, event);
    }
}
