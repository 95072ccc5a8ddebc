//! Schedule type definitions: events, the finished schedule artifact, and
//! the sequencer configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AriaError;
use crate::instrument::Instrument;

/// Minutes of playback after which an endless loop is cut off.
const MAX_PLAYBACK_MINUTES: u64 = 10;

/// The kind of a scheduled device event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    NoteOn,
    NoteOff,
    ProgramChange,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::NoteOn => "NOTE_ON",
            EventKind::NoteOff => "NOTE_OFF",
            EventKind::ProgramChange => "PROGRAM_CHANGE",
        };
        f.pad(label)
    }
}

/// One timestamped device event.
///
/// `data` is a MIDI note number for `NoteOn`/`NoteOff` and a program number
/// for `ProgramChange`. `channel` is always below the configured capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub kind: EventKind,
    pub channel: u8,
    pub data: u8,
    pub tick: u64,
}

/// Sequencer configuration consumed by one compile pass and relayed to the
/// external player.
///
/// Deserializes from a YAML snippet with kebab-case keys; missing keys fall
/// back to the defaults (64 ticks per beat, 120 BPM, 16 channels).
///
/// # Example
/// ```
/// use aria::SequencerConfig;
///
/// let config = SequencerConfig::from_yaml("ticks-per-beat: 8\nbeats-per-minute: 90")?;
/// assert_eq!(config.ticks_per_beat, 8);
/// assert_eq!(config.channel_capacity, 16);
/// # Ok::<(), aria::AriaError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SequencerConfig {
    /// Tick resolution: schedulable time steps per beat.
    pub ticks_per_beat: u32,
    /// Tempo relayed to the player and used to bound endless loops.
    pub beats_per_minute: u32,
    /// Device channel count; allocation past this limit is fatal.
    pub channel_capacity: u8,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            ticks_per_beat: 64,
            beats_per_minute: 120,
            channel_capacity: 16,
        }
    }
}

impl SequencerConfig {
    /// Load a configuration from a YAML snippet.
    pub fn from_yaml(source: &str) -> Result<Self, AriaError> {
        serde_yaml::from_str(source).map_err(|e| AriaError::ConfigError(e.to_string()))
    }

    /// The tick bound applied when unrolling `Forever`: ten minutes of
    /// playback at the configured tempo and resolution.
    pub fn max_playback_ticks(&self) -> u64 {
        u64::from(self.ticks_per_beat) * u64::from(self.beats_per_minute) * MAX_PLAYBACK_MINUTES
    }
}

/// A compiled piece: the ordered event list plus the channel assignments,
/// ready to hand to a synthesizer device.
///
/// Events are ordered by non-decreasing tick. `channels` lists instruments
/// in first-use order, which is also channel-number order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub ticks_per_beat: u32,
    pub beats_per_minute: u32,
    pub events: Vec<Event>,
    pub channels: Vec<(Instrument, u8)>,
}

impl Schedule {
    /// The channel assigned to `instrument`, if any of its notes were
    /// scheduled.
    pub fn channel_for(&self, instrument: Instrument) -> Option<u8> {
        self.channels
            .iter()
            .find(|(assigned, _)| *assigned == instrument)
            .map(|(_, channel)| *channel)
    }
}

impl fmt::Display for Schedule {
    /// Lists every event on its own line for diagnostics:
    ///
    /// ```text
    /// Event: PROGRAM_CHANGE  Program: 40  Tick: 0
    /// Event: NOTE_ON         Pitch: 60    Tick: 0
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            let data_label = match event.kind {
                EventKind::ProgramChange => "Program",
                _ => "Pitch",
            };
            writeln!(
                f,
                "Event: {:<14} {}: {:<3} Tick: {}",
                event.kind, data_label, event.data, event.tick
            )?;
        }
        Ok(())
    }
}
