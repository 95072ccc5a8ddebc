use pretty_assertions::assert_eq;

use super::*;
use crate::instrument::Instrument;
use crate::music::Music;
use crate::pitch::Pitch;

const PIANO: Instrument = Instrument::AcousticGrandPiano;

fn note(duration: f64, semitones: i32, instrument: Instrument) -> Music {
    Music::note(duration, Pitch::MIDDLE_C.transpose(semitones), instrument).unwrap()
}

fn config(ticks_per_beat: u32, beats_per_minute: u32, channel_capacity: u8) -> SequencerConfig {
    SequencerConfig {
        ticks_per_beat,
        beats_per_minute,
        channel_capacity,
    }
}

#[test]
fn test_note_schedules_an_on_off_pair() {
    let schedule = schedule_music(&note(2.0, 0, PIANO), &SequencerConfig::default()).unwrap();

    assert_eq!(
        schedule.events,
        vec![
            Event { kind: EventKind::ProgramChange, channel: 0, data: 0, tick: 0 },
            Event { kind: EventKind::NoteOn, channel: 0, data: 60, tick: 0 },
            Event { kind: EventKind::NoteOff, channel: 0, data: 60, tick: 128 },
        ]
    );
    assert_eq!(schedule.channels, vec![(PIANO, 0)]);
}

#[test]
fn test_rest_schedules_nothing() {
    let schedule = schedule_music(&Music::rest(3.0).unwrap(), &SequencerConfig::default()).unwrap();
    assert_eq!(schedule.events, vec![]);
    assert_eq!(schedule.channels, vec![]);
}

#[test]
fn test_concat_schedules_back_to_back() {
    let m = Music::concat(note(1.0, 0, PIANO), note(1.0, 2, PIANO));
    let schedule = schedule_music(&m, &config(4, 120, 16)).unwrap();

    assert_eq!(
        schedule.events,
        vec![
            Event { kind: EventKind::ProgramChange, channel: 0, data: 0, tick: 0 },
            Event { kind: EventKind::NoteOn, channel: 0, data: 60, tick: 0 },
            Event { kind: EventKind::NoteOff, channel: 0, data: 60, tick: 4 },
            Event { kind: EventKind::NoteOn, channel: 0, data: 62, tick: 4 },
            Event { kind: EventKind::NoteOff, channel: 0, data: 62, tick: 8 },
        ]
    );
}

#[test]
fn test_rest_advances_the_cursor_between_notes() {
    let m = Music::concat(
        note(1.0, 0, PIANO),
        Music::concat(Music::rest(2.0).unwrap(), note(1.0, 4, PIANO)),
    );
    let schedule = schedule_music(&m, &config(4, 120, 16)).unwrap();
    let second_on = schedule
        .events
        .iter()
        .find(|e| e.kind == EventKind::NoteOn && e.data == 64)
        .unwrap();
    assert_eq!(second_on.tick, 12);
}

#[test]
fn test_tick_conversion_truncates() {
    // a third of a beat at 10 ticks per beat lands on tick 3
    let m = Music::concat(note(1.0 / 3.0, 0, PIANO), note(1.0, 2, PIANO));
    let schedule = schedule_music(&m, &config(10, 120, 16)).unwrap();
    let second_on = schedule
        .events
        .iter()
        .find(|e| e.kind == EventKind::NoteOn && e.data == 62)
        .unwrap();
    assert_eq!(second_on.tick, 3);
}

#[test]
fn test_together_interleaves_by_tick_with_top_first() {
    let m = Music::together(note(2.0, 0, PIANO), note(1.0, 4, PIANO));
    let schedule = schedule_music(&m, &config(4, 120, 16)).unwrap();

    assert_eq!(
        schedule.events,
        vec![
            Event { kind: EventKind::ProgramChange, channel: 0, data: 0, tick: 0 },
            Event { kind: EventKind::NoteOn, channel: 0, data: 60, tick: 0 },
            Event { kind: EventKind::NoteOn, channel: 0, data: 64, tick: 0 },
            Event { kind: EventKind::NoteOff, channel: 0, data: 64, tick: 4 },
            Event { kind: EventKind::NoteOff, channel: 0, data: 60, tick: 8 },
        ]
    );
}

#[test]
fn test_ticks_are_non_decreasing() {
    let m = Music::together(
        Music::concat(note(1.0, 0, PIANO), note(3.0, 2, PIANO)),
        Music::concat(note(2.5, 4, Instrument::Violin), note(0.5, 5, Instrument::Violin)),
    );
    let schedule = schedule_music(&m, &config(8, 120, 16)).unwrap();
    let ticks: Vec<u64> = schedule.events.iter().map(|e| e.tick).collect();
    let mut sorted = ticks.clone();
    sorted.sort();
    assert_eq!(ticks, sorted);
}

#[test]
fn test_forever_is_bounded_by_ten_minutes_of_playback() {
    // cap = 2 ticks/beat * 1 beat/min * 10 min = 20 ticks; a one-beat body
    // is 2 ticks, so exactly ten repetitions fit
    let cfg = config(2, 1, 16);
    assert_eq!(cfg.max_playback_ticks(), 20);

    let schedule = schedule_music(&Music::forever(note(1.0, 0, PIANO)), &cfg).unwrap();
    let note_ons = schedule
        .events
        .iter()
        .filter(|e| e.kind == EventKind::NoteOn)
        .count();
    assert_eq!(note_ons, 10);
    assert_eq!(schedule.events.last().unwrap().tick, 20);
}

#[test]
fn test_forever_of_zero_duration_body_schedules_nothing() {
    let schedule = schedule_music(
        &Music::forever(Music::rest(0.0).unwrap()),
        &SequencerConfig::default(),
    )
    .unwrap();
    assert_eq!(schedule.events, vec![]);
}

#[test]
fn test_forever_of_zero_duration_body_elapses_zero_ticks() {
    // the loop reports zero elapsed ticks, so a following note starts at 0
    let m = Music::concat(
        Music::forever(Music::rest(0.0).unwrap()),
        note(1.0, 0, PIANO),
    );
    let schedule = schedule_music(&m, &config(4, 120, 16)).unwrap();
    let on = schedule
        .events
        .iter()
        .find(|e| e.kind == EventKind::NoteOn)
        .unwrap();
    assert_eq!(on.tick, 0);
}

#[test]
fn test_forever_of_sub_tick_body_terminates() {
    // 0.2 beats at 2 ticks/beat truncates to zero ticks; the loop must not
    // spin on a cursor that never advances
    let schedule = schedule_music(&Music::forever(note(0.2, 0, PIANO)), &config(2, 120, 16));
    assert!(schedule.is_ok());
}

#[test]
fn test_channels_allocate_in_first_use_order() {
    let m = Music::concat(
        note(1.0, 0, Instrument::Cello),
        Music::concat(
            note(1.0, 2, Instrument::Violin),
            Music::concat(note(1.0, 4, Instrument::Cello), note(1.0, 5, Instrument::Flute)),
        ),
    );
    let schedule = schedule_music(&m, &SequencerConfig::default()).unwrap();

    assert_eq!(
        schedule.channels,
        vec![
            (Instrument::Cello, 0),
            (Instrument::Violin, 1),
            (Instrument::Flute, 2),
        ]
    );
    assert_eq!(schedule.channel_for(Instrument::Violin), Some(1));
    assert_eq!(schedule.channel_for(Instrument::Oboe), None);
}

#[test]
fn test_channel_capacity_is_fatal() {
    let m = Music::concat(
        note(1.0, 0, Instrument::Cello),
        Music::concat(note(1.0, 2, Instrument::Violin), note(1.0, 4, Instrument::Flute)),
    );
    let result = schedule_music(&m, &config(64, 120, 2));
    match result {
        Err(crate::error::AriaError::ChannelCapacityExceeded { capacity }) => {
            assert_eq!(capacity, 2)
        }
        other => panic!("expected channel exhaustion, got {other:?}"),
    }
}

#[test]
fn test_exactly_capacity_instruments_succeeds() {
    let m = Music::concat(
        note(1.0, 0, Instrument::Cello),
        note(1.0, 2, Instrument::Violin),
    );
    let schedule = schedule_music(&m, &config(64, 120, 2)).unwrap();
    assert_eq!(schedule.channels.len(), 2);
}

#[test]
fn test_program_change_precedes_the_first_note_on() {
    let m = Music::together(
        note(1.0, 0, Instrument::Cello),
        note(1.0, 4, Instrument::Violin),
    );
    let schedule = schedule_music(&m, &SequencerConfig::default()).unwrap();

    for (instrument, channel) in &schedule.channels {
        let program_at = schedule
            .events
            .iter()
            .position(|e| e.kind == EventKind::ProgramChange && e.channel == *channel)
            .unwrap();
        let first_on = schedule
            .events
            .iter()
            .position(|e| e.kind == EventKind::NoteOn && e.channel == *channel)
            .unwrap();
        assert!(
            program_at < first_on,
            "program change for {instrument} must precede its first note-on"
        );
        assert_eq!(schedule.events[program_at].data, instrument.program());
    }
}

#[test]
fn test_config_defaults() {
    let cfg = SequencerConfig::default();
    assert_eq!(cfg.ticks_per_beat, 64);
    assert_eq!(cfg.beats_per_minute, 120);
    assert_eq!(cfg.channel_capacity, 16);
    assert_eq!(cfg.max_playback_ticks(), 64 * 120 * 10);
}

#[test]
fn test_config_from_yaml_fills_in_defaults() {
    let cfg = SequencerConfig::from_yaml("beats-per-minute: 90").unwrap();
    assert_eq!(cfg.beats_per_minute, 90);
    assert_eq!(cfg.ticks_per_beat, 64);
    assert_eq!(cfg.channel_capacity, 16);
}

#[test]
fn test_config_rejects_bad_yaml() {
    assert!(SequencerConfig::from_yaml("beats-per-minute: fast").is_err());
}

#[test]
fn test_schedule_display_lists_one_event_per_line() {
    let schedule = schedule_music(&note(1.0, 2, Instrument::Violin), &config(4, 120, 16)).unwrap();
    let listing = schedule.to_string();
    let lines: Vec<&str> = listing.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("PROGRAM_CHANGE") && lines[0].contains("Program: 40"));
    assert!(lines[1].contains("NOTE_ON") && lines[1].contains("Pitch: 62"));
    assert!(lines[2].contains("NOTE_OFF") && lines[2].contains("Tick: 4"));
}
