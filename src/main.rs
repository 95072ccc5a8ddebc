use std::process;

use aria::combinator::{accompany, canon, forever, identity};
use aria::{parse, schedule_music, AriaError, Instrument, Music, Schedule, SequencerConfig};

/// The opening of Pachelbel's Canon in D: a cello ground bass joined by a
/// three-voice violin canon, each voice entering four measures apart.
fn pachelbel() -> Result<Schedule, AriaError> {
    let bass = parse("D,2 A,,2 | B,,2 ^F,,2 | G,,2 D,,2 | G,,2 A,,2", Instrument::Cello)?;
    let melody = parse(
        "^F'2 E'2 | D'2 ^C'2 | B2 A2 | B2 ^C'2 | \
         D'2 ^C'2 | B2 A2 | G2 ^F2 | G2 E2 | \
         D ^F A G | ^F D ^F E | D B, D A | G B A G | \
         ^F D E ^C' | D' ^F' A' A | B G A ^F | D D' D3/2 .1/2",
        Instrument::Violin,
    )?;

    let voices = canon(forever(melody), 16.0, identity(), 3)?;
    let piece = Music::concat(bass.clone(), accompany(voices, bass)?);
    schedule_music(&piece, &SequencerConfig::default())
}

fn main() {
    tracing_subscriber::fmt().init();

    match pachelbel() {
        Ok(schedule) => print!("{schedule}"),
        Err(e) => {
            eprintln!("Compilation error: {e}");
            process::exit(1);
        }
    }
}
