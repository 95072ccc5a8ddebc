//! # Notation Parser
//!
//! Converts a textual piece into a [`Music`] value using the algebra's
//! constructors.
//!
//! ## Grammar
//! ```text
//! piece      ::= symbol (whitespace-or-bar symbol)*
//! symbol     ::= rest | note
//! rest       ::= "." duration?
//! note       ::= pitch duration?
//! pitch      ::= accidental letter octave*
//! accidental ::= "" | "_" | "^"     natural | flat | sharp (repeatable)
//! letter     ::= "A".."G"
//! octave     ::= "'" | ","          up / down one octave (repeatable)
//! duration   ::= "" | integer | integer "/" integer | "/" integer
//! ```
//!
//! The vertical bar `|` is a delimiter equivalent to whitespace, so measure
//! bars carry no semantic weight. Each accidental marker transposes the
//! letter's pitch by one semitone, each octave marker by twelve. An absent
//! duration is one beat; a leading integer multiplies and a trailing `/n`
//! divides, so `A'2` is a two-beat high A and `_D/2` a half-beat D-flat.
//!
//! Symbols fold left-to-right with `Concat`; the zero-duration-`Rest`
//! identity is only materialized for an empty piece, so a one-symbol piece
//! is the bare note or rest.

use crate::error::AriaError;
use crate::instrument::Instrument;
use crate::music::Music;
use crate::pitch::{Pitch, OCTAVE};

/// Parse a piece of notation into [`Music`] played by `instrument`.
///
/// # Example
/// ```
/// use aria::{parse, Instrument};
///
/// let m = parse("C D E F | G A B C'", Instrument::AcousticGrandPiano)?;
/// assert_eq!(m.duration(), 8.0);
/// # Ok::<(), aria::AriaError>(())
/// ```
///
/// # Errors
/// Returns [`AriaError::ParseError`] naming the first symbol that fails the
/// grammar.
pub fn parse(source: &str, instrument: Instrument) -> Result<Music, AriaError> {
    let mut piece: Option<Music> = None;
    for symbol in source.split(|c: char| c.is_whitespace() || c == '|') {
        if symbol.is_empty() {
            continue;
        }
        let next = parse_symbol(symbol, instrument)?;
        piece = Some(match piece {
            Some(so_far) => Music::concat(so_far, next),
            None => next,
        });
    }
    Ok(piece.unwrap_or(Music::Rest { duration: 0.0 }))
}

/// Parse one symbol into a note or a rest.
fn parse_symbol(symbol: &str, instrument: Instrument) -> Result<Music, AriaError> {
    // the duration suffix starts at the first digit or slash
    let pitch_end = symbol
        .find(|c: char| c == '/' || c.is_ascii_digit())
        .unwrap_or(symbol.len());
    let (pitch_text, duration_text) = symbol.split_at(pitch_end);
    let duration = parse_duration(symbol, duration_text)?;

    if pitch_text == "." {
        Music::rest(duration)
    } else {
        let pitch = parse_pitch(symbol, pitch_text)?;
        Music::note(duration, pitch, instrument)
    }
}

/// Parse a duration suffix: empty is one beat, a leading integer multiplies,
/// a trailing `/n` divides.
fn parse_duration(symbol: &str, text: &str) -> Result<f64, AriaError> {
    let mut duration = 1.0;
    let mut rest = text;

    let integer_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if integer_end > 0 {
        let multiplier: u32 = rest[..integer_end]
            .parse()
            .map_err(|_| parse_error(symbol, "duration out of range"))?;
        duration *= f64::from(multiplier);
        rest = &rest[integer_end..];
    }

    if let Some(denominator_text) = rest.strip_prefix('/') {
        if denominator_text.is_empty() || !denominator_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(parse_error(symbol, "malformed duration fraction"));
        }
        let denominator: u32 = denominator_text
            .parse()
            .map_err(|_| parse_error(symbol, "duration out of range"))?;
        if denominator == 0 {
            return Err(parse_error(symbol, "zero denominator in duration"));
        }
        duration /= f64::from(denominator);
        rest = "";
    }

    if rest.is_empty() {
        Ok(duration)
    } else {
        Err(parse_error(symbol, "malformed duration"))
    }
}

/// Parse a pitch, peeling octave suffixes and accidental prefixes
/// recursively until a single note letter remains.
fn parse_pitch(symbol: &str, text: &str) -> Result<Pitch, AriaError> {
    if let Some(inner) = text.strip_suffix('\'') {
        return Ok(parse_pitch(symbol, inner)?.transpose(OCTAVE));
    }
    if let Some(inner) = text.strip_suffix(',') {
        return Ok(parse_pitch(symbol, inner)?.transpose(-OCTAVE));
    }
    if let Some(inner) = text.strip_prefix('^') {
        return Ok(parse_pitch(symbol, inner)?.transpose(1));
    }
    if let Some(inner) = text.strip_prefix('_') {
        return Ok(parse_pitch(symbol, inner)?.transpose(-1));
    }

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Pitch::from_letter(letter)
            .ok_or_else(|| parse_error(symbol, &format!("unknown note letter '{letter}'"))),
        _ => Err(parse_error(symbol, "malformed pitch")),
    }
}

fn parse_error(symbol: &str, message: &str) -> AriaError {
    AriaError::ParseError {
        symbol: symbol.to_string(),
        message: message.to_string(),
    }
}
