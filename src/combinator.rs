//! # Combinator Library
//!
//! Pure functions over [`Music`] values for building layered and repeated
//! pieces - rounds, canons, counterpoint, accompaniment. Everything here is
//! assembled from the five primitive constructors; no new variants.
//!
//! Voice transforms are ordinary closures (`Fn(Music) -> Music`), built with
//! [`identity`], [`transposer`], [`delayer`] and chained with [`compose`].
//! Builders combine two pieces ([`Music::together`] or [`Music::concat`])
//! and drive the shared [`series`] recursion.
//!
//! Invalid arguments - a zero voice count, a negative delay, an undefined
//! accompaniment ratio - fail fast with
//! [`AriaError::PreconditionViolation`]; they are never coerced to a
//! default.

use crate::error::AriaError;
use crate::music::Music;

/// The identity voice transform.
pub fn identity() -> impl Fn(Music) -> Music {
    |m| m
}

/// A transform shifting every note by `semitones`.
pub fn transposer(semitones: i32) -> impl Fn(Music) -> Music {
    move |m| m.transpose(semitones)
}

/// A transform delaying a piece by `delay` beats.
///
/// The delay must be finite and non-negative; [`canon`] validates it before
/// building the closure.
pub fn delayer(delay: f64) -> impl Fn(Music) -> Music {
    move |m| Music::concat(Music::Rest { duration: delay }, m)
}

/// The transform applying `f`, then `g`.
pub fn compose<F, G>(f: F, g: G) -> impl Fn(Music) -> Music
where
    F: Fn(Music) -> Music,
    G: Fn(Music) -> Music,
{
    move |m| g(f(m))
}

/// `m` delayed by `delay` beats of rest.
pub fn delay(m: Music, delay: f64) -> Result<Music, AriaError> {
    Ok(Music::concat(Music::rest(delay)?, m))
}

/// The shared recursion under every multi-voice combinator.
///
/// One voice is `m` itself; otherwise the result is
/// `builder(m, series(filter(m), builder, filter, voices - 1))`, so the
/// i-th voice is `filter` applied i-1 times.
pub fn series<B, F>(m: Music, builder: B, filter: F, voices: u32) -> Result<Music, AriaError>
where
    B: Fn(Music, Music) -> Music,
    F: Fn(Music) -> Music,
{
    if voices == 0 {
        return Err(precondition("voice count must be at least 1"));
    }
    Ok(series_from(m, &builder, &filter, voices))
}

fn series_from<B, F>(m: Music, builder: &B, filter: &F, voices: u32) -> Music
where
    B: Fn(Music, Music) -> Music,
    F: Fn(Music) -> Music,
{
    if voices == 1 {
        m
    } else {
        let remaining = series_from(filter(m.clone()), builder, filter, voices - 1);
        builder(m, remaining)
    }
}

/// `voices` simultaneous voices, each the previous one passed through
/// `filter`.
pub fn counterpoint<F>(m: Music, filter: F, voices: u32) -> Result<Music, AriaError>
where
    F: Fn(Music) -> Music,
{
    series(m, Music::together, filter, voices)
}

/// A counterpoint in which each voice is additionally delayed by
/// `entry_delay` beats relative to the previous one.
pub fn canon<F>(m: Music, entry_delay: f64, filter: F, voices: u32) -> Result<Music, AriaError>
where
    F: Fn(Music) -> Music,
{
    if !entry_delay.is_finite() || entry_delay < 0.0 {
        return Err(precondition(&format!(
            "entry delay must be finite and non-negative, got {entry_delay}"
        )));
    }
    counterpoint(m, compose(filter, delayer(entry_delay)), voices)
}

/// A simple `voices`-voice round: a canon in which every voice is identical
/// except for its entry delay.
pub fn round(m: Music, entry_delay: f64, voices: u32) -> Result<Music, AriaError> {
    canon(m, entry_delay, identity(), voices)
}

/// `times` sequential repetitions of `m`, transforming each repetition with
/// `filter`: the i-th repetition is `filter` applied i-1 times.
pub fn repeat_with<F>(m: Music, filter: F, times: u32) -> Result<Music, AriaError>
where
    F: Fn(Music) -> Music,
{
    series(m, Music::concat, filter, times)
}

/// `times` identical sequential repetitions of `m`.
pub fn repeat(m: Music, times: u32) -> Result<Music, AriaError> {
    repeat_with(m, identity(), times)
}

/// `m` repeating in an endless loop.
pub fn forever(m: Music) -> Music {
    Music::forever(m)
}

/// Two pieces playing simultaneously, starting and ending together. The
/// shorter piece is repeated for as long as the longer one plays.
///
/// Requires that one piece runs forever, or that the longer duration is an
/// even multiple of the shorter. An inexact ratio is rounded half-up to the
/// nearest repetition count, so the total duration can drift from the longer
/// piece's; this looseness is part of the combinator's contract.
///
/// Two finite pieces with a zero-duration shorter piece leave the ratio
/// undefined and fail with [`AriaError::PreconditionViolation`].
pub fn accompany(m1: Music, m2: Music) -> Result<Music, AriaError> {
    if m1.duration() < m2.duration() {
        return accompany(m2, m1);
    }

    // m1 is now the piece playing at least as long as m2
    let longer = m1.duration();
    let shorter = m2.duration();
    if shorter.is_infinite() {
        // both run forever; playback bounds each of them
        Ok(Music::together(m1, m2))
    } else if longer.is_infinite() {
        Ok(Music::together(m1, forever(m2)))
    } else if shorter == 0.0 {
        Err(precondition(
            "accompany needs a piece of nonzero duration to repeat",
        ))
    } else {
        let times = (longer / shorter).round() as u32;
        Ok(Music::together(m1, repeat(m2, times)?))
    }
}

fn precondition(message: &str) -> AriaError {
    AriaError::PreconditionViolation {
        message: message.to_string(),
    }
}
