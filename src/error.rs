//! # Error Types
//!
//! This module defines all error types for the aria compiler.
//!
//! ## Error Types
//! - `ParseError` - a notation symbol does not match the grammar; carries the
//!   offending symbol
//! - `ChannelCapacityExceeded` - a piece needs more instruments than the
//!   device has channels; fatal, no partial schedule is usable
//! - `PreconditionViolation` - a combinator was handed an invalid argument
//!   (negative duration, zero voice count, undefined accompaniment ratio)
//! - `ConfigError` - a sequencer configuration snippet failed to deserialize
//!
//! All errors are raised synchronously at the point of detection and
//! propagate with `?`; there is no recovery or retry anywhere in the core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AriaError {
    /// A notation symbol failed to parse.
    ///
    /// # Example
    /// ```
    /// # use aria::AriaError;
    /// let err = AriaError::ParseError {
    ///     symbol: "H2".to_string(),
    ///     message: "unknown note letter 'H'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "couldn't understand 'H2': unknown note letter 'H'");
    /// ```
    #[error("couldn't understand '{symbol}': {message}")]
    ParseError { symbol: String, message: String },

    /// The piece uses more distinct instruments than the device has channels.
    ///
    /// Raised the moment allocation would pass the configured capacity;
    /// compilation aborts and the partial schedule is discarded.
    #[error("tried to use too many instruments: limited to {capacity} channels")]
    ChannelCapacityExceeded { capacity: u8 },

    /// A combinator received an argument outside its contract.
    #[error("precondition violated: {message}")]
    PreconditionViolation { message: String },

    /// A sequencer configuration snippet was rejected.
    #[error("invalid configuration: {0}")]
    ConfigError(String),
}
