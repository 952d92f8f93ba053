//! # Error Types
//!
//! All fallible operations in this crate return [`FretworkError`].
//!
//! Two kinds of failure are deliberately *not* errors: a string with no
//! playable fret for a chord, and a chord that cannot be played at all on a
//! given fretboard. Both produce a valid (possibly all-muted) fingering
//! instead, so batch chart building never has to special-case them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FretworkError {
    /// A structural precondition was violated: tone arithmetic or pitch
    /// computation on a tone with no associated tone system, or a fingering
    /// search over a fretboard with zero strings.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A tone spelling that the tone system does not recognize.
    #[error("Unknown tone {name:?} in this tone system")]
    UnknownTone { name: String },

    /// A chord quality label absent from the catalog, with no synonym
    /// resolving it.
    #[error("Unknown chord quality {label:?}")]
    UnknownQuality { label: String },

    /// The fingering search would enumerate more candidates than the
    /// configured cap allows. Recoverable: retry with a smaller fret window
    /// or a larger cap.
    #[error("Fingering search exceeded the candidate cap of {cap}")]
    SearchTruncated { cap: usize },

    /// Invalid YAML configuration.
    #[error("Invalid config: {0}")]
    Config(String),
}

impl FretworkError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        FretworkError::Configuration {
            message: message.into(),
        }
    }
}
