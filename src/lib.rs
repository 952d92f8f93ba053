//! # fretwork
//!
//! Tone arithmetic under a configurable tuning system, and a chord-fingering
//! engine for fretted instruments with arbitrary open-string tunings.
//!
//! The configuration objects ([`ToneSystem`], [`ChordCatalog`]) are built
//! once and passed by shared reference into every computation; the search
//! itself is a pure function of its inputs. For one-off lookups the
//! convenience functions below wire the standard western setup together:
//!
//! ```rust
//! let tab = fretwork::tab_for("Cmaj", &["E4", "B3", "G3", "D3", "A2", "E2"])?;
//! assert!(tab.starts_with("E4|0"));
//! # Ok::<(), fretwork::FretworkError>(())
//! ```

pub mod chart;
pub mod chords;
pub mod config;
pub mod error;
pub mod fingering;
pub mod fretboard;
pub mod pitch;
pub mod system;
pub mod tab;
pub mod tone;

pub use chart::{Chart, ChartBuilder};
pub use chords::{ChordCatalog, NamedChord};
pub use config::Config;
pub use error::FretworkError;
pub use fingering::{Fingering, FingeringEngine, DEFAULT_CANDIDATE_CAP, DEFAULT_MAX_FRET};
pub use fretboard::Fretboard;
pub use pitch::{Temperament, REFERENCE_PITCH};
pub use system::{PitchClass, ToneSystem};
pub use tone::Tone;

/// Best fingering for a chord name on a tuning, using the standard western
/// system and chord catalog.
pub fn fingering_for<S: AsRef<str>>(
    chord: &str,
    tuning: &[S],
) -> Result<Fingering, FretworkError> {
    let system = ToneSystem::western();
    let catalog = ChordCatalog::standard();
    let chord = NamedChord::parse(chord, &system, &catalog)?;
    let fretboard = Fretboard::from_names(&system, tuning)?;
    FingeringEngine::default().best_fingering(&chord, &fretboard, &system, &catalog)
}

/// Best fingering for a chord name, rendered as ASCII tab.
pub fn tab_for<S: AsRef<str>>(chord: &str, tuning: &[S]) -> Result<String, FretworkError> {
    let system = ToneSystem::western();
    let catalog = ChordCatalog::standard();
    let chord = NamedChord::parse(chord, &system, &catalog)?;
    let fretboard = Fretboard::from_names(&system, tuning)?;
    let best = FingeringEngine::default().best_fingering(&chord, &fretboard, &system, &catalog)?;
    tab::render(&best, &fretboard)
}

/// The full chord chart for a tuning: every (root, quality) pair in the
/// standard catalog.
pub fn chart_for<S: AsRef<str>>(tuning: &[S]) -> Result<Chart, FretworkError> {
    let system = ToneSystem::western();
    let catalog = ChordCatalog::standard();
    let fretboard = Fretboard::from_names(&system, tuning)?;
    ChartBuilder::new(&system, &catalog).build(&fretboard)
}
