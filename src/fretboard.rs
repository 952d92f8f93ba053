//! # Fretboards
//!
//! A [`Fretboard`] is the fixed, ordered list of open-string tones an
//! instrument is tuned to. String order is semantically significant: the
//! fingering engine's ascending-fret scoring reads frets in string order, so
//! each constructor documents which end comes first. The standard guitar
//! tuning here lists the highest-pitched string first (E4 down to E2), the
//! way tab lines are printed.

use crate::error::FretworkError;
use crate::fingering::Fingering;
use crate::system::ToneSystem;
use crate::tone::Tone;

/// An ordered set of open-string tones. Index = string index.
#[derive(Debug, Clone, PartialEq)]
pub struct Fretboard<'s> {
    strings: Vec<Tone<'s>>,
}

impl<'s> Fretboard<'s> {
    pub fn new(strings: Vec<Tone<'s>>) -> Self {
        Fretboard { strings }
    }

    /// Build a fretboard from tone strings like `["E4", "B3", ...]`, one per
    /// string, in the caller's chosen order.
    pub fn from_names<S: AsRef<str>>(
        system: &'s ToneSystem,
        names: &[S],
    ) -> Result<Self, FretworkError> {
        let strings = names
            .iter()
            .map(|name| Tone::parse_in(name.as_ref(), system))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Fretboard { strings })
    }

    /// Six-string guitar in standard tuning, highest pitch first:
    /// E4 B3 G3 D3 A2 E2.
    pub fn standard_guitar(system: &'s ToneSystem) -> Self {
        Fretboard::from_names(system, &["E4", "B3", "G3", "D3", "A2", "E2"])
            .expect("standard tuning is valid in any western-style system")
    }

    pub fn strings(&self) -> &[Tone<'s>] {
        &self.strings
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// The tones a fingering actually sounds: one entry per string, `None`
    /// for unplayed strings. The fingering must have one slot per string.
    ///
    /// Octaves follow the tone system's wrap point: in the A-ordered western
    /// system the octave increments when arithmetic wraps past G# back to A,
    /// not at C.
    pub fn sounding_tones(
        &self,
        fingering: &Fingering,
    ) -> Result<Vec<Option<Tone<'s>>>, FretworkError> {
        if fingering.len() != self.len() {
            return Err(FretworkError::configuration(format!(
                "fingering has {} slots but the fretboard has {} strings",
                fingering.len(),
                self.len()
            )));
        }
        self.strings
            .iter()
            .zip(fingering.frets())
            .map(|(open, fret)| match fret {
                Some(f) => open.add(*f as i32).map(Some),
                None => Ok(None),
            })
            .collect()
    }
}
