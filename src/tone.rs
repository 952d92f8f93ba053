//! # Tones
//!
//! A [`Tone`] is a pitch class, optionally anchored to an octave, bound to
//! the [`ToneSystem`] it lives in. Tones are immutable: every arithmetic
//! operation returns a new value.
//!
//! ## Octave-aware interval arithmetic
//!
//! Adding an interval moves the pitch-class index modulo the system size and
//! carries whole wraps into the octave:
//!
//! ```rust
//! use fretwork::{Tone, ToneSystem};
//!
//! let system = ToneSystem::western();
//! let c4 = Tone::parse_in("C4", &system)?;
//! assert_eq!(c4.add(12)?.full_name(), "C5");
//! assert_eq!(c4.add(4)?.full_name(), "E4");
//! assert_eq!(c4.subtract(12)?.full_name(), "C3");
//! # Ok::<(), fretwork::FretworkError>(())
//! ```
//!
//! A tone without an octave still supports arithmetic on its pitch class; the
//! carry is computed for the index wrap but cannot be reported, so the result
//! is octave-less too. A tone without a *system* supports no arithmetic at
//! all ([`FretworkError::Configuration`]).
//!
//! ## Equality
//!
//! Equality is structural: pitch-class indices must match, and when both
//! tones carry an octave the octaves must match too. If either side omits the
//! octave the comparison is class-only, so `C == C4` holds. Comparing a tone
//! against a raw string goes through [`Tone::matches_spelling`], never
//! through `==`.

use crate::error::FretworkError;
use crate::system::ToneSystem;

/// A pitch class with an optional octave, bound to an optional tone system.
#[derive(Debug, Clone)]
pub struct Tone<'s> {
    name: String,
    octave: Option<i32>,
    system: Option<&'s ToneSystem>,
}

impl<'s> Tone<'s> {
    /// Build a tone from a spelling, validating it against the system.
    pub fn new(
        name: impl Into<String>,
        octave: Option<i32>,
        system: &'s ToneSystem,
    ) -> Result<Self, FretworkError> {
        let name = name.into();
        if system.index_of(&name).is_none() {
            return Err(FretworkError::UnknownTone { name });
        }
        Ok(Tone {
            name,
            octave,
            system: Some(system),
        })
    }

    /// Build a tone from its canonical index in a system.
    pub fn from_index(index: usize, octave: Option<i32>, system: &'s ToneSystem) -> Self {
        Tone {
            name: system.canonical_spelling(index).to_string(),
            octave,
            system: Some(system),
        }
    }

    /// Parse a tone string (`"C#4"`, `"Bb"`, `"E2"`) without binding it to a
    /// system. The spelling is the leading run of letters and accidental
    /// marks; the optional octave is the trailing digit run.
    pub fn parse(s: &str) -> Result<Tone<'static>, FretworkError> {
        let split = s
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .unwrap_or(s.len());
        let (name, octave_part) = s.split_at(split);
        if name.is_empty() || !name.chars().all(|c| c.is_alphabetic() || c == '#') {
            return Err(FretworkError::UnknownTone {
                name: s.to_string(),
            });
        }
        let octave = if octave_part.is_empty() {
            None
        } else {
            Some(
                octave_part
                    .parse::<i32>()
                    .map_err(|_| FretworkError::UnknownTone {
                        name: s.to_string(),
                    })?,
            )
        };
        Ok(Tone {
            name: name.to_string(),
            octave,
            system: None,
        })
    }

    /// Parse a tone string and bind it to a system, validating the spelling.
    pub fn parse_in(s: &str, system: &'s ToneSystem) -> Result<Self, FretworkError> {
        let tone = Tone::parse(s)?;
        Tone::new(tone.name, tone.octave, system)
    }

    /// The spelling this tone was built with.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn octave(&self) -> Option<i32> {
        self.octave
    }

    pub fn system(&self) -> Option<&'s ToneSystem> {
        self.system
    }

    /// Spelling plus octave, e.g. `"C#4"`, or just the spelling when no
    /// octave is set.
    pub fn full_name(&self) -> String {
        match self.octave {
            Some(octave) => format!("{}{}", self.name, octave),
            None => self.name.clone(),
        }
    }

    /// The canonical pitch-class index of this tone.
    ///
    /// Fails with [`FretworkError::Configuration`] when the tone has no
    /// system to index against.
    pub fn class_index(&self) -> Result<usize, FretworkError> {
        let system = self.system.ok_or_else(|| {
            FretworkError::configuration("tone index cannot be resolved without a tone system")
        })?;
        system
            .index_of(&self.name)
            .ok_or_else(|| FretworkError::UnknownTone {
                name: self.name.clone(),
            })
    }

    /// Add `interval` semitone-steps, wrapping the pitch-class index modulo
    /// the system size and carrying octave wraps.
    ///
    /// The result spells its class canonically (sharp-preferring in the
    /// western system), whatever spelling this tone used. When this tone has
    /// no octave the result has none either: the carry is computed for the
    /// wrap but there is nothing to apply it to.
    pub fn add(&self, interval: i32) -> Result<Tone<'s>, FretworkError> {
        let system = self.system.ok_or_else(|| {
            FretworkError::configuration("tone arithmetic requires an associated tone system")
        })?;
        let modulus = system.len() as i32;
        let sum = self.class_index()? as i32 + interval;
        let index = sum.rem_euclid(modulus) as usize;
        let carry = sum.div_euclid(modulus);
        let octave = self.octave.map(|o| o + carry);
        Ok(Tone::from_index(index, octave, system))
    }

    /// Subtract `interval` semitone-steps. Equivalent to `add(-interval)`.
    pub fn subtract(&self, interval: i32) -> Result<Tone<'s>, FretworkError> {
        self.add(-interval)
    }

    /// Whether `spelling` names this tone's pitch class, under any enharmonic
    /// spelling the system knows. Without a system this falls back to exact
    /// string comparison.
    pub fn matches_spelling(&self, spelling: &str) -> bool {
        match self.system {
            Some(system) => match self.class_index() {
                Ok(index) => system.class(index).has_spelling(spelling),
                Err(_) => false,
            },
            None => self.name == spelling,
        }
    }
}

impl PartialEq for Tone<'_> {
    fn eq(&self, other: &Self) -> bool {
        let class_eq = match (self.system, other.system) {
            (Some(_), _) | (_, Some(_)) => {
                // Resolve both spellings in whichever system is available, so
                // enharmonic spellings compare equal.
                let system = self.system.or(other.system).unwrap();
                match (system.index_of(&self.name), system.index_of(&other.name)) {
                    (Some(a), Some(b)) => a == b,
                    _ => self.name == other.name,
                }
            }
            (None, None) => self.name == other.name,
        };
        match (self.octave, other.octave) {
            (Some(a), Some(b)) => class_eq && a == b,
            _ => class_eq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spelling_and_octave() {
        let tone = Tone::parse("C#4").unwrap();
        assert_eq!(tone.name(), "C#");
        assert_eq!(tone.octave(), Some(4));

        let tone = Tone::parse("Bb").unwrap();
        assert_eq!(tone.name(), "Bb");
        assert_eq!(tone.octave(), None);
    }

    #[test]
    fn rejects_garbage_strings() {
        assert!(Tone::parse("").is_err());
        assert!(Tone::parse("4C").is_err());
        assert!(Tone::parse("C#4x").is_err());
    }

    #[test]
    fn addition_wraps_and_carries() {
        let system = ToneSystem::western();
        let c4 = Tone::parse_in("C4", &system).unwrap();
        assert_eq!(c4.add(12).unwrap().full_name(), "C5");
        assert_eq!(c4.add(1).unwrap().full_name(), "C#4");
        // C is index 3; going back 4 steps crosses the A boundary.
        assert_eq!(c4.subtract(4).unwrap().full_name(), "G#3");
    }

    #[test]
    fn add_then_subtract_round_trips() {
        let system = ToneSystem::western();
        let tone = Tone::parse_in("F#3", &system).unwrap();
        for interval in [-25, -12, -1, 0, 1, 7, 12, 40] {
            let back = tone.add(interval).unwrap().subtract(interval).unwrap();
            assert_eq!(back, tone, "round trip failed for interval {interval}");
            assert_eq!(back.octave(), tone.octave());
        }
    }

    #[test]
    fn octave_less_arithmetic_stays_octave_less() {
        let system = ToneSystem::western();
        let tone = Tone::parse_in("B", &system).unwrap();
        let up = tone.add(13).unwrap();
        assert_eq!(up.name(), "C");
        assert_eq!(up.octave(), None);
    }

    #[test]
    fn arithmetic_without_a_system_is_a_configuration_error() {
        let tone = Tone::parse("C4").unwrap();
        assert!(matches!(
            tone.add(1),
            Err(FretworkError::Configuration { .. })
        ));
    }

    #[test]
    fn flat_spellings_normalize_through_arithmetic() {
        let system = ToneSystem::western();
        let tone = Tone::parse_in("Bb2", &system).unwrap();
        assert_eq!(tone.add(0).unwrap().full_name(), "A#2");
    }

    #[test]
    fn equality_is_class_only_when_an_octave_is_missing() {
        let system = ToneSystem::western();
        let c = Tone::parse_in("C", &system).unwrap();
        let c4 = Tone::parse_in("C4", &system).unwrap();
        let c5 = Tone::parse_in("C5", &system).unwrap();
        assert_eq!(c, c4);
        assert_eq!(c, c5);
        assert_ne!(c4, c5);
    }

    #[test]
    fn enharmonic_tones_compare_equal() {
        let system = ToneSystem::western();
        let sharp = Tone::parse_in("C#3", &system).unwrap();
        let flat = Tone::parse_in("Db3", &system).unwrap();
        assert_eq!(sharp, flat);
    }

    #[test]
    fn matches_spelling_covers_enharmonics() {
        let system = ToneSystem::western();
        let tone = Tone::parse_in("C#", &system).unwrap();
        assert!(tone.matches_spelling("Db"));
        assert!(tone.matches_spelling("C#"));
        assert!(!tone.matches_spelling("C"));
    }
}
