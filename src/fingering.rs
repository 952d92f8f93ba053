//! # Fingering Search
//!
//! The algorithmic core: given a chord's acceptable pitch classes and a
//! fretboard, enumerate every fret assignment that sounds only acceptable
//! classes, score each for playability, and pick the best.
//!
//! ## Search shape
//!
//! For each string, the candidate frets are those in `[0, max_fret)` whose
//! sounded pitch class belongs to the chord. A string with no candidate is
//! unplayable for this chord and contributes the single "not played" slot, so
//! the search space stays well-defined instead of collapsing. The full space
//! is the Cartesian product of the per-string candidate sets — worst case
//! `max_fret ^ string_count`, which is why both the fret window and a hard
//! cap on enumerated candidates are engine configuration, not constants.
//!
//! ## Scoring
//!
//! `score = ascending + 1 / max(finger_count, 1)`, where `ascending` is 1
//! when the played, non-open frets are non-decreasing in string order, and
//! `finger_count` counts strings needing a finger (neither unplayed nor
//! open). The divisor floor of 1 is a deliberate policy so an all-open or
//! all-muted fingering scores without dividing by zero; among equally
//! ascending candidates it biases toward fewer fingers.
//!
//! ```rust
//! use fretwork::{ChordCatalog, FingeringEngine, Fretboard, NamedChord, ToneSystem};
//!
//! let system = ToneSystem::western();
//! let catalog = ChordCatalog::standard();
//! let board = Fretboard::standard_guitar(&system);
//! let chord = NamedChord::new("C", "maj");
//!
//! let engine = FingeringEngine::default();
//! let best = engine.best_fingering(&chord, &board, &system, &catalog)?;
//! // The open-position C chord, high strings first: 0-1-0-2-3-0
//! assert_eq!(best.frets(), &[Some(0), Some(1), Some(0), Some(2), Some(3), Some(0)]);
//! # Ok::<(), fretwork::FretworkError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::chords::{ChordCatalog, NamedChord};
use crate::error::FretworkError;
use crate::fretboard::Fretboard;
use crate::system::ToneSystem;

/// One fret (or "not played") per string, in string order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingering(Vec<Option<u32>>);

impl Fingering {
    pub fn new(frets: Vec<Option<u32>>) -> Self {
        Fingering(frets)
    }

    pub fn frets(&self) -> &[Option<u32>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Strings that need a finger down: played and not open.
    pub fn finger_count(&self) -> usize {
        self.0.iter().flatten().filter(|&&f| f != 0).count()
    }

    /// Whether the played, non-open frets are non-decreasing in string
    /// order. Vacuously true when no fretted string exists.
    pub fn is_ascending(&self) -> bool {
        let mut prev = 0u32;
        for &fret in self.0.iter().flatten() {
            if fret == 0 {
                continue;
            }
            if fret < prev {
                return false;
            }
            prev = fret;
        }
        true
    }

    /// Whether no string is played at all.
    pub fn is_muted(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

/// Default fret search window, `[0, 7)`: the open-position frets.
pub const DEFAULT_MAX_FRET: u32 = 7;

/// Default hard cap on enumerated candidate fingerings.
pub const DEFAULT_CANDIDATE_CAP: usize = 1_000_000;

/// Enumerates, scores and selects fingerings for a chord on a fretboard.
///
/// Both bounds of the exponential search are configuration: `max_fret` sets
/// the per-string window `[0, max_fret)` and `candidate_cap` aborts the
/// search (recoverably, with [`FretworkError::SearchTruncated`]) before it
/// can enumerate an unreasonable candidate count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingeringEngine {
    pub max_fret: u32,
    pub candidate_cap: usize,
}

impl Default for FingeringEngine {
    fn default() -> Self {
        FingeringEngine {
            max_fret: DEFAULT_MAX_FRET,
            candidate_cap: DEFAULT_CANDIDATE_CAP,
        }
    }
}

impl FingeringEngine {
    pub fn new(max_fret: u32) -> Self {
        FingeringEngine {
            max_fret,
            ..FingeringEngine::default()
        }
    }

    /// The playability score: `ascending + 1 / max(finger_count, 1)`.
    ///
    /// The floor of 1 on the divisor is deliberate: an all-open or all-muted
    /// fingering has no fingers down and scores as if it needed one.
    pub fn score(fingering: &Fingering) -> f64 {
        let (ascending, fingers) = Self::score_key(fingering);
        (ascending as u8) as f64 + 1.0 / fingers as f64
    }

    /// Exact ordering key equivalent to [`FingeringEngine::score`]:
    /// ascending strictly dominates, then fewer effective fingers. Used for
    /// selection so float equality never decides a tie.
    fn score_key(fingering: &Fingering) -> (bool, usize) {
        (fingering.is_ascending(), fingering.finger_count().max(1))
    }

    fn ranking(fingering: &Fingering) -> (bool, std::cmp::Reverse<usize>) {
        let (ascending, fingers) = Self::score_key(fingering);
        (ascending, std::cmp::Reverse(fingers))
    }

    /// Per-string candidate frets for a set of acceptable pitch classes.
    ///
    /// A string with no candidate in the window yields `[None]` — unplayable,
    /// but still enumerable.
    fn string_candidates(
        &self,
        classes: &[usize],
        fretboard: &Fretboard<'_>,
    ) -> Result<Vec<Vec<Option<u32>>>, FretworkError> {
        let mut candidates = Vec::with_capacity(fretboard.len());
        for open in fretboard.strings() {
            let system = open.system().ok_or_else(|| {
                FretworkError::configuration("fretboard strings need an associated tone system")
            })?;
            let open_index = open.class_index()?;
            let modulus = system.len();
            let mut frets: Vec<Option<u32>> = (0..self.max_fret)
                .filter(|fret| classes.contains(&((open_index + *fret as usize) % modulus)))
                .map(Some)
                .collect();
            if frets.is_empty() {
                frets.push(None);
            }
            candidates.push(frets);
        }
        Ok(candidates)
    }

    /// Every candidate fingering for `classes` on `fretboard`, in Cartesian
    /// product order with the last string varying fastest.
    ///
    /// Fails with [`FretworkError::Configuration`] on a zero-string
    /// fretboard and [`FretworkError::SearchTruncated`] when the product
    /// exceeds the candidate cap.
    pub fn fingerings_for_classes(
        &self,
        classes: &[usize],
        fretboard: &Fretboard<'_>,
    ) -> Result<Vec<Fingering>, FretworkError> {
        if fretboard.is_empty() {
            return Err(FretworkError::configuration(
                "cannot search fingerings on a fretboard with zero strings",
            ));
        }
        let candidates = self.string_candidates(classes, fretboard)?;
        let total = candidates
            .iter()
            .try_fold(1usize, |acc, c| acc.checked_mul(c.len()))
            .filter(|total| *total <= self.candidate_cap)
            .ok_or(FretworkError::SearchTruncated {
                cap: self.candidate_cap,
            })?;

        let mut fingerings = Vec::with_capacity(total);
        let mut cursor = vec![0usize; candidates.len()];
        loop {
            fingerings.push(Fingering(
                cursor
                    .iter()
                    .zip(&candidates)
                    .map(|(&i, frets)| frets[i])
                    .collect(),
            ));
            // Odometer increment, last string fastest.
            let mut position = candidates.len();
            loop {
                if position == 0 {
                    return Ok(fingerings);
                }
                position -= 1;
                cursor[position] += 1;
                if cursor[position] < candidates[position].len() {
                    break;
                }
                cursor[position] = 0;
            }
        }
    }

    /// Every candidate fingering for a named chord.
    pub fn fingerings(
        &self,
        chord: &NamedChord,
        fretboard: &Fretboard<'_>,
        system: &ToneSystem,
        catalog: &ChordCatalog,
    ) -> Result<Vec<Fingering>, FretworkError> {
        let classes = chord.acceptable_pitch_classes(system, catalog)?;
        self.fingerings_for_classes(&classes, fretboard)
    }

    /// The best-scoring fingering; on ties, the first in enumeration order,
    /// so results are deterministic.
    pub fn best_fingering(
        &self,
        chord: &NamedChord,
        fretboard: &Fretboard<'_>,
        system: &ToneSystem,
        catalog: &ChordCatalog,
    ) -> Result<Fingering, FretworkError> {
        let all = self.fingerings(chord, fretboard, system, catalog)?;
        let best = all
            .into_iter()
            .reduce(|best, next| {
                if Self::ranking(&next) > Self::ranking(&best) {
                    next
                } else {
                    best
                }
            })
            .expect("a non-empty fretboard always yields at least one candidate");
        Ok(best)
    }

    /// Every fingering tied for the best score, in enumeration order.
    pub fn best_fingerings(
        &self,
        chord: &NamedChord,
        fretboard: &Fretboard<'_>,
        system: &ToneSystem,
        catalog: &ChordCatalog,
    ) -> Result<Vec<Fingering>, FretworkError> {
        let all = self.fingerings(chord, fretboard, system, catalog)?;
        let best = all
            .iter()
            .map(Self::ranking)
            .max()
            .expect("a non-empty fretboard always yields at least one candidate");
        Ok(all
            .into_iter()
            .filter(|f| Self::ranking(f) == best)
            .collect())
    }
}
