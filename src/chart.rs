//! # Chord Charts
//!
//! A [`ChartBuilder`] runs the fingering engine over every (root, quality)
//! pair in a catalog against one fretboard, producing a [`Chart`]: a name →
//! fingering map. One entry failing never aborts the batch; its error is
//! recorded next to the successful entries instead.
//!
//! Chart entries are named root-then-label, with the root spelled in its
//! chart form (flat spelling when the class has one): `"Bbmaj7"`, `"C"`,
//! `"F#m"` and so on. Labels include synonyms, so `"C"`, `"CM"` and `"Cmaj"`
//! each get an entry — intentionally, since that is how players look chords
//! up.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::chords::{ChordCatalog, NamedChord};
use crate::error::FretworkError;
use crate::fingering::{Fingering, FingeringEngine};
use crate::fretboard::Fretboard;
use crate::system::ToneSystem;

/// The result of building a chart: best fingerings by chord name, plus any
/// per-entry failures (by chord name, as display strings).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Chart {
    pub fingerings: BTreeMap<String, Fingering>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl Chart {
    /// Total outcomes recorded, successes and failures together. Equals the
    /// number of entries the builder was asked for.
    pub fn len(&self) -> usize {
        self.fingerings.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerings.is_empty() && self.errors.is_empty()
    }
}

/// Applies a [`FingeringEngine`] across a whole catalog for one fretboard.
#[derive(Debug, Clone)]
pub struct ChartBuilder<'a> {
    system: &'a ToneSystem,
    catalog: &'a ChordCatalog,
    engine: FingeringEngine,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(system: &'a ToneSystem, catalog: &'a ChordCatalog) -> Self {
        ChartBuilder {
            system,
            catalog,
            engine: FingeringEngine::default(),
        }
    }

    pub fn with_engine(mut self, engine: FingeringEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Every chord the full chart covers: each pitch class (in chart
    /// spelling) crossed with every catalog label.
    pub fn all_chords(&self) -> Vec<NamedChord> {
        let mut chords = Vec::new();
        for index in 0..self.system.len() {
            let root = self.system.chart_spelling(index);
            for label in self.catalog.labels() {
                chords.push(NamedChord::new(root, label));
            }
        }
        chords
    }

    /// Build the full chart for `fretboard`.
    ///
    /// An empty fretboard is the one fatal condition; everything else —
    /// including chords entirely unplayable in the fret window — produces an
    /// entry.
    pub fn build(&self, fretboard: &Fretboard<'_>) -> Result<Chart, FretworkError> {
        self.build_chords(&self.all_chords(), fretboard)
    }

    /// Build a chart for an explicit list of chords.
    ///
    /// Per-entry failures (an unknown quality in a hand-built list, a
    /// truncated search) are recorded in [`Chart::errors`] under the chord's
    /// name and never abort the remaining entries.
    pub fn build_chords(
        &self,
        chords: &[NamedChord],
        fretboard: &Fretboard<'_>,
    ) -> Result<Chart, FretworkError> {
        if fretboard.is_empty() {
            return Err(FretworkError::configuration(
                "cannot build a chart for a fretboard with zero strings",
            ));
        }
        let mut chart = Chart::default();
        for chord in chords {
            match self
                .engine
                .best_fingering(chord, fretboard, self.system, self.catalog)
            {
                Ok(fingering) => {
                    chart.fingerings.insert(chord.name(), fingering);
                }
                Err(error) => {
                    chart.errors.insert(chord.name(), error.to_string());
                }
            }
        }
        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_chart_covers_every_root_label_pair() {
        let system = ToneSystem::western();
        let catalog = ChordCatalog::standard();
        let board = Fretboard::from_names(&system, &["A2", "E2"]).unwrap();
        let builder = ChartBuilder::new(&system, &catalog);

        let expected = system.len() * catalog.labels().count();
        let chart = builder.build(&board).unwrap();
        assert_eq!(chart.len(), expected);
        assert!(chart.errors.is_empty());
    }

    #[test]
    fn chart_roots_use_flat_spellings() {
        let system = ToneSystem::western();
        let catalog = ChordCatalog::standard();
        let board = Fretboard::from_names(&system, &["A2", "E2"]).unwrap();
        let chart = ChartBuilder::new(&system, &catalog).build(&board).unwrap();

        assert!(chart.fingerings.contains_key("Bbmaj7"));
        assert!(chart.fingerings.contains_key("C"));
        assert!(!chart.fingerings.contains_key("A#maj7"));
    }

    #[test]
    fn bad_entries_are_recorded_not_raised() {
        let system = ToneSystem::western();
        let catalog = ChordCatalog::standard();
        let board = Fretboard::from_names(&system, &["A2", "E2"]).unwrap();
        let chords = vec![
            NamedChord::new("C", "maj"),
            NamedChord::new("C", "nonsense"),
            NamedChord::new("D", "m"),
        ];

        let chart = ChartBuilder::new(&system, &catalog)
            .build_chords(&chords, &board)
            .unwrap();
        assert_eq!(chart.len(), 3);
        assert_eq!(chart.fingerings.len(), 2);
        assert!(chart.errors.contains_key("Cnonsense"));
    }

    #[test]
    fn unplayable_chords_still_get_entries() {
        let system = ToneSystem::western();
        let catalog = ChordCatalog::standard();
        let board = Fretboard::from_names(&system, &["E4", "A2"]).unwrap();
        let builder = ChartBuilder::new(&system, &catalog)
            .with_engine(FingeringEngine::new(1));

        let chart = builder
            .build_chords(&[NamedChord::new("F#", "maj")], &board)
            .unwrap();
        let fingering = &chart.fingerings["F#maj"];
        assert!(fingering.is_muted());
    }

    #[test]
    fn empty_fretboard_fails_the_whole_batch() {
        let system = ToneSystem::western();
        let catalog = ChordCatalog::standard();
        let builder = ChartBuilder::new(&system, &catalog);
        assert!(matches!(
            builder.build(&Fretboard::new(vec![])),
            Err(FretworkError::Configuration { .. })
        ));
    }
}
