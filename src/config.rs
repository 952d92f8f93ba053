//! YAML configuration for the CLI: tuning, engine bounds and extra chord
//! qualities, all optional with sensible defaults.
//!
//! ```yaml
//! tuning: [D4, A3, F3, C3, G2, D2]
//! max_fret: 9
//! chords:
//!   sus4: [0, 5, 7]
//! synonyms:
//!   sus: sus4
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::chords::ChordCatalog;
use crate::error::FretworkError;
use crate::fingering::{FingeringEngine, DEFAULT_CANDIDATE_CAP, DEFAULT_MAX_FRET};
use crate::fretboard::Fretboard;
use crate::system::ToneSystem;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Open-string tones, one per string, in string order.
    pub tuning: Vec<String>,
    /// Fret search window `[0, max_fret)`.
    pub max_fret: u32,
    /// Hard cap on enumerated candidate fingerings.
    pub candidate_cap: usize,
    /// Extra qualities merged over the standard catalog.
    pub chords: BTreeMap<String, Vec<i32>>,
    /// Extra synonym labels.
    pub synonyms: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tuning: ["E4", "B3", "G3", "D3", "A2", "E2"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_fret: DEFAULT_MAX_FRET,
            candidate_cap: DEFAULT_CANDIDATE_CAP,
            chords: BTreeMap::new(),
            synonyms: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn from_yaml(source: &str) -> Result<Self, FretworkError> {
        serde_yaml::from_str(source).map_err(|e| FretworkError::Config(e.to_string()))
    }

    /// The standard catalog with this config's extra chords merged in.
    pub fn catalog(&self) -> Result<ChordCatalog, FretworkError> {
        let mut catalog = ChordCatalog::standard();
        for (quality, offsets) in &self.chords {
            catalog.insert(quality.clone(), offsets.clone())?;
        }
        for (alias, quality) in &self.synonyms {
            catalog.add_synonym(alias.clone(), quality)?;
        }
        Ok(catalog)
    }

    pub fn engine(&self) -> FingeringEngine {
        FingeringEngine {
            max_fret: self.max_fret,
            candidate_cap: self.candidate_cap,
        }
    }

    pub fn fretboard<'s>(&self, system: &'s ToneSystem) -> Result<Fretboard<'s>, FretworkError> {
        Fretboard::from_names(system, &self.tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_setup() {
        let config = Config::default();
        assert_eq!(config.tuning.len(), 6);
        assert_eq!(config.max_fret, DEFAULT_MAX_FRET);
        assert!(config.chords.is_empty());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("max_fret: 9\n").unwrap();
        assert_eq!(config.max_fret, 9);
        assert_eq!(config.tuning.len(), 6);
        assert_eq!(config.candidate_cap, DEFAULT_CANDIDATE_CAP);
    }

    #[test]
    fn custom_chords_merge_into_the_catalog() {
        let config =
            Config::from_yaml("chords:\n  sus4: [0, 5, 7]\nsynonyms:\n  sus: sus4\n").unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.offsets("sus").unwrap(), &[0, 5, 7]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            Config::from_yaml("frets: 12\n"),
            Err(FretworkError::Config(_))
        ));
    }

    #[test]
    fn drop_d_tuning_builds_a_fretboard() {
        let system = ToneSystem::western();
        let config = Config::from_yaml("tuning: [E4, B3, G3, D3, A2, D2]\n").unwrap();
        let board = config.fretboard(&system).unwrap();
        assert_eq!(board.strings()[5].full_name(), "D2");
    }
}
