//! # Chord Catalog and Named Chords
//!
//! A [`ChordCatalog`] maps quality labels (`"maj7"`, `"m"`, `"5"`, ...) to
//! ordered semitone offsets from a root, with synonym labels (`""`, `"M"`,
//! `"min"`, ...) aliasing the same offsets. A [`NamedChord`] is a (root,
//! quality) pair; its acceptable pitch classes are derived by applying each
//! offset to the root under a tone system.
//!
//! ```rust
//! use fretwork::{ChordCatalog, NamedChord, ToneSystem};
//!
//! let system = ToneSystem::western();
//! let catalog = ChordCatalog::standard();
//! let chord = NamedChord::new("C", "maj");
//! let classes = chord.acceptable_pitch_classes(&system, &catalog)?;
//! let names: Vec<&str> = classes
//!     .iter()
//!     .map(|&i| system.canonical_spelling(i))
//!     .collect();
//! assert_eq!(names, ["C", "E", "G"]);
//! # Ok::<(), fretwork::FretworkError>(())
//! ```
//!
//! The catalog is built once and passed by reference; extra qualities can be
//! merged in from YAML (see [`ChordCatalog::from_yaml`]).

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::FretworkError;
use crate::system::ToneSystem;
use crate::tone::Tone;

/// Canonical qualities and their semitone offsets from the root.
///
/// The first offset is always 0 (the root itself).
const STANDARD_QUALITIES: &[(&str, &[i32])] = &[
    ("maj", &[0, 4, 7]),
    ("m", &[0, 3, 7]),
    ("aug", &[0, 4, 8]),
    ("dim", &[0, 3, 6]),
    ("maj6", &[0, 4, 7, 9]),
    ("min6", &[0, 3, 7, 9]),
    ("7", &[0, 4, 7, 10]),
    ("maj7", &[0, 4, 7, 11]),
    ("min7", &[0, 3, 7, 10]),
    ("aug7", &[0, 4, 8, 10]),
    ("dim7", &[0, 3, 6, 9]),
    ("m7b5", &[0, 3, 6, 10]),
    ("mM7", &[0, 3, 7, 11]),
    ("maj9", &[0, 4, 7, 11, 14]),
    ("9", &[0, 4, 7, 10, 14]),
    ("mM9", &[0, 3, 7, 11, 14]),
    ("min9", &[0, 3, 7, 10, 14]),
    ("+M9", &[0, 4, 8, 11, 14]),
    ("aug9", &[0, 4, 8, 10, 14]),
    ("5", &[0, 7]),
];

/// Synonym labels and the canonical quality each aliases.
///
/// Several labels mapping to one offset tuple is intentional: `"C"`, `"CM"`
/// and `"Cmaj"` are all the same chord.
const STANDARD_SYNONYMS: &[(&str, &str)] = &[
    ("", "maj"),
    ("M", "maj"),
    ("min", "m"),
    ("+", "aug"),
    ("0", "dim"),
    ("6", "maj6"),
    ("M6", "maj6"),
    ("m6", "min6"),
    ("M7", "maj7"),
    ("m7", "min7"),
    ("+7", "aug7"),
    ("07", "dim7"),
    ("min/maj7", "mM7"),
    ("min(maj7)", "mM7"),
];

/// An immutable mapping from quality label to semitone offsets, with synonym
/// aliasing.
#[derive(Debug, Clone)]
pub struct ChordCatalog {
    qualities: BTreeMap<String, Vec<i32>>,
    synonyms: BTreeMap<String, String>,
}

/// Serde mirror for YAML catalogs; validated on conversion.
#[derive(Debug, Default, Deserialize)]
struct CatalogDoc {
    #[serde(default)]
    qualities: BTreeMap<String, Vec<i32>>,
    #[serde(default)]
    synonyms: BTreeMap<String, String>,
}

impl ChordCatalog {
    /// An empty catalog. Usually you want [`ChordCatalog::standard`].
    pub fn new() -> Self {
        ChordCatalog {
            qualities: BTreeMap::new(),
            synonyms: BTreeMap::new(),
        }
    }

    /// The standard western catalog: triads, sixths, sevenths, ninths and the
    /// power chord, plus their common synonym labels.
    pub fn standard() -> Self {
        let mut catalog = ChordCatalog::new();
        for &(quality, offsets) in STANDARD_QUALITIES {
            catalog
                .insert(quality, offsets.to_vec())
                .expect("standard quality table is well-formed");
        }
        for &(alias, quality) in STANDARD_SYNONYMS {
            catalog
                .add_synonym(alias, quality)
                .expect("standard synonym table is well-formed");
        }
        catalog
    }

    /// Parse a catalog from YAML and merge it over the standard one.
    ///
    /// ```yaml
    /// qualities:
    ///   sus2: [0, 2, 7]
    ///   sus4: [0, 5, 7]
    /// synonyms:
    ///   2: sus2
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, FretworkError> {
        let doc: CatalogDoc =
            serde_yaml::from_str(source).map_err(|e| FretworkError::Config(e.to_string()))?;
        let mut catalog = ChordCatalog::standard();
        catalog.merge_doc(doc)?;
        Ok(catalog)
    }

    fn merge_doc(&mut self, doc: CatalogDoc) -> Result<(), FretworkError> {
        for (quality, offsets) in doc.qualities {
            self.insert(quality, offsets)?;
        }
        for (alias, quality) in doc.synonyms {
            self.add_synonym(alias, &quality)?;
        }
        Ok(())
    }

    /// Register a quality. The first offset must be 0.
    pub fn insert(
        &mut self,
        quality: impl Into<String>,
        offsets: Vec<i32>,
    ) -> Result<(), FretworkError> {
        let quality = quality.into();
        if offsets.first() != Some(&0) {
            return Err(FretworkError::Config(format!(
                "quality {quality:?} must start at offset 0, got {offsets:?}"
            )));
        }
        self.qualities.insert(quality, offsets);
        Ok(())
    }

    /// Register `alias` as a synonym for an existing quality.
    pub fn add_synonym(
        &mut self,
        alias: impl Into<String>,
        quality: &str,
    ) -> Result<(), FretworkError> {
        if !self.qualities.contains_key(quality) {
            return Err(FretworkError::UnknownQuality {
                label: quality.to_string(),
            });
        }
        self.synonyms.insert(alias.into(), quality.to_string());
        Ok(())
    }

    /// Resolve a label (canonical or synonym) to its offsets.
    pub fn offsets(&self, label: &str) -> Result<&[i32], FretworkError> {
        if let Some(offsets) = self.qualities.get(label) {
            return Ok(offsets);
        }
        if let Some(quality) = self.synonyms.get(label) {
            if let Some(offsets) = self.qualities.get(quality) {
                return Ok(offsets);
            }
        }
        Err(FretworkError::UnknownQuality {
            label: label.to_string(),
        })
    }

    /// Whether `label` resolves to a quality, directly or via synonym.
    pub fn contains(&self, label: &str) -> bool {
        self.qualities.contains_key(label) || self.synonyms.contains_key(label)
    }

    /// Canonical quality labels, sorted.
    pub fn qualities(&self) -> impl Iterator<Item = &str> {
        self.qualities.keys().map(String::as_str)
    }

    /// Every label: canonical qualities and synonyms, sorted, synonyms after
    /// their canonical set. Chart building iterates these, so a chart carries
    /// an entry for `"C"` and `"CM"` as well as `"Cmaj"`.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.qualities
            .keys()
            .chain(self.synonyms.keys())
            .map(String::as_str)
    }
}

impl Default for ChordCatalog {
    fn default() -> Self {
        ChordCatalog::standard()
    }
}

/// A chord named by root spelling and quality label, e.g. `("C", "maj7")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedChord {
    root: String,
    quality: String,
}

impl NamedChord {
    pub fn new(root: impl Into<String>, quality: impl Into<String>) -> Self {
        NamedChord {
            root: root.into(),
            quality: quality.into(),
        }
    }

    /// Parse a chord name like `"Cmaj7"`, `"Bbm"` or `"F#"` into root and
    /// quality, validating both against the given system and catalog.
    ///
    /// The root is the leading letter plus an optional `#` or `b`; the rest
    /// of the string is the quality label (empty means major, via the
    /// standard synonym table).
    pub fn parse(
        name: &str,
        system: &ToneSystem,
        catalog: &ChordCatalog,
    ) -> Result<Self, FretworkError> {
        let mut root_len = 0;
        let mut chars = name.chars();
        if chars.next().map(|c| c.is_ascii_alphabetic()) == Some(true) {
            root_len = 1;
            if let Some(c) = chars.next() {
                if c == '#' || c == 'b' {
                    root_len = 2;
                }
            }
        }
        let (root, quality) = name.split_at(root_len);
        if root.is_empty() || system.index_of(root).is_none() {
            return Err(FretworkError::UnknownTone {
                name: name.to_string(),
            });
        }
        // Surface bad quality labels at parse time rather than at search time.
        catalog.offsets(quality)?;
        Ok(NamedChord::new(root, quality))
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn quality(&self) -> &str {
        &self.quality
    }

    /// The chord's display name: root spelling directly followed by the
    /// quality label.
    pub fn name(&self) -> String {
        format!("{}{}", self.root, self.quality)
    }

    /// The root as a tone in `system`. Flat spellings are accepted and
    /// resolve to the same pitch class as their sharp form.
    pub fn root_tone<'s>(&self, system: &'s ToneSystem) -> Result<Tone<'s>, FretworkError> {
        Tone::new(self.root.clone(), None, system)
    }

    /// The pitch classes this chord accepts: each catalog offset applied to
    /// the (normalized) root. Duplicate classes are kept; order follows the
    /// offset tuple.
    pub fn acceptable_pitch_classes(
        &self,
        system: &ToneSystem,
        catalog: &ChordCatalog,
    ) -> Result<Vec<usize>, FretworkError> {
        let root_index = self.root_tone(system)?.class_index()?;
        let modulus = system.len() as i32;
        Ok(catalog
            .offsets(&self.quality)?
            .iter()
            .map(|&offset| (root_index as i32 + offset).rem_euclid(modulus) as usize)
            .collect())
    }

    /// Acceptable pitch classes by canonical spelling, in offset order.
    pub fn acceptable_spellings<'s>(
        &self,
        system: &'s ToneSystem,
        catalog: &ChordCatalog,
    ) -> Result<Vec<&'s str>, FretworkError> {
        Ok(self
            .acceptable_pitch_classes(system, catalog)?
            .into_iter()
            .map(|i| system.canonical_spelling(i))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_triad_is_root_third_fifth() {
        let system = ToneSystem::western();
        let catalog = ChordCatalog::standard();
        let chord = NamedChord::new("C", "maj");
        let names = chord.acceptable_spellings(&system, &catalog).unwrap();
        assert_eq!(names, ["C", "E", "G"]);
    }

    #[test]
    fn synonyms_alias_identical_offsets() {
        let catalog = ChordCatalog::standard();
        assert_eq!(catalog.offsets("maj").unwrap(), catalog.offsets("").unwrap());
        assert_eq!(catalog.offsets("M").unwrap(), &[0, 4, 7]);
        assert_eq!(catalog.offsets("min").unwrap(), catalog.offsets("m").unwrap());
        assert_eq!(catalog.offsets("07").unwrap(), &[0, 3, 6, 9]);
    }

    #[test]
    fn unknown_quality_is_rejected() {
        let catalog = ChordCatalog::standard();
        assert!(matches!(
            catalog.offsets("sus13"),
            Err(FretworkError::UnknownQuality { .. })
        ));
    }

    #[test]
    fn flat_roots_normalize_before_offsets() {
        let system = ToneSystem::western();
        let catalog = ChordCatalog::standard();
        let chord = NamedChord::new("Bb", "maj");
        let names = chord.acceptable_spellings(&system, &catalog).unwrap();
        assert_eq!(names, ["A#", "D", "F"]);
    }

    #[test]
    fn ninth_offsets_wrap_past_the_octave() {
        let system = ToneSystem::western();
        let catalog = ChordCatalog::standard();
        let chord = NamedChord::new("C", "maj9");
        // Offset 14 lands on D, one octave up; class-wise it wraps.
        let names = chord.acceptable_spellings(&system, &catalog).unwrap();
        assert_eq!(names, ["C", "E", "G", "B", "D"]);
    }

    #[test]
    fn parse_splits_root_and_quality() {
        let system = ToneSystem::western();
        let catalog = ChordCatalog::standard();

        let chord = NamedChord::parse("Cmaj7", &system, &catalog).unwrap();
        assert_eq!(chord.root(), "C");
        assert_eq!(chord.quality(), "maj7");

        let chord = NamedChord::parse("Bbm", &system, &catalog).unwrap();
        assert_eq!(chord.root(), "Bb");
        assert_eq!(chord.quality(), "m");

        let chord = NamedChord::parse("F#", &system, &catalog).unwrap();
        assert_eq!(chord.root(), "F#");
        assert_eq!(chord.quality(), "");

        assert!(NamedChord::parse("Hmaj", &system, &catalog).is_err());
        assert!(NamedChord::parse("Cwat", &system, &catalog).is_err());
    }

    #[test]
    fn yaml_catalog_merges_over_standard() {
        let catalog = ChordCatalog::from_yaml(
            "qualities:\n  sus4: [0, 5, 7]\nsynonyms:\n  '4': sus4\n",
        )
        .unwrap();
        assert_eq!(catalog.offsets("sus4").unwrap(), &[0, 5, 7]);
        assert_eq!(catalog.offsets("4").unwrap(), &[0, 5, 7]);
        assert_eq!(catalog.offsets("maj").unwrap(), &[0, 4, 7]);
    }

    #[test]
    fn yaml_catalog_rejects_nonzero_first_offset() {
        let result = ChordCatalog::from_yaml("qualities:\n  broken: [1, 5]\n");
        assert!(matches!(result, Err(FretworkError::Config(_))));
    }

    #[test]
    fn labels_cover_qualities_and_synonyms() {
        let catalog = ChordCatalog::standard();
        let labels: Vec<&str> = catalog.labels().collect();
        assert_eq!(labels.len(), 34);
        assert!(labels.contains(&""));
        assert!(labels.contains(&"maj"));
        assert!(labels.contains(&"min(maj7)"));
    }
}
