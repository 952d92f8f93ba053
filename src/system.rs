//! # Tone Systems
//!
//! A [`ToneSystem`] is the ordered catalog of pitch classes that all tone
//! arithmetic is performed against. Each pitch class carries one or more
//! enharmonic spellings (`C#` and `Db` name the same class); the class's
//! position in the catalog is its canonical index, and the number of classes
//! is the arithmetic modulus.
//!
//! The built-in [`ToneSystem::western`] system is the familiar 12-tone
//! chromatic catalog, ordered from A so that pitch computation against a
//! reference A can index straight into it.
//!
//! Systems are built once, never mutated, and passed by shared reference into
//! every computation. Custom systems can be deserialized from YAML as a list
//! of spelling lists:
//!
//! ```yaml
//! - [A]
//! - ["A#", Bb]
//! - [B]
//! ```

use serde::{Deserialize, Serialize};

use crate::error::FretworkError;

/// A single pitch class: a non-empty set of enharmonic spellings.
///
/// The first spelling is canonical (sharp-preferring in the western table)
/// and is what arithmetic results report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchClass {
    spellings: Vec<String>,
}

impl PitchClass {
    /// The canonical (first-listed) spelling.
    pub fn canonical(&self) -> &str {
        &self.spellings[0]
    }

    /// All spellings, canonical first.
    pub fn spellings(&self) -> &[String] {
        &self.spellings
    }

    /// Whether `name` is one of this class's spellings.
    pub fn has_spelling(&self, name: &str) -> bool {
        self.spellings.iter().any(|s| s == name)
    }
}

/// An ordered, immutable catalog of pitch classes.
///
/// The index of a class is its canonical position; the class count is the
/// modulus for all interval arithmetic, so the index space is closed under
/// addition modulo [`ToneSystem::len`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct ToneSystem {
    classes: Vec<PitchClass>,
}

impl ToneSystem {
    /// Build a system from ordered spelling groups.
    ///
    /// Fails if the catalog is empty, any class has no spellings, or the same
    /// spelling appears in two classes.
    pub fn new(spelling_groups: Vec<Vec<String>>) -> Result<Self, FretworkError> {
        if spelling_groups.is_empty() {
            return Err(FretworkError::configuration(
                "a tone system needs at least one pitch class",
            ));
        }
        let mut classes = Vec::with_capacity(spelling_groups.len());
        for spellings in spelling_groups {
            if spellings.is_empty() {
                return Err(FretworkError::configuration(
                    "every pitch class needs at least one spelling",
                ));
            }
            classes.push(PitchClass { spellings });
        }
        let system = ToneSystem { classes };
        for (i, class) in system.classes.iter().enumerate() {
            for spelling in class.spellings() {
                if system.index_of(spelling) != Some(i) {
                    return Err(FretworkError::configuration(format!(
                        "spelling {spelling:?} appears in more than one pitch class"
                    )));
                }
            }
        }
        Ok(system)
    }

    /// The standard 12-tone chromatic system, ordered from A.
    ///
    /// Sharps are canonical; each black-key class also carries its flat
    /// spelling. Because the catalog starts at A, interval arithmetic
    /// carries the octave when it wraps past G# back to A — not at C, as
    /// scientific pitch notation would.
    pub fn western() -> Self {
        let table: &[&[&str]] = &[
            &["A"],
            &["A#", "Bb"],
            &["B"],
            &["C"],
            &["C#", "Db"],
            &["D"],
            &["D#", "Eb"],
            &["E"],
            &["F"],
            &["F#", "Gb"],
            &["G"],
            &["G#", "Ab"],
        ];
        let groups = table
            .iter()
            .map(|names| names.iter().map(|n| n.to_string()).collect())
            .collect();
        ToneSystem::new(groups).expect("western tone table is well-formed")
    }

    /// Number of pitch classes — the arithmetic modulus.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The canonical index of any spelling of a pitch class, if recognized.
    pub fn index_of(&self, spelling: &str) -> Option<usize> {
        self.classes.iter().position(|c| c.has_spelling(spelling))
    }

    /// The pitch class at `index` (must be in range).
    pub fn class(&self, index: usize) -> &PitchClass {
        &self.classes[index]
    }

    /// Canonical spelling at `index`.
    pub fn canonical_spelling(&self, index: usize) -> &str {
        self.classes[index].canonical()
    }

    /// The spelling chord charts label roots with: the second spelling when a
    /// class has one (the flat form), the canonical spelling otherwise.
    pub fn chart_spelling(&self, index: usize) -> &str {
        let spellings = self.classes[index].spellings();
        spellings.get(1).unwrap_or(&spellings[0])
    }
}

impl TryFrom<Vec<Vec<String>>> for ToneSystem {
    type Error = FretworkError;

    fn try_from(groups: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        ToneSystem::new(groups)
    }
}

impl From<ToneSystem> for Vec<Vec<String>> {
    fn from(system: ToneSystem) -> Self {
        system
            .classes
            .into_iter()
            .map(|class| class.spellings)
            .collect()
    }
}
