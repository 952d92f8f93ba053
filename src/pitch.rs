//! # Pitch Computation
//!
//! Maps a pitch-class index to a frequency, given a reference pitch and a
//! temperament. This is the interface playback code consumes; no audio
//! device state lives here.
//!
//! The reference pitch is the frequency of the system's first pitch class —
//! A4 = 440 Hz in the western system, which is ordered from A for exactly
//! this reason. A temperament turns an index into a frequency ratio within
//! the octave above the reference.

use serde::{Deserialize, Serialize};

use crate::error::FretworkError;
use crate::tone::Tone;

/// Concert-pitch reference: A = 440 Hz.
pub const REFERENCE_PITCH: f64 = 440.0;

/// How an index within the octave maps to a frequency ratio. Selected at the
/// call site; adding a temperament means adding a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperament {
    /// Equal division of the octave: ratio `2^(i/n)`.
    Equal,
    /// Fifth-stacked just ratios (3:2 powers reduced into the octave,
    /// sorted into chromatic order).
    Pythagorean,
}

impl Temperament {
    /// Frequency ratios for every index of an `n`-class system, ascending
    /// from 1 (the reference class) toward 2 (its octave).
    pub fn ratios(self, n: usize) -> Vec<f64> {
        match self {
            Temperament::Equal => (0..n).map(|i| 2f64.powf(i as f64 / n as f64)).collect(),
            Temperament::Pythagorean => {
                let mut ratios = Vec::with_capacity(n);
                let mut r = 1.0f64;
                for _ in 0..n {
                    ratios.push(r);
                    r *= 1.5;
                    while r >= 2.0 {
                        r /= 2.0;
                    }
                }
                ratios.sort_by(|a, b| a.total_cmp(b));
                ratios
            }
        }
    }

    /// The ratio for one pitch-class index.
    pub fn ratio(self, index: usize, n: usize) -> f64 {
        self.ratios(n)[index % n.max(1)]
    }
}

impl Tone<'_> {
    /// The frequency of this tone's pitch class in the octave above
    /// `reference` (the frequency of the system's first class).
    ///
    /// The octave field does not participate: pitch is a property of the
    /// class position, as in the original chart-and-playback model. Fails
    /// with [`FretworkError::Configuration`] when the tone has no system.
    pub fn frequency(
        &self,
        reference: f64,
        temperament: Temperament,
    ) -> Result<f64, FretworkError> {
        let system = self.system().ok_or_else(|| {
            FretworkError::configuration("pitch can only be computed with an associated tone system")
        })?;
        let index = self.class_index()?;
        Ok(reference * temperament.ratio(index, system.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::ToneSystem;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn reference_class_sounds_at_the_reference() {
        let system = ToneSystem::western();
        let a = Tone::parse_in("A4", &system).unwrap();
        let hz = a.frequency(REFERENCE_PITCH, Temperament::Equal).unwrap();
        assert!(close(hz, 440.0));
    }

    #[test]
    fn equal_temperament_fifth() {
        let system = ToneSystem::western();
        let e = Tone::parse_in("E", &system).unwrap();
        let hz = e.frequency(REFERENCE_PITCH, Temperament::Equal).unwrap();
        assert!(close(hz, 440.0 * 2f64.powf(7.0 / 12.0)));
        assert!((hz - 659.2551).abs() < 1e-3);
    }

    #[test]
    fn pythagorean_fifth_is_just() {
        let system = ToneSystem::western();
        let e = Tone::parse_in("E", &system).unwrap();
        let hz = e
            .frequency(REFERENCE_PITCH, Temperament::Pythagorean)
            .unwrap();
        assert!(close(hz, 660.0));
    }

    #[test]
    fn ratios_ascend_within_the_octave() {
        for temperament in [Temperament::Equal, Temperament::Pythagorean] {
            let ratios = temperament.ratios(12);
            assert_eq!(ratios.len(), 12);
            assert!(close(ratios[0], 1.0));
            for pair in ratios.windows(2) {
                assert!(pair[0] < pair[1]);
            }
            assert!(*ratios.last().unwrap() < 2.0);
        }
    }

    #[test]
    fn frequency_without_a_system_is_a_configuration_error() {
        let tone = Tone::parse("A4").unwrap();
        assert!(matches!(
            tone.frequency(REFERENCE_PITCH, Temperament::Equal),
            Err(FretworkError::Configuration { .. })
        ));
    }
}
