//! # Cross modulation
//!
//! Any voice can push any other voice's frequency around. The matrix entry `[from][to]` is how strongly the position
//! of voice `from` scales the frequency of voice `to`:
//!
//! `f_to = |f_nominal * (1 + sum(position_from * weight[from][to]))|`
//!
//! The sum costs `voice_count` multiplies per voice per sample, so an `active` flag tracks whether any weight is
//! non-zero at all and the whole thing is skipped when none is.

use crate::{bounce::MAX_VOICES, error::*};

/// The largest magnitude a cross modulation weight can be set to
pub const MAX_CROSS_MOD: f64 = 40.0;

/// A square matrix of cross modulation weights is represented here
#[derive(Clone, Debug, PartialEq)]
pub struct CrossModMatrix {
    weights: [[f64; MAX_VOICES]; MAX_VOICES],
    voice_count: usize,
    active: bool,
}

impl CrossModMatrix {
    /// `CrossModMatrix::new(n)` is an all-zero matrix for `n` voices, `n` is limited to `[1, MAX_VOICES]`
    pub fn new(voice_count: usize) -> Self {
        Self {
            weights: [[0.0; MAX_VOICES]; MAX_VOICES],
            voice_count: voice_count.max(1).min(MAX_VOICES),
            active: false,
        }
    }

    /// `fm.set(from, to, w)` sets the weight of voice `from` on voice `to` to `w`, limited to `MAX_CROSS_MOD`
    ///
    /// Setting a non-zero weight always turns the matrix on. Setting a zero weight rescans the matrix and turns it off
    /// if that was the last non-zero weight.
    ///
    /// # Errors
    ///
    /// `Error::InvalidVoice` if either index is out of range. Nothing is written, the matrix is rescanned as if a zero
    /// had been.
    pub fn set(&mut self, from: usize, to: usize, weight: f64) -> Result<()> {
        if let Some(&index) = [from, to].iter().find(|&&i| i >= self.voice_count) {
            self.active = self.any_non_zero();
            return Err(Error::InvalidVoice {
                index,
                voice_count: self.voice_count,
            });
        }

        let weight = if weight.is_nan() {
            0.0
        } else {
            weight.max(-MAX_CROSS_MOD).min(MAX_CROSS_MOD)
        };

        self.weights[from][to] = weight;

        self.active = if weight == 0.0 {
            self.any_non_zero()
        } else {
            true
        };

        Ok(())
    }

    /// `fm.clear()` zeros every weight and turns the matrix off
    pub fn clear(&mut self) {
        self.weights = [[0.0; MAX_VOICES]; MAX_VOICES];
        self.active = false;
    }

    /// `fm.weight(from, to)` is the weight of voice `from` on voice `to`, zero for out of range indices
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        if from < self.voice_count && to < self.voice_count {
            self.weights[from][to]
        } else {
            0.0
        }
    }

    /// `fm.is_active()` is true iff some weight may be non-zero
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `fm.voice_count()` is the number of voices the matrix covers
    pub fn voice_count(&self) -> usize {
        self.voice_count
    }

    /// `fm.modulated_frequency(to, f, ps)` is frequency `f` of voice `to` after modulation by voice positions `ps`
    ///
    /// `ps` yields the current position of each voice in index order. When the matrix is off `f` is returned as is.
    pub fn modulated_frequency<I>(&self, to: usize, freq: f64, positions: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        if !self.active {
            return freq;
        }

        let mut mod_sum = 1.0_f64;
        for (from, p) in positions.into_iter().enumerate().take(self.voice_count) {
            let w = self.weights[from][to];
            if w != 0.0 {
                mod_sum += p * w;
            }
        }

        // max also takes care of a NaN product
        libm::fabs(freq * mod_sum).max(0.0)
    }

    /// `fm.any_non_zero()` is true iff any weight in the matrix is non-zero
    fn any_non_zero(&self) -> bool {
        self.weights[..self.voice_count]
            .iter()
            .any(|row| row[..self.voice_count].iter().any(|&w| w != 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_matrix_is_a_pass_through() {
        for n in 1..=MAX_VOICES {
            let fm = CrossModMatrix::new(n);
            assert!(!fm.is_active());

            let positions = [0.9; MAX_VOICES];
            for to in 0..n {
                assert_eq!(fm.modulated_frequency(to, 123.456, positions.iter().copied()), 123.456);
            }
        }
    }

    #[test]
    fn non_zero_weight_turns_the_matrix_on() {
        let mut fm = CrossModMatrix::new(3);
        fm.set(0, 2, 5.0).unwrap();
        assert!(fm.is_active());
        assert_eq!(fm.weight(0, 2), 5.0);
    }

    #[test]
    fn zeroing_the_last_weight_turns_the_matrix_off() {
        let mut fm = CrossModMatrix::new(3);
        fm.set(0, 2, 5.0).unwrap();
        fm.set(1, 1, -2.0).unwrap();

        fm.set(0, 2, 0.0).unwrap();
        assert!(fm.is_active());

        fm.set(1, 1, 0.0).unwrap();
        assert!(!fm.is_active());
    }

    #[test]
    fn clear_turns_everything_off() {
        let mut fm = CrossModMatrix::new(4);
        fm.set(3, 0, 1.0).unwrap();
        fm.set(2, 1, 1.0).unwrap();

        fm.clear();
        assert!(!fm.is_active());
        assert_eq!(fm.weight(3, 0), 0.0);
        assert_eq!(fm.weight(2, 1), 0.0);
    }

    #[test]
    fn weights_are_limited() {
        let mut fm = CrossModMatrix::new(2);
        fm.set(0, 1, 100.0).unwrap();
        assert_eq!(fm.weight(0, 1), MAX_CROSS_MOD);

        fm.set(1, 0, -100.0).unwrap();
        assert_eq!(fm.weight(1, 0), -MAX_CROSS_MOD);
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut fm = CrossModMatrix::new(3);
        fm.set(0, 1, 2.0).unwrap();

        assert_eq!(
            fm.set(3, 1, 2.0),
            Err(Error::InvalidVoice {
                index: 3,
                voice_count: 3
            })
        );
        assert_eq!(
            fm.set(0, 7, 2.0),
            Err(Error::InvalidVoice {
                index: 7,
                voice_count: 3
            })
        );

        // existing weights survive and the flag is still right
        assert!(fm.is_active());
        assert_eq!(fm.weight(0, 1), 2.0);
    }

    #[test]
    fn modulation_sums_weighted_positions() {
        let mut fm = CrossModMatrix::new(3);
        fm.set(0, 2, 5.0).unwrap();
        fm.set(1, 2, -1.0).unwrap();

        let positions = [0.2, 0.5, -1.0];

        // 1 + 0.2 * 5 - 0.5 = 1.5
        let f = fm.modulated_frequency(2, 100.0, positions.iter().copied());
        assert!(crate::utils::is_almost(f, 150.0, 1e-9));

        // voice 0 has nothing coming in
        assert_eq!(fm.modulated_frequency(0, 100.0, positions.iter().copied()), 100.0);
    }

    #[test]
    fn negative_modulation_is_folded_back_positive() {
        let mut fm = CrossModMatrix::new(2);
        fm.set(0, 1, 5.0).unwrap();

        // 1 + -1 * 5 = -4
        let f = fm.modulated_frequency(1, 100.0, [-1.0, 0.0]);
        assert!(crate::utils::is_almost(f, 400.0, 1e-9));
    }
}
