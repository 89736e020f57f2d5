//! # DC Blocker
//!
//! Asymmetric triangles and waveshaped voices in a narrow channel sit well away from zero. The DC blocker is the
//! usual one-pole, one-zero difference filter:
//!
//! `y[n] = x[n] - x[n-1] + g * y[n-1]`
//!
//! It is run through a first order Direct Form 1 section, which holds the filter memory.

use biquad::*;

/// The pole of the DC blocker, closer to 1.0 is a lower cutoff
pub const DC_BLOCK_GAIN: f64 = 0.998;

/// A DC blocking filter is represented here
pub struct DcBlocker {
    filter: DirectForm1<f64>,
}

impl DcBlocker {
    /// `DcBlocker::new()` is a new DC blocker with empty history and gain `DC_BLOCK_GAIN`
    pub fn new() -> Self {
        Self {
            filter: DirectForm1::<f64>::new(coeffs(DC_BLOCK_GAIN)),
        }
    }

    /// `dc.process(x)` is the sample `x` with the DC removed, must be called once per sample
    pub fn process(&mut self, input: f64) -> f64 {
        self.filter.run(input)
    }
}

impl Default for DcBlocker {
    fn default() -> Self {
        Self::new()
    }
}

/// `coeffs(g)` is the difference filter `1 - z^-1` over `1 - g z^-1`
fn coeffs(gain: f64) -> Coefficients<f64> {
    Coefficients {
        a1: -gain,
        a2: 0.0,
        b0: 1.0,
        b1: -1.0,
        b2: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_sample_passes_straight_through() {
        let mut dc = DcBlocker::new();
        assert_abs_diff_eq!(dc.process(0.75), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn constant_input_decays_by_the_gain_each_sample() {
        let mut dc = DcBlocker::new();

        let mut last = dc.process(0.5);
        for _ in 0..100 {
            let y = dc.process(0.5);
            assert_abs_diff_eq!(y, last * DC_BLOCK_GAIN, epsilon = 1e-12);
            last = y;
        }
    }

    #[test]
    fn constant_input_converges_to_zero() {
        let mut dc = DcBlocker::new();

        let mut y = 0.0;
        for _ in 0..20_000 {
            y = dc.process(0.5);
        }
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn alternating_input_is_passed() {
        let mut dc = DcBlocker::new();

        // settle, then check the swing is still close to the input swing
        let mut y = 0.0;
        for n in 0..1_000 {
            y = dc.process(if n % 2 == 0 { 1.0 } else { -1.0 });
        }
        assert!(0.99 < libm::fabs(y) && libm::fabs(y) < 1.01);
    }
}
