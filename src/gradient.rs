//! # Gradients and frequency limits
//!
//! A bounce voice is a triangle whose rising and falling edges have independent slopes. The rising slope `a` comes
//! from the symmetry control, `a = 1 / symmetry`, and the falling slope is its complement `b = -a / (a - 1)` so that
//! one rise plus one fall always takes the same time no matter the symmetry.
//!
//! Both the frequency and the rising slope are limited every sample against the width of the channel the voice is
//! currently bouncing in. A steep edge in a wide channel at a high step size would jump clean over the transition
//! region, so the slope ceiling shrinks as the step grows.

use crate::utils::*;

/// The smallest symmetry, a nearly vertical rising edge
pub const SYMMETRY_MIN: f64 = 0.001;

/// The largest symmetry, a nearly vertical falling edge
pub const SYMMETRY_MAX: f64 = 0.999;

/// The lowest frequency a voice will run at, in Hertz
pub const FREQ_MIN: f64 = 0.001;

/// The highest settable frequency ceiling, in Hertz
pub const FREQ_MAX: f64 = 15_000.0;

/// A triangle symmetry in `[SYMMETRY_MIN, SYMMETRY_MAX]` is represented here
///
/// `0.5` is a symmetrical triangle, smaller values give a faster rising edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Symmetry(f64);

impl Symmetry {
    /// `symm.value()` is the clamped symmetry value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// `symm.rise()` is the rising edge gradient for this symmetry, in `[1/SYMMETRY_MAX, 1/SYMMETRY_MIN]`
    pub fn rise(&self) -> f64 {
        1.0 / self.0
    }
}

impl From<f64> for Symmetry {
    fn from(s: f64) -> Self {
        // NaN compares false against both limits, send it to the middle
        if s.is_nan() {
            return Self(0.5);
        }
        Self(s.max(SYMMETRY_MIN).min(SYMMETRY_MAX))
    }
}

impl Default for Symmetry {
    fn default() -> Self {
        Self(0.5)
    }
}

/// The pair of edge gradients for one symmetry setting is represented here
///
/// Cached at control rate, the per-sample path re-limits the rising gradient and derives the fall from that.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slopes {
    pub rise: f64,
    pub fall: f64,
}

impl From<Symmetry> for Slopes {
    fn from(symm: Symmetry) -> Self {
        let rise = symm.rise();
        Self {
            rise,
            fall: fall_gradient(rise),
        }
    }
}

impl Default for Slopes {
    fn default() -> Self {
        Symmetry::default().into()
    }
}

/// `fall_gradient(a)` is the falling gradient complementing rising gradient `a`
///
/// `a` must be greater than 1.0, which `limit_gradient` guarantees.
pub fn fall_gradient(rise: f64) -> f64 {
    -rise / (rise - 1.0)
}

/// `gradient_range(w, t)` is the `(min, max)` legal rising gradient for channel width `w` and time step `t`
///
/// The maximum is never less than 2, so the minimum `max / (max - 1)` is always in `(1, 2]`.
pub fn gradient_range(width: f64, t: f64) -> (f64, f64) {
    let amp_max = (width / (4.0 * t)).max(2.0);
    let amp_min = amp_max / (amp_max - 1.0);
    (amp_min, amp_max)
}

/// `limit_gradient(a, w, t)` is the rising gradient `a` limited to what channel width `w` and time step `t` allow
pub fn limit_gradient(rise: f64, width: f64, t: f64) -> f64 {
    let (amp_min, amp_max) = gradient_range(width, t);
    limit(rise, amp_min, amp_max)
}

/// `limit_frequency(f, w, fh)` is frequency `f` limited to `[FREQ_MIN, fh * w]`
///
/// `fh` is half of the frequency ceiling. The ceiling check comes first, so in a channel so thin that `fh * w` is
/// below `FREQ_MIN` the result is the thin-channel ceiling.
pub fn limit_frequency(freq: f64, width: f64, half_ceiling: f64) -> f64 {
    limit(freq, FREQ_MIN, half_ceiling * width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn symmetry_below_minimum_clamps_without_blowing_up() {
        let symm = Symmetry::from(0.0);
        assert_eq!(symm.value(), SYMMETRY_MIN);
        assert_abs_diff_eq!(symm.rise(), 1_000.0, epsilon = 1e-9);

        let slopes = Slopes::from(symm);
        assert!(slopes.fall.is_finite());
        assert!(slopes.fall < 0.0);
    }

    #[test]
    fn symmetry_above_maximum_clamps() {
        assert_eq!(Symmetry::from(7.0).value(), SYMMETRY_MAX);
        assert_eq!(Symmetry::from(f64::NAN).value(), 0.5);
    }

    #[test]
    fn half_symmetry_is_plus_and_minus_two() {
        let slopes = Slopes::from(Symmetry::from(0.5));
        assert_abs_diff_eq!(slopes.rise, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(slopes.fall, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn rise_and_fall_take_one_unit_of_time_together() {
        // time up is 1/a and time down is 1/|b|, their sum is always 1
        for &s in &[0.01, 0.2, 0.5, 0.75, 0.99] {
            let slopes = Slopes::from(Symmetry::from(s));
            assert_abs_diff_eq!(
                1.0 / slopes.rise + 1.0 / -slopes.fall,
                1.0,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn gradient_range_is_always_legal() {
        for &width in &[0.0044, 0.01, 0.5, 2.0, 100.0] {
            for &t in &[1e-7, 1e-5, 0.002, 0.1, 0.5] {
                let (amp_min, amp_max) = gradient_range(width, t);
                assert!(amp_max >= 2.0);
                assert!(amp_min > 1.0);
                assert_abs_diff_eq!(amp_min, amp_max / (amp_max - 1.0), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn limited_gradient_stays_in_range() {
        let width = 2.0;
        let t = 100.0 / 44_100.0;
        let (amp_min, amp_max) = gradient_range(width, t);

        for &a in &[0.0, 0.5, 1.0, 2.0, 50.0, 1_000.0, 1e9] {
            let g = limit_gradient(a, width, t);
            assert!(amp_min <= g && g <= amp_max);
        }

        // legal gradients pass untouched
        assert_eq!(limit_gradient(2.0, width, t), 2.0);
    }

    #[test]
    fn steep_gradient_is_limited_at_high_step() {
        // a channel of width 1 at a step of 0.05 only allows a gradient of 5
        assert_abs_diff_eq!(limit_gradient(1_000.0, 1.0, 0.05), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn frequency_is_limited_by_channel_width() {
        let half_ceiling = FREQ_MAX * 0.5;

        assert_eq!(limit_frequency(100.0, 2.0, half_ceiling), 100.0);
        assert_eq!(limit_frequency(20_000.0, 2.0, half_ceiling), FREQ_MAX);
        assert_eq!(limit_frequency(20_000.0, 0.5, half_ceiling), 3_750.0);
        assert_eq!(limit_frequency(0.0, 2.0, half_ceiling), FREQ_MIN);
    }
}
