/// `linear_interp(y0, y1, frac)` is linear interpolation of `y0` and `y1` with fraction `frac`
///
/// # Arguments:
///
/// * `y0`, `y1` - The two y-values, a straight line can be drawn through these with an x-distance of 1.0
///
/// * `frac` - The fractional x-distance, in `[0.0, 1.0]`
pub fn linear_interp(y0: f64, y1: f64, frac: f64) -> f64 {
    y0 + ((y1 - y0) * frac)
}

/// `is_almost(v1, v2, e)` is true iff `v1` is within `e` of `v2`
#[cfg(test)]
pub fn is_almost(v1: f64, v2: f64, eps: f64) -> bool {
    libm::fabs(v1 - v2) <= eps
}

/// `sign(v)` is `-1.0` for negative `v`, `+1.0` for positive `v` and `0.0` for zero
pub fn sign(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else if v > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// `limit(v, lo, hi)` is `v` limited to `[lo, hi]`, checking `hi` first
///
/// Unlike `f64::clamp` this never panics when `hi < lo`.
pub fn limit(v: f64, lo: f64, hi: f64) -> f64 {
    if v > hi {
        hi
    } else if v < lo {
        lo
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lin_interp_endpoints() {
        assert_eq!(linear_interp(0.0, 1.0, 0.0), 0.0);
        assert_eq!(linear_interp(0.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn lin_interp_halfway() {
        assert_eq!(linear_interp(0.0, 1.0, 0.5), 0.5);
    }

    #[test]
    fn lin_interp_both_non_zero() {
        assert!(is_almost(linear_interp(10.0, 40.0, 1.0 / 3.0), 20.0, 1e-12));
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-3.5), -1.0);
        assert_eq!(sign(0.001), 1.0);
    }

    #[test]
    fn limit_checks_the_upper_bound_first() {
        assert_eq!(limit(5.0, 0.0, 1.0), 1.0);
        assert_eq!(limit(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(limit(0.5, 0.0, 1.0), 0.5);

        // degenerate range, no panic
        assert_eq!(limit(1.5, 2.0, 1.0), 1.0);
        assert_eq!(limit(0.5, 2.0, 1.0), 2.0);
    }
}
