//! Quarter-cycle lookup tables for the waveshaper
//!
//! Both tables start at exactly zero and cover the first quarter of a cycle, `[0, pi/2]`, in `LUT_SIZE` evenly spaced
//! points. The sine table bends the cursor so it lingers near the bounds, the hyperbolic sine table bends it the
//! other way so it lingers near the middle of the channel.

use core::f64::consts::PI;

/// The number of points in each table
pub const LUT_SIZE: usize = 2048;

/// The quarter-cycle shaping tables are represented here
pub struct ShaperTables {
    sine: [f64; LUT_SIZE],
    sinh: [f64; LUT_SIZE],
}

impl ShaperTables {
    /// `ShaperTables::new()` is a freshly built pair of sine and hyperbolic sine tables
    pub fn new() -> Self {
        let mut sine = [0.0_f64; LUT_SIZE];
        let mut sinh = [0.0_f64; LUT_SIZE];

        for (i, (s, sh)) in sine.iter_mut().zip(sinh.iter_mut()).enumerate() {
            let phase = PI * i as f64 * 0.5 / (LUT_SIZE - 1) as f64;
            *s = libm::sin(phase);
            *sh = libm::sinh(phase);
        }

        Self { sine, sinh }
    }

    /// `tables.sine()` is the quarter-cycle sine table
    pub fn sine(&self) -> &[f64; LUT_SIZE] {
        &self.sine
    }

    /// `tables.sinh()` is the quarter-cycle hyperbolic sine table
    pub fn sinh(&self) -> &[f64; LUT_SIZE] {
        &self.sinh
    }
}

impl Default for ShaperTables {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::is_almost;

    #[test]
    fn tables_start_at_zero() {
        let tables = ShaperTables::new();
        assert_eq!(tables.sine()[0], 0.0);
        assert_eq!(tables.sinh()[0], 0.0);
    }

    #[test]
    fn tables_end_at_a_quarter_cycle() {
        let tables = ShaperTables::new();
        assert!(is_almost(tables.sine()[LUT_SIZE - 1], 1.0, 1e-12));
        assert!(is_almost(
            tables.sinh()[LUT_SIZE - 1],
            libm::sinh(PI / 2.0),
            1e-12
        ));
    }

    #[test]
    fn tables_are_monotonic_rising() {
        let tables = ShaperTables::new();
        for i in 1..LUT_SIZE {
            assert!(tables.sine()[i - 1] < tables.sine()[i]);
            assert!(tables.sinh()[i - 1] < tables.sinh()[i]);
        }
    }
}
