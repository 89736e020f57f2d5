//! # Waveshaper
//!
//! Bends the raw triangle of a voice through a quarter cycle of either a sine or a hyperbolic sine. The channel
//! midpoint maps to the start of the table and the channel edges map to table index `|shape| * (LUT_SIZE - 1)`, so a
//! bigger shape amount reaches further round the curve. The looked up value is normalized by the table value at the
//! edge, which means the shaped output always reaches exactly the channel bounds.
//!
//! Positive shape amounts use the sine table and round the corners of the triangle off, negative amounts use the
//! hyperbolic sine table and sharpen them.

use crate::{
    channel::Channel,
    lookup_tables::{ShaperTables, LUT_SIZE},
    utils::*,
};

/// The smallest magnitude a shape amount can be set to
pub const SHAPE_MIN: f64 = 0.05;

/// Shape amounts with a magnitude below this leave the triangle untouched
pub const SHAPE_DEAD_ZONE: f64 = 0.1;

/// A shape amount in `[-1.0, -SHAPE_MIN]` or `[SHAPE_MIN, 1.0]` is represented here
///
/// Zero is stored as `SHAPE_MIN`, which is inside the dead zone and so turns shaping off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeAmount(f64);

impl ShapeAmount {
    /// `shape.value()` is the clamped shape amount
    pub fn value(&self) -> f64 {
        self.0
    }

    /// `shape.is_active()` is true iff the shape amount is outside the dead zone
    pub fn is_active(&self) -> bool {
        self.0 >= SHAPE_DEAD_ZONE || self.0 <= -SHAPE_DEAD_ZONE
    }
}

impl From<f64> for ShapeAmount {
    fn from(amt: f64) -> Self {
        if amt < 0.0 {
            Self(amt.min(-SHAPE_MIN).max(-1.0))
        } else {
            // NaN lands here too and comes out as SHAPE_MIN
            Self(amt.max(SHAPE_MIN).min(1.0))
        }
    }
}

impl Default for ShapeAmount {
    fn default() -> Self {
        Self(SHAPE_DEAD_ZONE)
    }
}

/// `shape(p, ch, amt, tables)` is position `p` in channel `ch` bent by shape amount `amt`
///
/// When `amt` is in the dead zone the position is returned unchanged.
pub fn shape(position: f64, ch: Channel, amount: ShapeAmount, tables: &ShaperTables) -> f64 {
    if !amount.is_active() {
        return position;
    }

    let table = if amount.value() < 0.0 {
        tables.sinh()
    } else {
        tables.sine()
    };

    let midpoint = ch.midpoint();
    let halfwidth = ch.halfwidth();

    // the furthest index, reached at the channel edges
    let max_idx = (libm::fabs(amount.value()) * (LUT_SIZE - 1) as f64) as usize;

    let ph = (position - midpoint) * max_idx as f64 / halfwidth;
    let ph_sign = sign(ph);
    let ph = libm::fabs(ph).min(max_idx as f64);

    let lut_idx = ph as usize;
    // next idx is for interpolation, clamp at the end of the table
    let next_lut_idx = (lut_idx + 1).min(LUT_SIZE - 1);
    let frac = ph - lut_idx as f64;

    let shaped = ph_sign * linear_interp(table[lut_idx], table[next_lut_idx], frac) / table[max_idx];

    midpoint + shaped * halfwidth
}
