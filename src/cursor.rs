//! # Cursor integration
//!
//! A cursor moves between the two bounds of its channel, climbing with the rising gradient `a` and dropping with the
//! complementary falling gradient `b`, and turning around whenever it reaches a bound. Each sample the cursor moves
//! `2 * a * t` (or `2 * b * t`) where `t = f / sample_rate`.
//!
//! There are two ways to step a cursor:
//!
//! - `ptr_step` detects the sample that lands within one step of a bound and replaces it with a Polynomial Transition
//!   Region correction, a quadratic that follows the band limited shape of the corner instead of the sharp reflection.
//!   The cursor itself is reflected proportionally into the new slope.
//!
//! - `raw_step` reflects the cursor when it passes a bound but outputs the plain clamped position, the aliasing of the
//!   corners is then left to the waveshaper to soften.
//!
//! Both steps are pure functions of the cursor state, channel, gradient and time step. Whatever branch is taken the
//! returned cursor is inside the channel and travelling away from any bound it was pinned to.

use crate::{channel::Channel, gradient::fall_gradient};

/// The direction of travel of a cursor is represented here
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Rising,
    Falling,
}

impl Direction {
    /// `dir.reversed()` is the opposite direction
    pub fn reversed(&self) -> Self {
        match self {
            Direction::Rising => Direction::Falling,
            Direction::Falling => Direction::Rising,
        }
    }
}

/// The moving part of a voice, a position and a direction of travel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    pub position: f64,
    pub direction: Direction,
}

impl Cursor {
    /// `Cursor::new(p, d)` is a cursor at position `p` travelling in direction `d`
    pub fn new(position: f64, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// `cursor.confined(ch)` is the cursor pulled back inside channel `ch`
    ///
    /// A cursor pulled back to a bound is turned to travel away from it. A NaN position lands on the lower bound.
    pub fn confined(self, ch: Channel) -> Self {
        if self.position > ch.hi {
            Self::new(ch.hi, Direction::Falling)
        } else if self.position >= ch.lo {
            self
        } else {
            Self::new(ch.lo, Direction::Rising)
        }
    }
}

/// Which bound a cursor turned around at is represented here
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    Upper,
    Lower,
}

/// The result of stepping a cursor by one sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// The cursor after the step, always inside the channel
    pub cursor: Cursor,

    /// The output sample for this step
    pub output: f64,

    /// The bound the cursor turned at this step, if any
    pub contact: Option<Contact>,
}

/// `ptr_step(c, ch, a, t)` is cursor `c` advanced by one sample with PTR correction of the corners
///
/// # Arguments:
///
/// * `cursor` - the cursor state before the step
///
/// * `ch` - the channel to bounce in
///
/// * `rise` - the rising gradient, already limited so that it is greater than 1
///
/// * `t` - the time step, frequency over sample rate
pub fn ptr_step(cursor: Cursor, ch: Channel, rise: f64, t: f64) -> Step {
    let mut p = cursor.position;
    let fall = fall_gradient(rise);

    let (output, direction, contact) = match cursor.direction {
        Direction::Rising => {
            p += 2.0 * rise * t;
            if p > ch.hi - rise * t {
                let out = ptr_correct_max(p, rise, fall, t, ch.hi);
                p = ch.hi + (p - ch.hi) * (fall / rise);
                (out, cursor.direction.reversed(), Some(Contact::Upper))
            } else {
                (p, Direction::Rising, None)
            }
        }
        Direction::Falling => {
            p += 2.0 * fall * t;
            if p < ch.lo - fall * t {
                let out = ptr_correct_min(p, rise, fall, t, ch.lo);
                p = ch.lo + (p - ch.lo) * (rise / fall);
                (out, cursor.direction.reversed(), Some(Contact::Lower))
            } else {
                (p, Direction::Falling, None)
            }
        }
    };

    Step {
        cursor: Cursor::new(p, direction).confined(ch),
        output,
        contact,
    }
}

/// `raw_step(c, ch, a, t)` is cursor `c` advanced by one sample with plain reflection at the bounds
///
/// The output is the confined position, arguments are as for `ptr_step`.
pub fn raw_step(cursor: Cursor, ch: Channel, rise: f64, t: f64) -> Step {
    let mut p = cursor.position;

    let (direction, contact) = match cursor.direction {
        Direction::Rising => {
            p += 2.0 * rise * t;
            if p >= ch.hi {
                // b / a reduces to this
                p = ch.hi + (p - ch.hi) * (-1.0 / (rise - 1.0));
                (cursor.direction.reversed(), Some(Contact::Upper))
            } else {
                (Direction::Rising, None)
            }
        }
        Direction::Falling => {
            let fall = fall_gradient(rise);
            p += 2.0 * fall * t;
            if p <= ch.lo {
                p = ch.lo + (p - ch.lo) * (rise / fall);
                (cursor.direction.reversed(), Some(Contact::Lower))
            } else {
                (Direction::Falling, None)
            }
        }
    };

    let cursor = Cursor::new(p, direction).confined(ch);

    Step {
        cursor,
        output: cursor.position,
        contact,
    }
}

/// `ptr_correct_max(p, a, b, t, hi)` is the PTR corrected output for an upper corner
///
/// The quadratic meets the rising line `a` at `hi - a * t` and peaks below `hi` as the cursor turns onto slope `b`.
pub fn ptr_correct_max(p: f64, a: f64, b: f64, t: f64, hi: f64) -> f64 {
    let denom = 2.0 * a * a * t;
    let at_hi = a * t - hi;
    let a2 = (b - a) / (2.0 * denom);
    let a1 = (a * t * (a + b) + hi * (a - b)) / denom;
    let a0 = ((b - a) * at_hi * at_hi) / (2.0 * denom);
    a2 * p * p + a1 * p + a0
}

/// `ptr_correct_min(p, a, b, t, lo)` is the PTR corrected output for a lower corner
///
/// Mirror image of `ptr_correct_max`, the quadratic meets the falling line `b` at `lo - b * t`.
pub fn ptr_correct_min(p: f64, a: f64, b: f64, t: f64, lo: f64) -> f64 {
    let denom = 2.0 * b * b * t;
    let bt_lo = b * t - lo;
    let b2 = (a - b) / (2.0 * denom);
    let b1 = (b * t * (a + b) + lo * (b - a)) / denom;
    let b0 = (a - b) * (bt_lo * bt_lo) / (2.0 * denom);
    b2 * p * p + b1 * p + b0
}
