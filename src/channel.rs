//! # Channels and bound propagation
//!
//! Every voice bounces inside its own channel. The outermost voices are held in by the ensemble bounds, the inner
//! voices are held in by their neighbours: the lower bound of voice `v` is where voice `v - 1` is now, the upper bound
//! is where voice `v + 1` was one sample ago.
//!
//! Voices are updated in ascending order, so by the time voice `v` is processed its lower neighbour has already moved
//! this sample while its upper neighbour has not. Motion can therefore ripple up through the whole bank within a single
//! sample but never back down, which keeps the chain from being pulled towards either end.

/// The smallest distance allowed between two bounds
pub const MIN_CHANNEL_WIDTH: f64 = 0.0044;

/// A pair of bounds a cursor is allowed to move between is represented here
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Channel {
    pub lo: f64,
    pub hi: f64,
}

impl Channel {
    /// `Channel::new(lo, hi)` is a channel between `lo` and `hi`, no checks are made
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// `Channel::outer(lo, hi, n)` is the ensemble channel for `n` voices, with `hi` raised if it leaves too little room
    ///
    /// There must be at least `MIN_CHANNEL_WIDTH` for each voice plus one spare. The lower bound is never moved.
    pub fn outer(lo: f64, hi: f64, voice_count: usize) -> Self {
        let min_hi = lo + MIN_CHANNEL_WIDTH * (voice_count + 1) as f64;
        // written so that a NaN upper bound is replaced too
        let hi = if hi >= min_hi { hi } else { min_hi };
        Self { lo, hi }
    }

    /// `channel.width()` is the distance between the bounds
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// `channel.midpoint()` is the point halfway between the bounds
    pub fn midpoint(&self) -> f64 {
        self.lo + 0.5 * (self.hi - self.lo)
    }

    /// `channel.halfwidth()` is the distance from the lower bound to the midpoint
    pub fn halfwidth(&self) -> f64 {
        self.midpoint() - self.lo
    }

    /// `channel.contains(p)` is true iff `p` is in `[lo, hi]`
    pub fn contains(&self, p: f64) -> bool {
        self.lo <= p && p <= self.hi
    }
}

/// `voice_channel(l, n, outer)` is the channel for one voice inside the ensemble channel `outer`
///
/// # Arguments:
///
/// * `lower` - the position of the voice below, already updated this sample, or the outer lower bound for voice 0
///
/// * `upper` - the position of the voice above as of the previous sample, or `None` for the top voice
///
/// * `outer` - the ensemble channel
///
/// Neighbour positions are pulled inside the ensemble channel, then the upper bound is pushed up if the channel would
/// be thinner than `MIN_CHANNEL_WIDTH`.
pub fn voice_channel(lower: f64, upper: Option<f64>, outer: Channel) -> Channel {
    let lo = lower.max(outer.lo);
    let hi = match upper {
        Some(p) => p.min(outer.hi),
        None => outer.hi,
    };

    if lo >= hi - MIN_CHANNEL_WIDTH {
        Channel::new(lo, lo + MIN_CHANNEL_WIDTH)
    } else {
        Channel::new(lo, hi)
    }
}
