//! # Voice
//!
//! The per-voice state of a bounce bank: the cursor, the held control values and the DC blocker memory. A voice never
//! steps itself, the bank does that, because the channel a voice bounces in depends on its neighbours.

use crate::{
    cursor::{Cursor, Direction},
    dc_blocker::DcBlocker,
    gradient::{Slopes, Symmetry},
    waveshaper::ShapeAmount,
};

/// The nominal frequency of a new voice, in Hertz
pub const DEFAULT_FREQ_HZ: f64 = 100.0;

/// One bouncing cursor and its settings is represented here
pub struct Voice {
    cursor: Cursor,

    /// Last known nominal frequency, from a setter or the last sample of a frequency signal
    frequency: f64,

    /// Frequency the voice actually ran at last sample, after cross modulation and limiting
    last_frequency: f64,

    symmetry: Symmetry,

    /// Cached from `symmetry`, the per-sample path only reads the rising gradient
    slopes: Slopes,

    shape: ShapeAmount,

    dc_block: bool,
    dc_blocker: DcBlocker,
}

impl Voice {
    /// `Voice::new(p, d)` is a new voice at position `p` travelling in direction `d`, with default settings
    pub fn new(position: f64, direction: Direction) -> Self {
        Self {
            cursor: Cursor::new(position, direction),
            frequency: DEFAULT_FREQ_HZ,
            last_frequency: DEFAULT_FREQ_HZ,
            symmetry: Symmetry::default(),
            slopes: Slopes::default(),
            shape: ShapeAmount::default(),
            dc_block: false,
            dc_blocker: DcBlocker::new(),
        }
    }

    /// `voice.position()` is the current position of the cursor
    pub fn position(&self) -> f64 {
        self.cursor.position
    }

    /// `voice.direction()` is the current direction of travel
    pub fn direction(&self) -> Direction {
        self.cursor.direction
    }

    /// `voice.cursor()` is the position and direction together
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// `voice.frequency()` is the held nominal frequency in Hertz
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// `voice.last_frequency()` is the frequency the voice ran at on the last sample
    pub fn last_frequency(&self) -> f64 {
        self.last_frequency
    }

    /// `voice.symmetry()` is the held symmetry
    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// `voice.slopes()` is the edge gradients for the held symmetry, before limiting
    pub fn slopes(&self) -> Slopes {
        self.slopes
    }

    /// `voice.shape()` is the waveshaper amount
    pub fn shape(&self) -> ShapeAmount {
        self.shape
    }

    /// `voice.dc_block_enabled()` is true iff the DC blocker is on
    pub fn dc_block_enabled(&self) -> bool {
        self.dc_block
    }

    /// `voice.set_frequency(f)` holds `|f|` as the nominal frequency, non-finite values are ignored
    pub fn set_frequency(&mut self, hz: f64) {
        if hz.is_finite() {
            self.frequency = libm::fabs(hz);
        }
    }

    /// `voice.set_symmetry(s)` sets the symmetry and recalculates the cached slopes
    pub fn set_symmetry(&mut self, symmetry: Symmetry) {
        self.symmetry = symmetry;
        self.slopes = symmetry.into();
    }

    /// `voice.set_shape(amt)` sets the waveshaper amount
    pub fn set_shape(&mut self, shape: ShapeAmount) {
        self.shape = shape;
    }

    /// `voice.set_dc_block(on)` turns the DC blocker on or off, its history is kept either way
    pub fn set_dc_block(&mut self, on: bool) {
        self.dc_block = on;
    }

    pub(crate) fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.cursor.direction = direction;
    }

    pub(crate) fn set_last_frequency(&mut self, hz: f64) {
        self.last_frequency = hz;
    }

    /// `voice.dc_block(x)` is `x` through the DC blocker if it is on, otherwise `x`
    pub(crate) fn dc_block(&mut self, x: f64) -> f64 {
        if self.dc_block {
            self.dc_blocker.process(x)
        } else {
            x
        }
    }
}
