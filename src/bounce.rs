//! # Bounds and Bounce oscillator bank
//!
//! A bank of up to `MAX_VOICES` triangle oscillators after Peter Blasser's "Bounds and Bounce" circuits. Each voice is
//! a cursor bouncing back and forth inside a channel. The bottom voice is bounded below by the bank's lower bound, the
//! top voice above by the bank's upper bound, and in between each voice is bounded by the positions of its
//! neighbours. As the voices move they squeeze and stretch each other's channels, and since a voice's frequency is
//! limited by the width of its channel, the whole bank interacts.
//!
//! With a single voice and fixed bounds of `[-1.0, 1.0]` the bank is an ordinary triangle oscillator running at the
//! set frequency.
//!
//! Voices are computed in one of two modes, fixed for the bank:
//!
//! - `Mode::Ptr` is an antialiased triangle, corners are corrected with Polynomial Transition Regions
//!
//! - `Mode::Waveshape` is a plain triangle bent through a per-voice sine or hyperbolic sine shaper
//!
//! Every input of the bank (both bounds, and the frequency and symmetry of each voice) is either a held scalar, set at
//! control rate through the setters, or a signal supplied with each block.
//!
//! Processing is strictly sequential. Within a sample, voice `v` reads the already updated position of voice `v - 1`
//! and the previous position of voice `v + 1`, and a voice that turns around may turn its neighbour too.

use crate::{
    channel::{voice_channel, Channel, MIN_CHANNEL_WIDTH},
    cross_mod::CrossModMatrix,
    cursor::{ptr_step, raw_step, Contact, Direction},
    error::*,
    gradient::*,
    lookup_tables::ShaperTables,
    voice::Voice,
    waveshaper::{shape, ShapeAmount},
};
use heapless::Vec;
use tracing::{debug, warn};

/// The largest number of voices in a bank
pub const MAX_VOICES: usize = 10;

/// The sample rate used when a bank is given one that is not positive
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 44_100.0;

/// Voice calculation modes are represented here
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Raw triangle through the waveshaper
    #[default]
    Waveshape,

    /// Triangle with PTR corrected corners, shape amounts are ignored
    Ptr,
}

/// One input of a block is represented here, either the held scalar or a signal
#[derive(Clone, Copy, Debug, Default)]
pub enum Input<'a> {
    #[default]
    Held,
    Signal(&'a [f64]),
}

impl<'a> Input<'a> {
    /// `input.sample(n)` is sample `n` of the signal, or `None` for a held input or a non-finite sample
    fn sample(&self, frame: usize) -> Option<f64> {
        match self {
            Input::Held => None,
            Input::Signal(s) => Some(s[frame]).filter(|x| x.is_finite()),
        }
    }

    /// `input.check(frames)` is an error if this is a signal with fewer than `frames` samples
    fn check(&self, frames: usize) -> Result<()> {
        match self {
            Input::Signal(s) if s.len() < frames => Err(Error::ShortBuffer {
                frames,
                len: s.len(),
            }),
            _ => Ok(()),
        }
    }
}

/// The inputs for one block of samples are represented here
///
/// Voices past the end of `frequency` or `symmetry` are treated as `Input::Held`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockInputs<'a, 'b> {
    pub lower: Input<'a>,
    pub upper: Input<'a>,
    pub frequency: &'b [Input<'a>],
    pub symmetry: &'b [Input<'a>],
}

impl<'a, 'b> BlockInputs<'a, 'b> {
    fn frequency(&self, voice: usize) -> Input<'a> {
        self.frequency.get(voice).copied().unwrap_or_default()
    }

    fn symmetry(&self, voice: usize) -> Input<'a> {
        self.symmetry.get(voice).copied().unwrap_or_default()
    }
}

/// A bank of Bounds and Bounce oscillators is represented here
pub struct Bounce {
    voices: Vec<Voice, MAX_VOICES>,
    cross_mod: CrossModMatrix,
    tables: ShaperTables,
    mode: Mode,

    sample_rate_hz: f64,
    // seconds per sample, so `f * sample_period` is the time step
    sample_period: f64,

    lower: f64,
    upper: f64,

    // half of the frequency ceiling
    half_ceiling: f64,
}

impl Bounce {
    /// `Bounce::new(n, lo, hi, mode, sr)` is a new bank of `n` voices between `lo` and `hi` at sample rate `sr`
    ///
    /// `n` is limited to `[1, MAX_VOICES]`. The voices start stacked just above `lo`, `MIN_CHANNEL_WIDTH` apart,
    /// alternately rising and falling starting with a rising voice 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bounce_bounds::bounce::{Bounce, Mode};
    /// let bank = Bounce::new(3, -1.0, 1.0, Mode::Ptr, 48_000.0);
    /// assert_eq!(bank.voice_count(), 3);
    /// ```
    pub fn new(voice_count: usize, lower: f64, upper: f64, mode: Mode, sample_rate_hz: f64) -> Self {
        let voice_count = voice_count.max(1).min(MAX_VOICES);
        let lower = if lower.is_finite() { lower } else { -1.0 };
        let upper = if upper.is_finite() { upper } else { 1.0 };
        let sample_rate_hz = if sample_rate_hz > 0.0 {
            sample_rate_hz
        } else {
            DEFAULT_SAMPLE_RATE_HZ
        };

        let voices = (0..voice_count)
            .map(|i| {
                let direction = if i % 2 == 0 {
                    Direction::Rising
                } else {
                    Direction::Falling
                };
                Voice::new(lower + MIN_CHANNEL_WIDTH * (i + 1) as f64, direction)
            })
            .collect();

        debug!(voice_count, ?mode, sample_rate_hz, "created bounce bank");

        Self {
            voices,
            cross_mod: CrossModMatrix::new(voice_count),
            tables: ShaperTables::new(),
            mode,
            sample_rate_hz,
            sample_period: 1.0 / sample_rate_hz,
            lower,
            upper,
            half_ceiling: FREQ_MAX * 0.5,
        }
    }

    /// `bank.prepare(sr)` gets the bank ready for blocks at sample rate `sr`, call before processing starts
    ///
    /// Non-positive sample rates are ignored.
    pub fn prepare(&mut self, sample_rate_hz: f64) {
        if !(sample_rate_hz > 0.0) {
            warn!(sample_rate_hz, "ignoring invalid sample rate");
            return;
        }
        if sample_rate_hz != self.sample_rate_hz {
            debug!(
                from = self.sample_rate_hz,
                to = sample_rate_hz,
                "sample rate changed"
            );
            self.sample_rate_hz = sample_rate_hz;
            self.sample_period = 1.0 / sample_rate_hz;
        }
    }

    /// `bank.process_block(ins, outs, n)` computes `n` samples for every voice
    ///
    /// Output `v` receives voice `v`. Buffers are checked before any sample is computed, once the checks pass the
    /// whole block is always produced.
    ///
    /// # Errors
    ///
    /// `Error::OutputCount` if there are fewer outputs than voices, `Error::ShortBuffer` if any output or signal is
    /// shorter than `frames`. The bank is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bounce_bounds::bounce::{BlockInputs, Bounce, Input, Mode};
    /// let mut bank = Bounce::new(2, -1.0, 1.0, Mode::Ptr, 48_000.0);
    ///
    /// // voice 0 gets a frequency signal, voice 1 runs at its held frequency
    /// let freq = [220.0; 64];
    /// let frequency = [Input::Signal(&freq)];
    /// let inputs = BlockInputs { frequency: &frequency, ..Default::default() };
    ///
    /// let mut out_0 = [0.0; 64];
    /// let mut out_1 = [0.0; 64];
    /// let mut outputs = [&mut out_0[..], &mut out_1[..]];
    ///
    /// bank.process_block(&inputs, &mut outputs, 64).unwrap();
    /// assert!(out_0.iter().all(|s| (-1.0..=1.0).contains(s)));
    /// ```
    pub fn process_block(
        &mut self,
        inputs: &BlockInputs<'_, '_>,
        outputs: &mut [&mut [f64]],
        frames: usize,
    ) -> Result<()> {
        let n = self.voices.len();

        if outputs.len() < n {
            return Err(Error::OutputCount {
                expected: n,
                got: outputs.len(),
            });
        }
        for out in outputs.iter().take(n) {
            if out.len() < frames {
                return Err(Error::ShortBuffer {
                    frames,
                    len: out.len(),
                });
            }
        }
        inputs.lower.check(frames)?;
        inputs.upper.check(frames)?;
        for v in 0..n {
            inputs.frequency(v).check(frames)?;
            inputs.symmetry(v).check(frames)?;
        }

        for frame in 0..frames {
            let outer = Channel::outer(
                inputs.lower.sample(frame).unwrap_or(self.lower),
                inputs.upper.sample(frame).unwrap_or(self.upper),
                n,
            );

            let mut lower = outer.lo;
            for v in 0..n {
                if let Some(hz) = inputs.frequency(v).sample(frame) {
                    self.voices[v].set_frequency(hz);
                }

                let upper = self.voices.get(v + 1).map(Voice::position);
                let ch = voice_channel(lower, upper, outer);

                outputs[v][frame] = self.tick_voice(v, ch, inputs.symmetry(v).sample(frame));

                lower = self.voices[v].position();
            }
        }

        Ok(())
    }

    /// `bank.tick_voice(v, ch, s)` steps voice `v` by one sample in channel `ch` and is its output sample
    ///
    /// `symmetry` is this sample of a symmetry signal, `None` uses the held slopes.
    fn tick_voice(&mut self, v: usize, ch: Channel, symmetry: Option<f64>) -> f64 {
        let width = ch.width();

        let freq = self.cross_mod.modulated_frequency(
            v,
            self.voices[v].frequency(),
            self.voices.iter().map(Voice::position),
        );
        let freq = limit_frequency(freq, width, self.half_ceiling);
        let t = freq * self.sample_period;

        let requested = match symmetry {
            Some(s) => Symmetry::from(s).rise(),
            None => self.voices[v].slopes().rise,
        };
        let rise = limit_gradient(requested, width, t);

        let cursor = self.voices[v].cursor();
        let (step, out) = match self.mode {
            Mode::Ptr => {
                let step = ptr_step(cursor, ch, rise, t);
                (step, step.output)
            }
            Mode::Waveshape => {
                let step = raw_step(cursor, ch, rise, t);
                (step, shape(step.output, ch, self.voices[v].shape(), &self.tables))
            }
        };

        self.voices[v].set_cursor(step.cursor);
        self.voices[v].set_last_frequency(freq);

        // a turning voice turns its neighbour, the upper neighbour only when it is not the top voice
        match step.contact {
            Some(Contact::Upper) if v + 2 < self.voices.len() => {
                self.voices[v + 1].set_direction(Direction::Rising)
            }
            Some(Contact::Lower) if v > 0 => self.voices[v - 1].set_direction(Direction::Falling),
            _ => (),
        }

        self.voices[v].dc_block(out)
    }

    /// `bank.set_lower_bound(lo)` holds `lo` as the lower bound of the bank, non-finite values are ignored
    pub fn set_lower_bound(&mut self, lower: f64) {
        if lower.is_finite() {
            self.lower = lower;
            self.note_degenerate_bounds();
        }
    }

    /// `bank.set_upper_bound(hi)` holds `hi` as the upper bound of the bank, non-finite values are ignored
    ///
    /// An upper bound leaving less than `MIN_CHANNEL_WIDTH` per voice is raised when it is used.
    pub fn set_upper_bound(&mut self, upper: f64) {
        if upper.is_finite() {
            self.upper = upper;
            self.note_degenerate_bounds();
        }
    }

    /// `bank.set_bounds(lo, hi)` holds both bounds of the bank
    pub fn set_bounds(&mut self, lower: f64, upper: f64) {
        self.set_lower_bound(lower);
        self.set_upper_bound(upper);
    }

    fn note_degenerate_bounds(&self) {
        let outer = self.outer_bounds();
        if outer.hi != self.upper {
            debug!(
                lower = self.lower,
                upper = self.upper,
                raised_to = outer.hi,
                "upper bound too low for voice count"
            );
        }
    }

    /// `bank.set_frequency(v, f)` holds `|f|` as the nominal frequency of voice `v`
    pub fn set_frequency(&mut self, voice: usize, hz: f64) -> Result<()> {
        self.voice_mut(voice)?.set_frequency(hz);
        Ok(())
    }

    /// `bank.set_symmetry(v, s)` holds symmetry `s` for voice `v`, limited to `[SYMMETRY_MIN, SYMMETRY_MAX]`
    pub fn set_symmetry(&mut self, voice: usize, symmetry: f64) -> Result<()> {
        self.voice_mut(voice)?.set_symmetry(symmetry.into());
        Ok(())
    }

    /// `bank.set_shape(v, amt)` sets the waveshaper amount for voice `v`, see `ShapeAmount` for the clamping rules
    pub fn set_shape(&mut self, voice: usize, amount: f64) -> Result<()> {
        self.voice_mut(voice)?.set_shape(ShapeAmount::from(amount));
        Ok(())
    }

    /// `bank.set_dc_block(v, on)` turns the DC blocker for voice `v` on or off
    pub fn set_dc_block(&mut self, voice: usize, on: bool) -> Result<()> {
        self.voice_mut(voice)?.set_dc_block(on);
        Ok(())
    }

    /// `bank.set_dc_blocks(flags)` sets the DC blocker of voice `i` to `flags[i]`, extra flags are ignored
    pub fn set_dc_blocks(&mut self, flags: &[bool]) {
        for (voice, &on) in self.voices.iter_mut().zip(flags) {
            voice.set_dc_block(on);
        }
    }

    /// `bank.set_cross_mod(from, to, w)` sets how much voice `from` modulates the frequency of voice `to`
    ///
    /// `w` is limited to `[-MAX_CROSS_MOD, MAX_CROSS_MOD]`.
    pub fn set_cross_mod(&mut self, from: usize, to: usize, amount: f64) -> Result<()> {
        self.cross_mod.set(from, to, amount).map_err(|e| {
            warn!(from, to, "invalid cross mod argument: {}", e);
            e
        })
    }

    /// `bank.cross_mod_off()` zeros the whole cross modulation matrix
    pub fn cross_mod_off(&mut self) {
        self.cross_mod.clear();
    }

    /// `bank.set_max_frequency(f)` sets the frequency ceiling, limited to `[FREQ_MIN, FREQ_MAX]`
    ///
    /// The ceiling is the highest frequency a voice runs at in a channel of width 2.
    pub fn set_max_frequency(&mut self, hz: f64) {
        if !hz.is_nan() {
            self.half_ceiling = hz.max(FREQ_MIN).min(FREQ_MAX) * 0.5;
        }
    }

    /// `bank.set_mode(m)` switches the voice calculation mode, takes effect from the next block
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            debug!(from = ?self.mode, to = ?mode, "mode changed");
            self.mode = mode;
        }
    }

    /// `bank.voice_count()` is the number of voices in the bank
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// `bank.voices()` is every voice, in ascending order
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// `bank.voice(v)` is voice `v`, if there is one
    pub fn voice(&self, voice: usize) -> Option<&Voice> {
        self.voices.get(voice)
    }

    /// `bank.mode()` is the voice calculation mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// `bank.sample_rate()` is the sample rate in Hertz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate_hz
    }

    /// `bank.bounds()` is the held `(lower, upper)` bounds, as set
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// `bank.outer_bounds()` is the channel the held bounds give after the minimum width correction
    pub fn outer_bounds(&self) -> Channel {
        Channel::outer(self.lower, self.upper, self.voices.len())
    }

    /// `bank.max_frequency()` is the frequency ceiling in Hertz
    pub fn max_frequency(&self) -> f64 {
        self.half_ceiling * 2.0
    }

    /// `bank.cross_mod()` is the cross modulation matrix
    pub fn cross_mod(&self) -> &CrossModMatrix {
        &self.cross_mod
    }

    fn voice_mut(&mut self, index: usize) -> Result<&mut Voice> {
        let voice_count = self.voices.len();
        self.voices.get_mut(index).ok_or_else(|| {
            warn!(index, voice_count, "voice index out of range");
            Error::InvalidVoice { index, voice_count }
        })
    }
}
