//! # Control rate commands
//!
//! The audio callback owns the bank, so settings coming from anywhere else (a UI thread, a MIDI handler, an
//! interrupt) are sent over as `Command`s through a lock free single producer, single consumer queue. The audio side
//! drains the queue between blocks with `Bounce::apply_pending`, so every command lands whole between two samples and
//! no sample ever sees half of an update.
//!
//! # Examples
//!
//! ```
//! # use bounce_bounds::{bounce::{Bounce, Mode}, control::{Command, CommandQueue}};
//! let mut queue: CommandQueue<8> = CommandQueue::new();
//! let (mut tx, mut rx) = queue.split();
//!
//! let mut bank = Bounce::new(2, -1.0, 1.0, Mode::Waveshape, 48_000.0);
//!
//! // control side
//! tx.enqueue(Command::CrossMod { from: 0, to: 1, amount: 2.0 }).ok();
//! tx.enqueue(Command::Shape { voice: 1, amount: -0.5 }).ok();
//!
//! // audio side, before the next block
//! assert_eq!(bank.apply_pending(&mut rx), 2);
//! assert!(bank.cross_mod().is_active());
//! ```

use crate::{
    bounce::{Bounce, Mode},
    error::*,
};
use heapless::spsc::{Consumer, Queue};

/// A queue of commands holding up to `N - 1` commands
pub type CommandQueue<const N: usize> = Queue<Command, N>;

/// Control rate changes to a bounce bank are represented here
///
/// Each command does the same as the `Bounce` setter of the same name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    LowerBound(f64),
    UpperBound(f64),
    Bounds { lower: f64, upper: f64 },
    Frequency { voice: usize, hz: f64 },
    Symmetry { voice: usize, symmetry: f64 },
    Shape { voice: usize, amount: f64 },
    DcBlock { voice: usize, enabled: bool },
    CrossMod { from: usize, to: usize, amount: f64 },
    CrossModOff,
    MaxFrequency(f64),
    Mode(Mode),
}

impl Bounce {
    /// `bank.apply(cmd)` carries out command `cmd`
    ///
    /// # Errors
    ///
    /// `Error::InvalidVoice` for commands naming a voice the bank does not have, the command is then a no-op.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::LowerBound(lo) => self.set_lower_bound(lo),
            Command::UpperBound(hi) => self.set_upper_bound(hi),
            Command::Bounds { lower, upper } => self.set_bounds(lower, upper),
            Command::Frequency { voice, hz } => self.set_frequency(voice, hz)?,
            Command::Symmetry { voice, symmetry } => self.set_symmetry(voice, symmetry)?,
            Command::Shape { voice, amount } => self.set_shape(voice, amount)?,
            Command::DcBlock { voice, enabled } => self.set_dc_block(voice, enabled)?,
            Command::CrossMod { from, to, amount } => self.set_cross_mod(from, to, amount)?,
            Command::CrossModOff => self.cross_mod_off(),
            Command::MaxFrequency(hz) => self.set_max_frequency(hz),
            Command::Mode(mode) => self.set_mode(mode),
        }
        Ok(())
    }

    /// `bank.apply_pending(rx)` applies every command waiting in `rx` and is how many there were
    ///
    /// Rejected commands are counted too, they have already been logged by the setter that turned them down.
    pub fn apply_pending<const N: usize>(&mut self, commands: &mut Consumer<'_, Command, N>) -> usize {
        let mut count = 0;
        while let Some(command) = commands.dequeue() {
            // the setter logs the reason, keep draining
            let _ = self.apply(command);
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bounce::{BlockInputs, MAX_VOICES},
        gradient::FREQ_MAX,
    };

    #[test]
    fn commands_match_the_setters() {
        let mut bank = Bounce::new(3, -1.0, 1.0, Mode::Waveshape, 44_100.0);

        bank.apply(Command::Bounds {
            lower: -0.5,
            upper: 0.75,
        })
        .unwrap();
        bank.apply(Command::Frequency { voice: 1, hz: 55.0 }).unwrap();
        bank.apply(Command::Symmetry {
            voice: 2,
            symmetry: 0.25,
        })
        .unwrap();
        bank.apply(Command::Shape {
            voice: 0,
            amount: -0.6,
        })
        .unwrap();
        bank.apply(Command::DcBlock {
            voice: 2,
            enabled: true,
        })
        .unwrap();
        bank.apply(Command::MaxFrequency(20_000.0)).unwrap();
        bank.apply(Command::Mode(Mode::Ptr)).unwrap();

        assert_eq!(bank.bounds(), (-0.5, 0.75));
        assert_eq!(bank.voices()[1].frequency(), 55.0);
        assert_eq!(bank.voices()[2].slopes().rise, 4.0);
        assert_eq!(bank.voices()[0].shape().value(), -0.6);
        assert!(bank.voices()[2].dc_block_enabled());
        assert_eq!(bank.max_frequency(), FREQ_MAX);
        assert_eq!(bank.mode(), Mode::Ptr);

        bank.apply(Command::LowerBound(-2.0)).unwrap();
        bank.apply(Command::UpperBound(2.0)).unwrap();
        assert_eq!(bank.bounds(), (-2.0, 2.0));
    }

    #[test]
    fn bad_commands_are_errors() {
        let mut bank = Bounce::new(2, -1.0, 1.0, Mode::Ptr, 44_100.0);
        assert_eq!(
            bank.apply(Command::Frequency { voice: 5, hz: 1.0 }),
            Err(Error::InvalidVoice {
                index: 5,
                voice_count: 2
            })
        );
    }

    #[test]
    fn pending_commands_are_applied_in_order() {
        let mut queue: CommandQueue<8> = CommandQueue::new();
        let (mut tx, mut rx) = queue.split();

        let mut bank = Bounce::new(3, -1.0, 1.0, Mode::Ptr, 44_100.0);

        tx.enqueue(Command::CrossMod {
            from: 0,
            to: 2,
            amount: 5.0,
        })
        .unwrap();
        tx.enqueue(Command::CrossMod {
            from: 9,
            to: 2,
            amount: 5.0,
        })
        .unwrap();
        tx.enqueue(Command::CrossModOff).unwrap();
        tx.enqueue(Command::CrossMod {
            from: 1,
            to: 0,
            amount: -3.0,
        })
        .unwrap();

        assert_eq!(bank.apply_pending(&mut rx), 4);
        assert_eq!(bank.apply_pending(&mut rx), 0);

        assert!(bank.cross_mod().is_active());
        assert_eq!(bank.cross_mod().weight(0, 2), 0.0);
        assert_eq!(bank.cross_mod().weight(1, 0), -3.0);
    }

    #[test]
    fn commands_land_between_blocks() {
        let mut queue: CommandQueue<4> = CommandQueue::new();
        let (mut tx, mut rx) = queue.split();

        let mut bank = Bounce::new(1, -1.0, 1.0, Mode::Ptr, 44_100.0);
        let mut out = [[0.0; 32]; MAX_VOICES];

        tx.enqueue(Command::Frequency { voice: 0, hz: 1_000.0 }).unwrap();

        // nothing changes until the audio side drains the queue
        bank.process_block(&BlockInputs::default(), &mut [&mut out[0][..]], 32)
            .unwrap();
        assert_eq!(bank.voices()[0].last_frequency(), 100.0);

        bank.apply_pending(&mut rx);
        bank.process_block(&BlockInputs::default(), &mut [&mut out[0][..]], 32)
            .unwrap();
        assert_eq!(bank.voices()[0].last_frequency(), 1_000.0);
    }
}
