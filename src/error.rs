//! Error types for the bounce oscillator bank.
//!
//! Out of range parameter values are never errors, they are clamped where they are set. Errors are only reported for
//! things a clamp cannot sensibly fix: a voice that does not exist, or a host handing over buffers that do not match
//! the block.

use thiserror::Error;

/// Result type alias for bounce operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur when driving a bounce bank.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A voice index outside `0..voice_count`.
    #[error("voice index {index} out of range for {voice_count} voices")]
    InvalidVoice { index: usize, voice_count: usize },

    /// Fewer output buffers than voices.
    #[error("expected {expected} output buffers, got {got}")]
    OutputCount { expected: usize, got: usize },

    /// An input signal or output buffer shorter than the block.
    #[error("buffer of {len} samples is shorter than the {frames} frame block")]
    ShortBuffer { frames: usize, len: usize },
}
