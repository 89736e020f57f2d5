#![no_std]
#![doc = include_str!("../README.md")]

pub mod bounce;
pub mod channel;
pub mod control;
pub mod cross_mod;
pub mod cursor;
pub mod dc_blocker;
pub mod error;
pub mod gradient;
pub mod lookup_tables;
pub mod voice;
pub mod waveshaper;
mod utils;

pub use bounce::{BlockInputs, Bounce, Input, Mode};
pub use error::{Error, Result};
