//! Data sources: synthetic smoothed-return samples.

pub mod sample;

pub use sample::*;
