//! Shared utilities: frame timing, color conversion, and hashing of
//! geometry inputs.

pub mod color;
pub mod frame_timing;
pub mod hash;
