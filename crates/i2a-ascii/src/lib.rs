//! ASCII conversion engine for img2ascii.
//!
//! Converts pixel frames to character grids.

pub mod luminance;

pub use luminance::AsciiRenderer;
