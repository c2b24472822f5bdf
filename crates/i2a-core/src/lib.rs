//! Configuration, types, and shared structures for img2ascii.
//!
//! This crate contains the glyph ramps, frame and grid types, error kinds
//! and configuration logic used across the workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::{GlyphRamp, LuminanceLut, RampRegistry};
pub use config::AppConfig;
pub use error::CoreError;
pub use frame::{AsciiGrid, FrameBuffer, GrayFrame};
