//! Image sources for img2ascii: file loading, bicubic resize, text-to-image backend.

pub mod generator;
pub mod image;
pub mod naming;
pub mod resize;
