use i2a_core::charset::{GlyphRamp, LuminanceLut};
use i2a_core::error::CoreError;
use i2a_core::frame::{AsciiGrid, FrameBuffer, GrayFrame};
use i2a_source::resize::resize_frame;

/// Convertit une image en grille ASCII : resize bicubique → luminance → LUT.
///
/// La ramp et la taille cible sont fixées à la construction ; `render` ne garde
/// aucun état entre deux appels.
///
/// # Example
/// ```
/// use i2a_core::charset::RampRegistry;
/// use i2a_core::frame::FrameBuffer;
/// use i2a_ascii::luminance::AsciiRenderer;
///
/// let renderer = AsciiRenderer::new(RampRegistry::lookup("classic"), 16, 8).unwrap();
/// let grid = renderer.render(&FrameBuffer::new(64, 64)).unwrap();
/// assert_eq!((grid.width, grid.height), (16, 8));
/// ```
pub struct AsciiRenderer {
    ramp: GlyphRamp,
    lut: LuminanceLut,
    width: u32,
    height: u32,
    invert: bool,
}

impl AsciiRenderer {
    /// Create a renderer for a `width`×`height` character grid.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidConfiguration` if either dimension is zero.
    pub fn new(ramp: GlyphRamp, width: u32, height: u32) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidConfiguration(format!(
                "taille cible invalide : {width}×{height}"
            )));
        }
        let lut = LuminanceLut::new(&ramp);
        Ok(Self {
            ramp,
            lut,
            width,
            height,
            invert: false,
        })
    }

    /// Map `255 - p` instead of `p`.
    #[must_use]
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Render `image` into a grid of exactly `height` rows and `width` columns.
    ///
    /// # Errors
    /// Returns `CoreError::UnsupportedImage` if the image has a zero dimension,
    /// a pixel buffer that does not match its dimensions, or cannot be resampled.
    pub fn render(&self, image: &FrameBuffer) -> Result<AsciiGrid, CoreError> {
        if image.is_empty() {
            return Err(CoreError::UnsupportedImage(format!(
                "dimensions nulles {}×{}",
                image.width, image.height
            )));
        }
        if !image.is_consistent() {
            return Err(CoreError::UnsupportedImage(format!(
                "{} octets pour {}×{} pixels RGBA",
                image.data.len(),
                image.width,
                image.height
            )));
        }

        let resized = resize_frame(image, self.width, self.height)
            .map_err(|e| CoreError::UnsupportedImage(format!("{e:#}")))?;
        let gray = resized.to_gray();
        log::debug!(
            "Rendu {}×{} → {}×{} ({} glyphes)",
            image.width,
            image.height,
            self.width,
            self.height,
            self.ramp.len()
        );
        Ok(self.quantize(&gray))
    }

    /// Map an already-resized luminance image, one glyph per pixel.
    fn quantize(&self, gray: &GrayFrame) -> AsciiGrid {
        let mut grid = AsciiGrid::new(gray.width, gray.height);
        for (cell, &lum) in grid.cells.iter_mut().zip(&gray.data) {
            let lum = if self.invert { 255 - lum } else { lum };
            *cell = self.lut.map(lum);
        }
        grid
    }
}
