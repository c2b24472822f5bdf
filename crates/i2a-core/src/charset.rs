use crate::error::CoreError;

/// 10 caractères, le style par défaut.
pub const RAMP_CLASSIC: &str = " .:-=+*%#@";

/// 12 caractères, sans espace : fond toujours texturé.
pub const RAMP_MODERN: &str = ".,-':;ildxo#";

/// 12 caractères, ponctuation fine.
pub const RAMP_RETRO: &str = " .,'`^\",:;I@";

/// Classic inversé (dense→clair), pour fond clair.
pub const RAMP_THICK: &str = "@%#*+=-:. ";

/// 24 caractères avec répétitions : bandes plus larges par glyphe.
pub const RAMP_THIN: &str = " ..---===+++***%%%###@@@";

/// Binaire.
pub const RAMP_SIMPLE: &str = "01";

/// Style used when an unknown name is requested.
pub const DEFAULT_STYLE: &str = "classic";

/// Table nom de style → ramp, dans l'ordre d'affichage.
const STYLES: &[(&str, &str)] = &[
    ("classic", RAMP_CLASSIC),
    ("modern", RAMP_MODERN),
    ("retro", RAMP_RETRO),
    ("thick", RAMP_THICK),
    ("thin", RAMP_THIN),
    ("simple", RAMP_SIMPLE),
];

/// Ordered glyph sequence. Index 0 is used for intensity 0, the last index for 255.
///
/// # Example
/// ```
/// use i2a_core::charset::GlyphRamp;
/// let ramp = GlyphRamp::new(" .:#@").unwrap();
/// assert_eq!(ramp.len(), 5);
/// assert_eq!(ramp.glyph(4), '@');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

#[allow(clippy::len_without_is_empty)]
impl GlyphRamp {
    /// Build a ramp from a string, one glyph per Unicode scalar value.
    ///
    /// Duplicates are kept; a single glyph is accepted.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidConfiguration` if `ramp` is empty.
    pub fn new(ramp: &str) -> Result<Self, CoreError> {
        let glyphs: Vec<char> = ramp.chars().collect();
        if glyphs.is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "la ramp de glyphes est vide".into(),
            ));
        }
        Ok(Self { glyphs })
    }

    /// Number of glyphs (always ≥ 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Glyph at `index`, clamped to the last glyph.
    #[must_use]
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index.min(self.glyphs.len() - 1)]
    }

    /// Ramp index for an intensity: `floor(p * (len - 1) / 255)`.
    ///
    /// Integer arithmetic, so 255 lands exactly on the last index.
    ///
    /// # Example
    /// ```
    /// use i2a_core::charset::GlyphRamp;
    /// let ramp = GlyphRamp::new(" .:-=+*%#@").unwrap();
    /// assert_eq!(ramp.index_for(0), 0);
    /// assert_eq!(ramp.index_for(128), 4);
    /// assert_eq!(ramp.index_for(255), 9);
    /// ```
    #[must_use]
    pub fn index_for(&self, intensity: u8) -> usize {
        let last = self.glyphs.len() - 1;
        (usize::from(intensity) * last / 255).min(last)
    }
}

/// Read-only registry of the built-in styles.
///
/// # Example
/// ```
/// use i2a_core::charset::{GlyphRamp, RampRegistry};
/// let ramp = RampRegistry::lookup("nope");
/// assert_eq!(ramp, GlyphRamp::new(" .:-=+*%#@").unwrap());
/// ```
pub struct RampRegistry;

impl RampRegistry {
    /// Raw ramp string for `name`, if registered.
    #[must_use]
    pub fn get(name: &str) -> Option<&'static str> {
        STYLES
            .iter()
            .find(|(style, _)| *style == name)
            .map(|(_, ramp)| *ramp)
    }

    /// Ramp for `name`, falling back to `classic` for unknown names.
    #[must_use]
    pub fn lookup(name: &str) -> GlyphRamp {
        let ramp = Self::get(name).unwrap_or_else(|| {
            log::warn!("Style inconnu '{name}', utilisation de '{DEFAULT_STYLE}'.");
            RAMP_CLASSIC
        });
        // Built-in ramps are never empty.
        GlyphRamp {
            glyphs: ramp.chars().collect(),
        }
    }

    /// Registered `(name, ramp)` pairs in display order.
    pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
        STYLES.iter().copied()
    }
}

/// Lookup table mapping luminance [0..255] → character.
///
/// Pre-computed from a ramp for O(1) per-pixel cost.
///
/// # Example
/// ```
/// use i2a_core::charset::{GlyphRamp, LuminanceLut};
/// let lut = LuminanceLut::new(&GlyphRamp::new(" .:#@").unwrap());
/// assert_eq!(lut.map(0), ' ');
/// assert_eq!(lut.map(255), '@');
/// ```
pub struct LuminanceLut {
    lut: [char; 256],
}

impl LuminanceLut {
    /// Build a LUT from a ramp.
    #[must_use]
    pub fn new(ramp: &GlyphRamp) -> Self {
        let mut lut = [' '; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            *slot = ramp.glyph(ramp.index_for(i as u8));
        }
        Self { lut }
    }

    /// Map a luminance value [0..255] to a character.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: u8) -> char {
        self.lut[luminance as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ramp_is_rejected() {
        assert!(matches!(
            GlyphRamp::new(""),
            Err(CoreError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn index_stays_in_range_for_every_intensity() {
        for (_, ramp) in RampRegistry::entries() {
            let ramp = GlyphRamp::new(ramp).unwrap();
            for p in 0..=255u8 {
                assert!(ramp.index_for(p) < ramp.len());
            }
            assert_eq!(ramp.index_for(0), 0);
            assert_eq!(ramp.index_for(255), ramp.len() - 1);
        }
    }

    #[test]
    fn classic_mid_gray_is_equals_sign() {
        let lut = LuminanceLut::new(&RampRegistry::lookup("classic"));
        assert_eq!(lut.map(128), '=');
    }

    #[test]
    fn single_glyph_ramp_maps_everything_to_it() {
        let ramp = GlyphRamp::new("#").unwrap();
        let lut = LuminanceLut::new(&ramp);
        assert!((0..=255u8).all(|p| lut.map(p) == '#'));
    }

    #[test]
    fn unknown_style_falls_back_to_classic() {
        assert_eq!(RampRegistry::lookup("vaporwave"), RampRegistry::lookup("classic"));
        assert_eq!(RampRegistry::get("vaporwave"), None);
    }

    #[test]
    fn unicode_glyphs_count_as_one() {
        let ramp = GlyphRamp::new(" ░▒▓█").unwrap();
        assert_eq!(ramp.len(), 5);
        assert_eq!(ramp.glyph(ramp.index_for(255)), '█');
    }

    #[test]
    fn lut_monotonic() {
        let ramp = GlyphRamp::new(RAMP_CLASSIC).unwrap();
        let mut prev = 0usize;
        for p in 0..=255u8 {
            let idx = ramp.index_for(p);
            assert!(idx >= prev, "LUT non monotone à luminance {p}");
            prev = idx;
        }
    }

    #[test]
    fn registry_lists_all_styles() {
        let names: Vec<_> = RampRegistry::entries().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            ["classic", "modern", "retro", "thick", "thin", "simple"]
        );
    }
}
