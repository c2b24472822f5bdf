use std::fmt;

/// Buffer de pixels RGBA, row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use i2a_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir transparent aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// True si une dimension est nulle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True si `data` contient exactement `width * height` pixels RGBA.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.width as usize * self.height as usize * 4
    }

    /// Conversion en niveaux de gris ITU-R 601-2, un byte par pixel. L'alpha est ignoré.
    ///
    /// # Example
    /// ```
    /// use i2a_core::frame::FrameBuffer;
    /// let mut fb = FrameBuffer::new(1, 1);
    /// fb.data.copy_from_slice(&[255, 255, 255, 255]);
    /// assert_eq!(fb.to_gray().data, vec![255]);
    /// ```
    #[must_use]
    pub fn to_gray(&self) -> GrayFrame {
        let data = self
            .data
            .chunks_exact(4)
            .map(|px| luma_601(px[0], px[1], px[2]))
            .collect();
        GrayFrame {
            data,
            width: self.width,
            height: self.height,
        }
    }
}

/// `L = (299 R + 587 G + 114 B) / 1000`, arrondi au plus proche.
#[inline(always)]
fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500) / 1000) as u8
}

/// Single-channel intensity image, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayFrame {
    /// One intensity byte per pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Grille de sortie ASCII, row-major. S'affiche une ligne par rangée.
///
/// # Example
/// ```
/// use i2a_core::frame::AsciiGrid;
/// let mut grid = AsciiGrid::new(3, 2);
/// grid.cells[1] = '@';
/// assert_eq!(grid.to_string(), " @ \n   ");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiGrid {
    /// Flat array of glyphs, row-major.
    pub cells: Vec<char>,
    /// Width in characters.
    pub width: u32,
    /// Height in characters.
    pub height: u32,
}

impl AsciiGrid {
    /// Crée une grille remplie d'espaces.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![' '; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Rows of glyphs, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks_exact(self.width.max(1) as usize)
    }
}

impl fmt::Display for AsciiGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for ch in row {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_weights_follow_rec601() {
        assert_eq!(luma_601(0, 0, 0), 0);
        assert_eq!(luma_601(255, 255, 255), 255);
        assert_eq!(luma_601(255, 0, 0), 76);
        assert_eq!(luma_601(0, 255, 0), 150);
        assert_eq!(luma_601(0, 0, 255), 29);
    }

    #[test]
    fn to_gray_ignores_alpha() {
        let fb = FrameBuffer {
            data: vec![128, 128, 128, 0, 128, 128, 128, 255],
            width: 2,
            height: 1,
        };
        let gray = fb.to_gray();
        assert_eq!(gray.data, vec![128, 128]);
        assert_eq!((gray.width, gray.height), (2, 1));
    }

    #[test]
    fn consistency_checks() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(fb.is_consistent());
        assert!(!fb.is_empty());
        fb.data.pop();
        assert!(!fb.is_consistent());
        assert!(FrameBuffer::new(0, 5).is_empty());
    }

    #[test]
    fn display_has_one_line_per_row() {
        let grid = AsciiGrid::new(4, 3);
        let text = grid.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.chars().count() == 4));
    }
}
