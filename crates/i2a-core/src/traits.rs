use anyhow::Result;

use crate::frame::FrameBuffer;

/// Fournit une image brute au pipeline.
///
/// Implémenté par : `ImageSource` (fichier).
///
/// # Example
/// ```
/// use i2a_core::traits::Source;
/// use i2a_core::frame::FrameBuffer;
///
/// struct Solid;
/// impl Source for Solid {
///     fn load(&mut self) -> anyhow::Result<FrameBuffer> { Ok(FrameBuffer::new(4, 4)) }
///     fn describe(&self) -> String { "solid".into() }
/// }
/// ```
pub trait Source {
    /// Charge l'image. Chaque appel produit un buffer neuf.
    ///
    /// # Errors
    /// Returns an error if the image cannot be read or decoded.
    fn load(&mut self) -> Result<FrameBuffer>;

    /// Nom lisible pour les logs.
    fn describe(&self) -> String;
}

/// Collaborateur text-to-image. Boîte noire : un prompt entre, une image sort.
///
/// Peut être lent (inférence) ; l'appel est bloquant jusqu'au résultat.
///
/// # Example
/// ```
/// use i2a_core::traits::Generator;
/// use i2a_core::frame::FrameBuffer;
///
/// struct Blank;
/// impl Generator for Blank {
///     fn generate(&mut self, _prompt: &str) -> anyhow::Result<FrameBuffer> {
///         Ok(FrameBuffer::new(8, 8))
///     }
/// }
/// ```
pub trait Generator {
    /// Génère une image pour `prompt`.
    ///
    /// # Errors
    /// Returns an error if the backend fails or returns an undecodable image.
    fn generate(&mut self, prompt: &str) -> Result<FrameBuffer>;
}
