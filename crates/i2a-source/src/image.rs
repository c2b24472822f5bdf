use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use i2a_core::error::CoreError;
use i2a_core::frame::FrameBuffer;
use i2a_core::traits::Source;

/// Source d'image fichier (PNG, JPEG, BMP, GIF).
///
/// # Example
/// ```no_run
/// use i2a_core::traits::Source;
/// use i2a_source::image::ImageSource;
/// let mut source = ImageSource::new("photo.png").unwrap();
/// let frame = source.load().unwrap();
/// ```
pub struct ImageSource {
    path: PathBuf,
}

impl ImageSource {
    /// Create a source for `path`. Le fichier n'est lu qu'au `load`.
    ///
    /// # Errors
    /// Returns `CoreError::EmptyInput` if the path is blank.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        if path.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(CoreError::EmptyInput("chemin d'image vide".into()));
        }
        Ok(Self { path })
    }
}

impl Source for ImageSource {
    fn load(&mut self) -> Result<FrameBuffer> {
        load_image(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Charge une image disque en RGBA.
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img =
        image::open(path).with_context(|| format!("Impossible de charger {}", path.display()))?;
    let frame = to_frame(img);
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// Décode une image encodée en mémoire (PNG, JPEG, …).
///
/// # Errors
/// Returns an error if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> Result<FrameBuffer> {
    let img = image::load_from_memory(bytes).context("Impossible de décoder l'image")?;
    Ok(to_frame(img))
}

fn to_frame(img: image::DynamicImage) -> FrameBuffer {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    }
}

/// Sauvegarde une frame en PNG.
///
/// # Errors
/// Returns an error if the buffer is inconsistent or the file cannot be written.
pub fn save_frame(frame: &FrameBuffer, path: &Path) -> Result<()> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
        .ok_or_else(|| {
            CoreError::UnsupportedImage(format!(
                "buffer de {} octets pour {}×{}",
                frame.data.len(),
                frame.width,
                frame.height
            ))
        })?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    Ok(())
}
