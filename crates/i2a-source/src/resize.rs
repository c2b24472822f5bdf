use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use i2a_core::frame::FrameBuffer;

/// Redimensionne `src` en `width`×`height` par convolution bicubique Catmull-Rom.
///
/// Un appel par rendu : pas de resizer ni de scratch à conserver entre deux appels.
///
/// # Errors
/// Returns an error if a dimension is zero or `src.data` does not match its dimensions.
///
/// # Example
/// ```
/// use i2a_source::resize::resize_frame;
/// use i2a_core::frame::FrameBuffer;
/// let src = FrameBuffer::new(100, 100);
/// let dst = resize_frame(&src, 50, 20).unwrap();
/// assert_eq!((dst.width, dst.height), (50, 20));
/// ```
pub fn resize_frame(src: &FrameBuffer, width: u32, height: u32) -> Result<FrameBuffer> {
    anyhow::ensure!(
        !src.is_empty() && width > 0 && height > 0,
        "Dimensions nulles : {}×{} → {width}×{height}",
        src.width,
        src.height
    );
    anyhow::ensure!(src.is_consistent(), "Invalid source dimensions");

    if src.width == width && src.height == height {
        return Ok(src.clone());
    }

    // fast_image_resize exige &mut sur la source
    let mut src_buf = src.data.clone();
    let src_image = Image::from_slice_u8(src.width, src.height, &mut src_buf, PixelType::U8x4)
        .context("Invalid source dimensions")?;

    let mut dst = FrameBuffer::new(width, height);
    let mut dst_image = Image::from_slice_u8(width, height, &mut dst.data, PixelType::U8x4)
        .context("Invalid destination dimensions")?;

    let options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::CatmullRom));
    Resizer::new()
        .resize(&src_image, &mut dst_image, Some(&options))
        .context("Resize failed")?;

    log::debug!(
        "Resize {}×{} → {width}×{height}",
        src.width,
        src.height
    );
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, v: u8) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height);
        for px in fb.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[v, v, v, 255]);
        }
        fb
    }

    #[test]
    fn solid_color_survives_bicubic() {
        let dst = resize_frame(&solid(37, 19, 200), 8, 8).unwrap();
        assert!(dst.data.chunks_exact(4).all(|px| px == [200, 200, 200, 255]));
    }

    #[test]
    fn upscale_keeps_requested_size() {
        let dst = resize_frame(&solid(2, 3, 10), 40, 7).unwrap();
        assert_eq!((dst.width, dst.height), (40, 7));
        assert_eq!(dst.data.len(), 40 * 7 * 4);
    }

    #[test]
    fn same_size_is_a_copy() {
        let src = solid(4, 4, 99);
        assert_eq!(resize_frame(&src, 4, 4).unwrap(), src);
    }

    #[test]
    fn empty_source_or_target_errors() {
        assert!(resize_frame(&FrameBuffer::new(0, 10), 4, 4).is_err());
        assert!(resize_frame(&solid(3, 3, 1), 0, 4).is_err());
    }

    #[test]
    fn short_buffer_errors() {
        let mut src = solid(3, 3, 1);
        src.data.truncate(7);
        assert!(resize_frame(&src, 6, 6).is_err());
    }
}
