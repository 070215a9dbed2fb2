//! Pixel reader backed by the `image` crate.
//!
//! Decodes any raster format the `image` crate was built with (PNG, JPEG,
//! BMP, GIF) and normalises it to RGBA8 so every downstream step sees the
//! same channel layout regardless of the source's colour type.

use std::path::Path;

use tracing::debug;

use crate::gui_pipeline::common::error::{Result, SlotError};
use crate::gui_pipeline::common::http;
use crate::gui_pipeline::pixels::reader::PixelReader;
use crate::gui_pipeline::pixels::types::PixelBuffer;

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateReader;

impl PixelReader for ImageCrateReader {
    /// Decodes encoded image bytes into an RGBA pixel buffer.
    ///
    /// # Returns
    ///
    /// * `Ok(PixelBuffer)` - Decoded image
    /// * `Err(SlotError::ImageLoadError)` - The bytes are not a decodable image
    /// * `Err(SlotError::InvalidDimensions)` - The image has no pixels
    fn read_pixels(&self, data: &[u8]) -> Result<PixelBuffer> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| SlotError::ImageLoadError(e.to_string()))?;

        let rgba = decoded.to_rgba8();
        let (width, height) = (rgba.width() as usize, rgba.height() as usize);

        if width == 0 || height == 0 {
            return Err(SlotError::InvalidDimensions(width, height));
        }

        debug!("Decoded image: {}x{}", width, height);

        PixelBuffer::new(width, height, rgba.into_raw())
    }
}

/// Loads and decodes the image behind `source`.
///
/// `source` may be an `http(s)://` URL or a filesystem path. Any failure to
/// obtain or decode the bytes is reported as [`SlotError::ImageLoadError`].
pub fn load_image_pixels(source: &str) -> Result<PixelBuffer> {
    let bytes = if http::is_remote(source) {
        http::fetch_bytes(source).map_err(SlotError::ImageLoadError)?
    } else {
        std::fs::read(Path::new(source))
            .map_err(|e| SlotError::ImageLoadError(format!("{}: {}", source, e)))?
    };

    ImageCrateReader.read_pixels(&bytes)
}
