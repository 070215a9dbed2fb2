use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use crate::gui_pipeline::common::error::{Result, SlotError};
use crate::gui_pipeline::compose::types::{ExportConfig, PngCompression};
use crate::gui_pipeline::compose::writer::PngWriter;
use crate::gui_pipeline::pixels::PixelBuffer;

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPngWriter;

impl PngWriter for StandardPngWriter {
    fn write_png(&self, image: &PixelBuffer, output: &mut dyn Write, config: &ExportConfig) -> Result<()> {
        debug!("Encoding PNG image: {}x{}", image.width(), image.height());

        let compression = match config.compression {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        };

        let mut buffer = Vec::new();
        PngEncoder::new_with_quality(&mut buffer, compression, FilterType::Adaptive)
            .write_image(
                image.data(),
                image.width() as u32,
                image.height() as u32,
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| SlotError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("PNG encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
