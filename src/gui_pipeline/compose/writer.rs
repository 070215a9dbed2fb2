use std::io::Write;

use crate::gui_pipeline::common::error::Result;
use crate::gui_pipeline::compose::types::ExportConfig;
use crate::gui_pipeline::pixels::PixelBuffer;

pub trait PngWriter {
    fn write_png(&self, image: &PixelBuffer, output: &mut dyn Write, config: &ExportConfig) -> Result<()>;
}
