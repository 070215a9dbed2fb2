use crate::gui_pipeline::common::error::Result;
use crate::gui_pipeline::pixels::types::PixelBuffer;

pub trait PixelReader {
    fn read_pixels(&self, data: &[u8]) -> Result<PixelBuffer>;
}
