//! Pixel loading module
//!
//! This module decodes GUI textures and item icons into RGBA pixel buffers.

mod reader;
mod image_reader;
pub mod types;

pub use reader::PixelReader;
pub use image_reader::{ImageCrateReader, load_image_pixels};
pub use types::{Color, PixelBuffer};
