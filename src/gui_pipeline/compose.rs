//! Compositing and PNG export module
//!
//! This module places item icons into detected slots and encodes the
//! composed GUI as PNG.

mod arrangement;
mod compositor;
mod icons;
mod standard_png_writer;
pub mod types;
mod writer;

pub use arrangement::Arrangement;
pub use compositor::compose;
pub use icons::{FsIconSource, HttpIconSource, IconSource};
pub use standard_png_writer::StandardPngWriter;
pub use types::{ExportConfig, ExportConfigBuilder, PlacedItem, PngCompression};
pub use writer::PngWriter;
