//! GUI slot pipeline module
//!
//! This module provides slot detection for Minecraft-style GUI textures,
//! with separate modules for pixel loading, detection, icon compositing,
//! the item catalog and orchestration of the whole flow.

pub mod pixels;
pub mod slots;
pub mod compose;
pub mod catalog;
pub mod conversions;
pub mod common;

pub use common::{
    SlotError,
    Result,
};

pub use pixels::{
    Color,
    PixelBuffer,
    PixelReader,
    ImageCrateReader,
    load_image_pixels,
};

pub use slots::{
    ColorMode,
    DetectionConfig,
    DetectionConfigBuilder,
    SlotDetector,
    SlotRect,
    detect_slots,
};

pub use compose::{
    Arrangement,
    ExportConfig,
    ExportConfigBuilder,
    PlacedItem,
    PngCompression,
    PngWriter,
    StandardPngWriter,
};

pub use catalog::{
    CatalogCache,
    CatalogItem,
    ItemCatalog,
};

pub use conversions::{
    SlotPipeline,
};
