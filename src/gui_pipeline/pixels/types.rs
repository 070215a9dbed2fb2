//! Pixel buffer and colour types

use serde::{Deserialize, Serialize};

use crate::gui_pipeline::common::error::{Result, SlotError};

/// Number of interleaved channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// An opaque RGB colour. Alpha is never part of colour matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance in RGB space.
    pub fn distance(&self, other: Color) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// Decoded raster image in row-major RGBA8 layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw RGBA bytes, rejecting buffers whose length disagrees with the dimensions.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(SlotError::InvalidDimensions(width, height))?;

        if data.len() != expected {
            return Err(SlotError::InvalidDimensions(width, height));
        }

        Ok(Self { width, height, data })
    }

    /// Builds a buffer by evaluating `pixel(x, y)` for every coordinate.
    pub fn from_fn<F>(width: usize, height: usize, mut pixel: F) -> Self
    where
        F: FnMut(usize, usize) -> [u8; 4],
    {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&pixel(x, y));
            }
        }
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Colour at `(x, y)`. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn color_at(&self, x: usize, y: usize) -> Color {
        let i = (y * self.width + x) * CHANNELS;
        Color::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        self.contains(x, y).then(|| self.color_at(x, y))
    }
}
