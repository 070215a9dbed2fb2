//! Compositing and export configuration types

use serde::{Deserialize, Serialize};

/// An item icon placed into a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    /// Editor-assigned identifier, unique per placement
    pub id: String,
    /// Path or URL of the icon image
    pub source: String,
}

impl PlacedItem {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }
}

/// PNG compression levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngCompression {
    /// Fastest encoding, larger files
    Fast,
    /// Encoder default (balanced)
    Default,
    /// Smallest files, slowest encoding
    Best,
}

/// Configuration for exporting a composed GUI image
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub compression: PngCompression,
    /// Whether to reject empty or oversized GUI images before detection
    pub validate_dimensions: bool,
    pub max_dimension: Option<usize>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compression: PngCompression::Default,
            validate_dimensions: true,
            max_dimension: Some(4096),
        }
    }
}

impl ExportConfig {
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::default()
    }
}

/// Builder for ExportConfig
#[derive(Default)]
pub struct ExportConfigBuilder {
    compression: Option<PngCompression>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl ExportConfigBuilder {
    pub fn compression(mut self, compression: PngCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> ExportConfig {
        let default = ExportConfig::default();
        ExportConfig {
            compression: self.compression.unwrap_or(default.compression),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
