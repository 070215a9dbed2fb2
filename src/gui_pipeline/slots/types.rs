//! Slot detection types and configuration

use serde::{Deserialize, Serialize};

use crate::gui_pipeline::common::error::{Result, SlotError};
use crate::gui_pipeline::pixels::Color;

/// Colour of an empty slot in vanilla GUI textures.
pub const DEFAULT_EXACT_TARGET: Color = Color::new(139, 139, 139);

/// Reference gray for tolerance matching across resource packs.
pub const DEFAULT_TOLERANCE_TARGET: Color = Color::new(128, 128, 128);

const EXACT_SCAN_STEP: usize = 2;
const TOLERANCE_SCAN_STEP: usize = 5;
const EXACT_DEDUP_MARGIN: usize = 2;
const TOLERANCE_DEDUP_MARGIN: usize = 5;
const DEFAULT_UNIFORMITY_FACTOR: f64 = 0.5;
const DEFAULT_ROW_THRESHOLD_FACTOR: f64 = 0.5;
const DEFAULT_MIN_GAP: usize = 2;
const DEFAULT_MIN_SLOT_SIZE: usize = 10;

/// A detected slot in source-image pixel space. Always square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl SlotRect {
    pub fn square(x: usize, y: usize, size: usize) -> Self {
        Self {
            x,
            y,
            width: size,
            height: size,
        }
    }

    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Whether `(x, y)` falls inside this rectangle grown by `margin` on every side.
    pub fn near(&self, x: usize, y: usize, margin: usize) -> bool {
        x >= self.x.saturating_sub(margin)
            && x <= self.right() + margin
            && y >= self.y.saturating_sub(margin)
            && y <= self.bottom() + margin
    }
}

/// How slot pixels are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorMode {
    /// Pixels must equal `target` exactly.
    ExactColor { target: Color },
    /// Pixels must lie within `threshold` (Euclidean RGB) of `target`.
    ToleranceColor { target: Color, threshold: f64 },
}

impl ColorMode {
    pub fn exact() -> Self {
        ColorMode::ExactColor {
            target: DEFAULT_EXACT_TARGET,
        }
    }

    pub fn tolerance(threshold: f64) -> Self {
        ColorMode::ToleranceColor {
            target: DEFAULT_TOLERANCE_TARGET,
            threshold,
        }
    }

    pub fn target(&self) -> Color {
        match *self {
            ColorMode::ExactColor { target } | ColorMode::ToleranceColor { target, .. } => target,
        }
    }

    pub fn default_scan_step(&self) -> usize {
        match self {
            ColorMode::ExactColor { .. } => EXACT_SCAN_STEP,
            ColorMode::ToleranceColor { .. } => TOLERANCE_SCAN_STEP,
        }
    }

    pub fn default_dedup_margin(&self) -> usize {
        match self {
            ColorMode::ExactColor { .. } => EXACT_DEDUP_MARGIN,
            ColorMode::ToleranceColor { .. } => TOLERANCE_DEDUP_MARGIN,
        }
    }
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::exact()
    }
}

/// Parameters of a slot detection run.
///
/// `scan_step` and `dedup_margin` follow the colour mode unless overridden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Smallest square side considered a slot
    pub min_slot_size: usize,
    pub color_mode: ColorMode,
    /// Scan grid spacing; `None` uses the mode default (2px exact, 5px tolerance)
    pub scan_step: Option<usize>,
    /// Margin around accepted candidates inside which seeds are skipped
    pub dedup_margin: Option<usize>,
    /// Tolerance mode: fraction of `threshold` allowed inside one square
    pub uniformity_factor: f64,
    /// Fraction of the average slot size under which two slots share a row
    pub row_threshold_factor: f64,
    /// Exact mode: smallest gap kept between neighbouring slots of a row
    pub min_gap: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_slot_size: DEFAULT_MIN_SLOT_SIZE,
            color_mode: ColorMode::default(),
            scan_step: None,
            dedup_margin: None,
            uniformity_factor: DEFAULT_UNIFORMITY_FACTOR,
            row_threshold_factor: DEFAULT_ROW_THRESHOLD_FACTOR,
            min_gap: DEFAULT_MIN_GAP,
        }
    }
}

impl DetectionConfig {
    pub fn builder() -> DetectionConfigBuilder {
        DetectionConfigBuilder::default()
    }

    pub fn scan_step(&self) -> usize {
        self.scan_step
            .unwrap_or_else(|| self.color_mode.default_scan_step())
    }

    pub fn dedup_margin(&self) -> usize {
        self.dedup_margin
            .unwrap_or_else(|| self.color_mode.default_dedup_margin())
    }

    /// Rejects parameter combinations that would make a scan meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.min_slot_size == 0 {
            return Err(SlotError::InvalidConfiguration(
                "min_slot_size must be positive".to_string(),
            ));
        }

        if self.scan_step() == 0 {
            return Err(SlotError::InvalidConfiguration(
                "scan_step must be positive".to_string(),
            ));
        }

        if let ColorMode::ToleranceColor { threshold, .. } = self.color_mode {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(SlotError::InvalidConfiguration(format!(
                    "threshold must be a non-negative number, got {}",
                    threshold
                )));
            }
        }

        for (name, value) in [
            ("uniformity_factor", self.uniformity_factor),
            ("row_threshold_factor", self.row_threshold_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SlotError::InvalidConfiguration(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Builder for DetectionConfig
#[derive(Default)]
pub struct DetectionConfigBuilder {
    min_slot_size: Option<usize>,
    color_mode: Option<ColorMode>,
    scan_step: Option<usize>,
    dedup_margin: Option<usize>,
    uniformity_factor: Option<f64>,
    row_threshold_factor: Option<f64>,
    min_gap: Option<usize>,
}

impl DetectionConfigBuilder {
    pub fn min_slot_size(mut self, size: usize) -> Self {
        self.min_slot_size = Some(size);
        self
    }

    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = Some(mode);
        self
    }

    pub fn scan_step(mut self, step: usize) -> Self {
        self.scan_step = Some(step);
        self
    }

    pub fn dedup_margin(mut self, margin: usize) -> Self {
        self.dedup_margin = Some(margin);
        self
    }

    pub fn uniformity_factor(mut self, factor: f64) -> Self {
        self.uniformity_factor = Some(factor);
        self
    }

    pub fn row_threshold_factor(mut self, factor: f64) -> Self {
        self.row_threshold_factor = Some(factor);
        self
    }

    pub fn min_gap(mut self, gap: usize) -> Self {
        self.min_gap = Some(gap);
        self
    }

    pub fn build(self) -> DetectionConfig {
        let default = DetectionConfig::default();
        DetectionConfig {
            min_slot_size: self.min_slot_size.unwrap_or(default.min_slot_size),
            color_mode: self.color_mode.unwrap_or(default.color_mode),
            scan_step: self.scan_step.or(default.scan_step),
            dedup_margin: self.dedup_margin.or(default.dedup_margin),
            uniformity_factor: self.uniformity_factor.unwrap_or(default.uniformity_factor),
            row_threshold_factor: self
                .row_threshold_factor
                .unwrap_or(default.row_threshold_factor),
            min_gap: self.min_gap.unwrap_or(default.min_gap),
        }
    }
}
