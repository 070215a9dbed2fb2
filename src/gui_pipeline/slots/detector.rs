use tracing::{debug, info, instrument};

use crate::gui_pipeline::common::error::Result;
use crate::gui_pipeline::pixels::PixelBuffer;
use crate::gui_pipeline::slots::{
    layout,
    scanner::{self, ScanParams},
    strategy::{ExactStrategy, SlotStrategy, ToleranceStrategy},
    types::{ColorMode, DetectionConfig, SlotRect},
};

/// Slot detector bound to a validated [`DetectionConfig`].
#[derive(Debug, Clone)]
pub struct SlotDetector {
    config: DetectionConfig,
}

impl SlotDetector {
    /// Creates a detector, failing fast with `InvalidConfiguration` on bad parameters.
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detects slots in `image`, returned in reading order.
    ///
    /// An image without any slot-coloured square yields an empty list.
    pub fn detect(&self, image: &PixelBuffer) -> Result<Vec<SlotRect>> {
        self.detect_until(image, || false)
    }

    /// Like [`detect`](Self::detect), polling `should_stop` between scan grid
    /// positions and failing with `Cancelled` once it returns `true`.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn detect_until<F>(&self, image: &PixelBuffer, should_stop: F) -> Result<Vec<SlotRect>>
    where
        F: FnMut() -> bool,
    {
        let config = &self.config;
        match config.color_mode {
            ColorMode::ExactColor { target } => {
                self.run(image, &ExactStrategy::new(target, config.min_gap), should_stop)
            }
            ColorMode::ToleranceColor { target, threshold } => self.run(
                image,
                &ToleranceStrategy::new(target, threshold, config.uniformity_factor),
                should_stop,
            ),
        }
    }

    fn run<S, F>(&self, image: &PixelBuffer, strategy: &S, should_stop: F) -> Result<Vec<SlotRect>>
    where
        S: SlotStrategy,
        F: FnMut() -> bool,
    {
        let params = ScanParams {
            min_slot_size: self.config.min_slot_size,
            step: self.config.scan_step(),
            dedup_margin: self.config.dedup_margin(),
        };
        debug!(?params, mode = ?self.config.color_mode, "Scanning for slot candidates");

        let candidates = {
            let _span = tracing::debug_span!("scan_candidates").entered();
            scanner::scan_candidates(image, strategy, &params, should_stop)?
        };

        if candidates.is_empty() {
            info!("No slots detected");
            return Ok(Vec::new());
        }

        let slots = {
            let _span = tracing::debug_span!("arrange_rows", candidates = candidates.len()).entered();
            layout::arrange(&candidates, strategy, self.config.row_threshold_factor)
        };

        info!(slots = slots.len(), "Slot detection complete");
        Ok(slots)
    }
}

/// Detects slots in `image` with `config`.
pub fn detect_slots(image: &PixelBuffer, config: &DetectionConfig) -> Result<Vec<SlotRect>> {
    SlotDetector::new(config.clone())?.detect(image)
}
