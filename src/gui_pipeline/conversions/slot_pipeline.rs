use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::gui_pipeline::{
    common::{
        error::{Result, SlotError},
        timing::{PipelineTimings, Timer},
    },
    compose::{self, Arrangement, ExportConfig, IconSource, PngWriter, StandardPngWriter},
    pixels::{ImageCrateReader, PixelBuffer, PixelReader},
    slots::{DetectionConfig, SlotDetector, SlotRect},
};

pub struct SlotPipeline<R: PixelReader, W: PngWriter> {
    reader: R,
    writer: W,
    detector: SlotDetector,
    export: ExportConfig,
}

impl SlotPipeline<ImageCrateReader, StandardPngWriter> {
    pub fn new(detection: DetectionConfig, export: ExportConfig) -> Result<Self> {
        Self::with_custom(ImageCrateReader, StandardPngWriter, detection, export)
    }
}

impl<R: PixelReader, W: PngWriter> SlotPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, detection: DetectionConfig, export: ExportConfig) -> Result<Self> {
        Ok(Self {
            reader,
            writer,
            detector: SlotDetector::new(detection)?,
            export,
        })
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.export.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(SlotError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.export.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(SlotError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    fn decode(&self, input_data: &[u8]) -> Result<PixelBuffer> {
        let image = {
            let _span = tracing::info_span!("decode_image").entered();
            self.reader.read_pixels(input_data)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = image.width(),
                height = image.height()
            ).entered();
            self.validate_dimensions(image.width(), image.height())?;
        }

        Ok(image)
    }

    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn detect(&self, input_data: &[u8]) -> Result<Vec<SlotRect>> {
        let image = self.decode(input_data)?;
        let slots = self.detector.detect(&image)?;

        info!(
            width = image.width(),
            height = image.height(),
            slots = slots.len(),
            "Detection complete"
        );
        Ok(slots)
    }

    pub fn detect_with_timings(&self, input_data: &[u8]) -> Result<(Vec<SlotRect>, PipelineTimings)> {
        let mut timings = PipelineTimings::new();

        let timer = Timer::start("decode_image");
        let image = self.reader.read_pixels(input_data)?;
        timings.record(timer);

        let timer = Timer::start("validate_dimensions");
        self.validate_dimensions(image.width(), image.height())?;
        timings.record(timer);

        let timer = Timer::start("detect_slots");
        let slots = self.detector.detect(&image)?;
        timings.record(timer);

        info!(
            "Detected {} slots in {}x{} image in {:.3}ms",
            slots.len(),
            image.width(),
            image.height(),
            timings.total_duration().as_secs_f64() * 1000.0
        );
        if tracing::enabled!(tracing::Level::DEBUG) {
            timings.log_summary();
        }
        Ok((slots, timings))
    }

    #[instrument(skip(self, input_path))]
    pub fn detect_file<P: AsRef<Path>>(&self, input_path: P) -> Result<Vec<SlotRect>> {
        let input_data = read_input(input_path.as_ref())?;
        self.detect(&input_data)
    }

    /// Detects slots in the GUI texture, draws the arranged icons into them and
    /// writes the result as PNG. Returns the slots that were used.
    ///
    /// The arrangement must have been built against this texture's slots.
    #[instrument(skip_all, fields(input_size = input_data.len(), placements = arrangement.len()))]
    pub fn compose<I>(
        &self,
        input_data: &[u8],
        arrangement: &Arrangement,
        icons: &I,
        output: &mut dyn Write,
    ) -> Result<Vec<SlotRect>>
    where
        I: IconSource + ?Sized,
    {
        let background = self.decode(input_data)?;
        let slots = self.detector.detect(&background)?;

        if arrangement.slot_count() != slots.len() {
            warn!(
                "Arrangement expects {} slots but {} were detected",
                arrangement.slot_count(),
                slots.len()
            );
        }

        let composed = {
            let _span = tracing::info_span!("composite_icons").entered();
            compose::compose(&background, &slots, arrangement, icons)?
        };

        {
            let _span = tracing::info_span!("encode_png").entered();
            self.writer.write_png(&composed, output, &self.export)?;
        }

        info!(slots = slots.len(), placements = arrangement.len(), "Export complete");
        Ok(slots)
    }

    #[instrument(skip(self, input_path, output_path, arrangement, icons))]
    pub fn compose_file<P, Q, I>(
        &self,
        input_path: P,
        arrangement: &Arrangement,
        icons: &I,
        output_path: Q,
    ) -> Result<Vec<SlotRect>>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        I: IconSource + ?Sized,
    {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Exporting composed GUI"
        );

        let input_data = read_input(input_path)?;

        // an existing export is only replaced once the new one is fully encoded
        let mut encoded = Vec::new();
        let slots = self.compose(&input_data, arrangement, icons, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file", bytes = encoded.len()).entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                SlotError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(slots)
    }

    pub fn detection_config(&self) -> &DetectionConfig {
        self.detector.config()
    }

    pub fn export_config(&self) -> &ExportConfig {
        &self.export
    }

    pub fn set_detection_config(&mut self, detection: DetectionConfig) -> Result<()> {
        self.detector = SlotDetector::new(detection)?;
        Ok(())
    }

    pub fn set_export_config(&mut self, export: ExportConfig) {
        self.export = export;
    }
}

fn read_input(input_path: &Path) -> Result<Vec<u8>> {
    let _span = tracing::info_span!("read_input_file").entered();
    std::fs::read(input_path)
        .map_err(|e| SlotError::InputReadError(format!("{}: {}", input_path.display(), e)))
}
