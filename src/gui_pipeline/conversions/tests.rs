use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use crate::gui_pipeline::common::error::{Result, SlotError};
use crate::gui_pipeline::compose::{
    Arrangement, ExportConfig, FsIconSource, IconSource, PlacedItem, PngWriter, StandardPngWriter,
};
use crate::gui_pipeline::conversions::SlotPipeline;
use crate::gui_pipeline::pixels::{ImageCrateReader, PixelBuffer, PixelReader};
use crate::gui_pipeline::slots::{ColorMode, DetectionConfig, SlotRect};

const SLOT: [u8; 4] = [139, 139, 139, 255];
const FRAME: [u8; 4] = [198, 198, 198, 255];

/// 100x60 texture with two 20px slots at (10,20) and (50,20).
fn two_slot_gui() -> PixelBuffer {
    PixelBuffer::from_fn(100, 60, |x, y| {
        let in_slot = |sx: usize| (sx..sx + 20).contains(&x) && (20..40).contains(&y);
        if in_slot(10) || in_slot(50) { SLOT } else { FRAME }
    })
}

struct MockReader {
    should_fail: bool,
    mock_data: Option<PixelBuffer>,
}

impl PixelReader for MockReader {
    fn read_pixels(&self, _data: &[u8]) -> Result<PixelBuffer> {
        if self.should_fail {
            return Err(SlotError::ImageLoadError("Mock decode error".to_string()));
        }
        Ok(self.mock_data.clone().unwrap_or_else(two_slot_gui))
    }
}

struct MockWriter {
    should_fail: bool,
    written_data: Arc<Mutex<Vec<PixelBuffer>>>,
}

impl PngWriter for MockWriter {
    fn write_png(&self, image: &PixelBuffer, _output: &mut dyn Write, _config: &ExportConfig) -> Result<()> {
        if self.should_fail {
            return Err(SlotError::EncodeError("Mock encode error".to_string()));
        }
        self.written_data.lock().unwrap().push(image.clone());
        Ok(())
    }
}

struct SolidIcons;

impl IconSource for SolidIcons {
    fn load_icon(&self, _source: &str) -> Result<PixelBuffer> {
        Ok(PixelBuffer::from_fn(16, 16, |_, _| [200, 40, 40, 255]))
    }
}

struct MissingIcons;

impl IconSource for MissingIcons {
    fn load_icon(&self, source: &str) -> Result<PixelBuffer> {
        Err(SlotError::ImageLoadError(format!("{}: not found", source)))
    }
}

fn detection() -> DetectionConfig {
    DetectionConfig::builder()
        .min_slot_size(10)
        .color_mode(ColorMode::exact())
        .build()
}

fn pipeline(
    reader: MockReader,
    writer_fails: bool,
    export: ExportConfig,
) -> (SlotPipeline<MockReader, MockWriter>, Arc<Mutex<Vec<PixelBuffer>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter {
        should_fail: writer_fails,
        written_data: written.clone(),
    };
    let pipeline = SlotPipeline::with_custom(reader, writer, detection(), export).unwrap();
    (pipeline, written)
}

fn encode_png(buffer: &PixelBuffer) -> Vec<u8> {
    let mut bytes = Vec::new();
    StandardPngWriter
        .write_png(buffer, &mut bytes, &ExportConfig::default())
        .unwrap();
    bytes
}

#[test]
fn test_export_config_builder() {
    let config = ExportConfig::builder()
        .validate_dimensions(false)
        .max_dimension(Some(512))
        .build();

    assert!(!config.validate_dimensions);
    assert_eq!(config.max_dimension, Some(512));
}

#[test]
fn test_successful_detection() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let (pipeline, _) = pipeline(reader, false, ExportConfig::default());

    let slots = pipeline.detect(b"fake png data").unwrap();

    assert_eq!(
        slots,
        vec![SlotRect::square(10, 20, 20), SlotRect::square(50, 20, 20)]
    );
}

#[test]
fn test_reader_failure() {
    let reader = MockReader { should_fail: true, mock_data: None };
    let (pipeline, _) = pipeline(reader, false, ExportConfig::default());

    let result = pipeline.detect(b"fake png data");

    assert!(matches!(result.unwrap_err(), SlotError::ImageLoadError(_)));
}

#[test]
fn test_invalid_detection_config() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let writer = MockWriter {
        should_fail: false,
        written_data: Arc::new(Mutex::new(Vec::new())),
    };
    let config = DetectionConfig::builder().min_slot_size(0).build();

    let result = SlotPipeline::with_custom(reader, writer, config, ExportConfig::default());
    assert!(matches!(result, Err(SlotError::InvalidConfiguration(_))));
}

#[test]
fn test_dimension_validation_failure() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let export = ExportConfig::builder().max_dimension(Some(64)).build();
    let (pipeline, _) = pipeline(reader, false, export);

    let result = pipeline.detect(b"fake png data");
    assert!(matches!(result.unwrap_err(), SlotError::InvalidDimensions(100, 60)));
}

#[test]
fn test_dimension_validation_disabled() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let export = ExportConfig::builder()
        .validate_dimensions(false)
        .max_dimension(Some(64))
        .build();
    let (pipeline, _) = pipeline(reader, false, export);

    assert_eq!(pipeline.detect(b"fake png data").unwrap().len(), 2);
}

#[test]
fn test_detect_with_timings() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let (pipeline, _) = pipeline(reader, false, ExportConfig::default());

    let (slots, timings) = pipeline.detect_with_timings(b"fake png data").unwrap();

    assert_eq!(slots.len(), 2);
    let steps: Vec<_> = timings.steps().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(steps, vec!["decode_image", "validate_dimensions", "detect_slots"]);
}

#[test]
fn test_compose_writes_composited_image() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let (pipeline, written) = pipeline(reader, false, ExportConfig::default());
    let mut arrangement = Arrangement::new(2);
    arrangement.assign(1, PlacedItem::new("redstone", "redstone.png")).unwrap();

    let mut output = Cursor::new(Vec::new());
    let slots = pipeline
        .compose(b"fake png data", &arrangement, &SolidIcons, &mut output)
        .unwrap();

    assert_eq!(slots.len(), 2);
    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    // slot 1 painted, slot 0 left empty
    assert_eq!(written[0].color_at(55, 25).r, 200);
    assert_eq!(written[0].color_at(15, 25).r, 139);
}

#[test]
fn test_writer_failure() {
    let reader = MockReader { should_fail: false, mock_data: None };
    let (pipeline, _) = pipeline(reader, true, ExportConfig::default());

    let mut output = Cursor::new(Vec::new());
    let result = pipeline.compose(b"fake png data", &Arrangement::new(2), &SolidIcons, &mut output);

    assert!(matches!(result.unwrap_err(), SlotError::EncodeError(_)));
}

#[test]
fn test_file_roundtrip_with_real_codecs() {
    let dir = tempfile::tempdir().unwrap();
    let gui_path = dir.path().join("gui.png");
    let out_path = dir.path().join("composed.png");
    std::fs::write(&gui_path, encode_png(&two_slot_gui())).unwrap();
    std::fs::write(
        dir.path().join("stick.png"),
        encode_png(&PixelBuffer::from_fn(4, 4, |_, _| [90, 60, 20, 255])),
    )
    .unwrap();

    let pipeline = SlotPipeline::new(detection(), ExportConfig::default()).unwrap();
    assert_eq!(pipeline.detect_file(&gui_path).unwrap().len(), 2);

    let mut arrangement = Arrangement::new(2);
    arrangement.assign(0, PlacedItem::new("stick-1", "stick.png")).unwrap();
    let icons = FsIconSource::new(dir.path());
    pipeline
        .compose_file(&gui_path, &arrangement, &icons, &out_path)
        .unwrap();

    let composed = ImageCrateReader
        .read_pixels(&std::fs::read(&out_path).unwrap())
        .unwrap();
    assert_eq!(composed.color_at(12, 22).r, 90);
    assert_eq!(composed.color_at(55, 25).r, 139);
}

#[test]
fn test_failed_export_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let gui_path = dir.path().join("gui.png");
    let out_path = dir.path().join("out.png");
    std::fs::write(&gui_path, b"fake png data").unwrap();
    std::fs::write(&out_path, b"previous export").unwrap();

    let mut arrangement = Arrangement::new(2);
    arrangement.assign(0, PlacedItem::new("apple-0", "apple.png")).unwrap();

    let reader = MockReader { should_fail: false, mock_data: None };
    let (icons_fail, _) = pipeline(reader, false, ExportConfig::default());
    let result = icons_fail.compose_file(&gui_path, &arrangement, &MissingIcons, &out_path);
    assert!(matches!(result.unwrap_err(), SlotError::ImageLoadError(_)));
    assert_eq!(std::fs::read(&out_path).unwrap(), b"previous export");

    let reader = MockReader { should_fail: false, mock_data: None };
    let (encoder_fails, _) = pipeline(reader, true, ExportConfig::default());
    let result = encoder_fails.compose_file(&gui_path, &arrangement, &SolidIcons, &out_path);
    assert!(matches!(result.unwrap_err(), SlotError::EncodeError(_)));
    assert_eq!(std::fs::read(&out_path).unwrap(), b"previous export");
}

#[test]
fn test_unwritable_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let gui_path = dir.path().join("gui.png");
    std::fs::write(&gui_path, b"fake png data").unwrap();

    let reader = MockReader { should_fail: false, mock_data: None };
    let (pipeline, _) = pipeline(reader, false, ExportConfig::default());
    let out_path = dir.path().join("missing-dir").join("out.png");
    let result = pipeline.compose_file(&gui_path, &Arrangement::new(2), &SolidIcons, &out_path);

    assert!(matches!(result.unwrap_err(), SlotError::OutputWriteError(_)));
}

#[test]
fn test_missing_input_file() {
    let pipeline = SlotPipeline::new(detection(), ExportConfig::default()).unwrap();
    let result = pipeline.detect_file("/nonexistent/gui.png");
    assert!(matches!(result.unwrap_err(), SlotError::InputReadError(_)));
}
