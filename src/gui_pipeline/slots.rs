//! Slot detection module
//!
//! Locates the flat gray placeholder squares of an inventory GUI texture and
//! returns them as square rectangles in reading order. Detection runs in
//! three stages: seed scanning and square growth ([`scanner`]), row grouping
//! ([`layout`]) and per-mode row normalisation, with the colour-specific
//! behaviour isolated behind [`SlotStrategy`].

mod detector;
pub mod layout;
pub mod scanner;
mod strategy;
pub mod types;


pub use detector::{SlotDetector, detect_slots};
pub use strategy::{ExactStrategy, SlotStrategy, ToleranceStrategy};
pub use types::{
    ColorMode, DetectionConfig, DetectionConfigBuilder, SlotRect,
    DEFAULT_EXACT_TARGET, DEFAULT_TOLERANCE_TARGET,
};
