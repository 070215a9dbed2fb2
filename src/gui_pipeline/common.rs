//! Common utilities module
//!
//! This module contains shared utilities used across the GUI pipeline.

pub mod error;
pub mod http;
pub mod timing;

pub use error::{SlotError, Result};
pub use timing::{PipelineTimings, StepTiming, Timer};
