//! Pipeline conversions module
//!
//! This module contains the orchestration that takes a GUI texture from
//! encoded bytes to detected slots and, optionally, to a composed PNG.

mod slot_pipeline;

#[cfg(test)]
mod tests;

pub use slot_pipeline::SlotPipeline;
