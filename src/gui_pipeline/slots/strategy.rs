//! Colour matching strategies
//!
//! Each [`ColorMode`](super::ColorMode) maps to one strategy: how a seed
//! pixel is recognised, how flatness inside a square is judged and how a
//! row of detected slots is tidied up.

use crate::gui_pipeline::pixels::Color;
use crate::gui_pipeline::slots::types::SlotRect;

pub trait SlotStrategy {
    /// Whether `color` is slot colour at all.
    fn is_target(&self, color: Color) -> bool;

    /// Whether `color` keeps a square seeded with `seed` visually flat.
    fn is_flat(&self, seed: Color, color: Color) -> bool;

    /// Adjusts one row of slots, sorted by x, holding more than one slot.
    fn normalize_row(&self, row: &[SlotRect], avg_size: f64) -> Vec<SlotRect>;
}

/// Exact colour equality; snaps slots that sit too close to a neighbour.
#[derive(Debug, Clone, Copy)]
pub struct ExactStrategy {
    target: Color,
    min_gap: usize,
}

impl ExactStrategy {
    pub fn new(target: Color, min_gap: usize) -> Self {
        Self { target, min_gap }
    }
}

impl SlotStrategy for ExactStrategy {
    fn is_target(&self, color: Color) -> bool {
        color == self.target
    }

    fn is_flat(&self, _seed: Color, color: Color) -> bool {
        color == self.target
    }

    // Gaps are measured on the detected positions, not on already adjusted ones.
    // Only the first slot of a row is ever pulled back towards its successor.
    fn normalize_row(&self, row: &[SlotRect], _avg_size: f64) -> Vec<SlotRect> {
        let gap = self.min_gap as i64;

        row.iter()
            .enumerate()
            .map(|(index, slot)| {
                let mut x = slot.x as i64;

                if let Some(prev) = index.checked_sub(1).map(|i| &row[i]) {
                    if (slot.x as i64) - (prev.right() as i64) < gap {
                        x = prev.right() as i64 + gap;
                    }
                }

                if let (0, Some(next)) = (index, row.get(index + 1)) {
                    if (next.x as i64) - (slot.right() as i64) < gap {
                        x = next.x as i64 - slot.width as i64 - gap;
                    }
                }

                SlotRect {
                    x: x.max(0) as usize,
                    ..*slot
                }
            })
            .collect()
    }
}

/// Euclidean RGB distance against a target; resizes a row to the average slot size.
#[derive(Debug, Clone, Copy)]
pub struct ToleranceStrategy {
    target: Color,
    threshold: f64,
    flat_threshold: f64,
}

impl ToleranceStrategy {
    pub fn new(target: Color, threshold: f64, uniformity_factor: f64) -> Self {
        Self {
            target,
            threshold,
            flat_threshold: threshold * uniformity_factor,
        }
    }
}

impl SlotStrategy for ToleranceStrategy {
    fn is_target(&self, color: Color) -> bool {
        color.distance(self.target) <= self.threshold
    }

    fn is_flat(&self, seed: Color, color: Color) -> bool {
        color.distance(seed) <= self.flat_threshold
    }

    fn normalize_row(&self, row: &[SlotRect], avg_size: f64) -> Vec<SlotRect> {
        let size = avg_size.round() as usize;
        row.iter()
            .map(|slot| SlotRect {
                width: size,
                height: size,
                ..*slot
            })
            .collect()
    }
}
