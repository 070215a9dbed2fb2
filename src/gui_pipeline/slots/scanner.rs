//! Candidate scanning
//!
//! Walks a coarse grid over the image. Every grid position holding slot
//! colour seeds a square that grows one pixel at a time until it stops
//! being flat; the largest flat size that also touches a non-slot pixel
//! becomes a candidate.

use tracing::trace;

use crate::gui_pipeline::common::error::{Result, SlotError};
use crate::gui_pipeline::pixels::PixelBuffer;
use crate::gui_pipeline::slots::strategy::SlotStrategy;
use crate::gui_pipeline::slots::types::SlotRect;

/// Grid parameters of one scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanParams {
    pub min_slot_size: usize,
    pub step: usize,
    pub dedup_margin: usize,
}

/// Whether every pixel of the `size` square at `(x, y)` is flat relative to its top-left pixel.
pub fn is_uniform<S: SlotStrategy>(
    image: &PixelBuffer,
    strategy: &S,
    x: usize,
    y: usize,
    size: usize,
) -> bool {
    let Some(seed) = image.get(x, y) else {
        return false;
    };

    if x + size > image.width() || y + size > image.height() {
        return false;
    }

    (y..y + size).all(|py| (x..x + size).all(|px| strategy.is_flat(seed, image.color_at(px, py))))
}

/// Checks the pixels added when a flat square of side `size - 1` grows to `size`:
/// the new right column and the new bottom row.
fn grown_edge_is_flat<S: SlotStrategy>(
    image: &PixelBuffer,
    strategy: &S,
    x: usize,
    y: usize,
    size: usize,
) -> bool {
    let seed = image.color_at(x, y);
    let (right, bottom) = (x + size - 1, y + size - 1);

    (y..=bottom).all(|py| strategy.is_flat(seed, image.color_at(right, py)))
        && (x..right).all(|px| strategy.is_flat(seed, image.color_at(px, bottom)))
}

/// Whether any in-bounds pixel just outside the square is not slot colour.
fn has_border<S: SlotStrategy>(
    image: &PixelBuffer,
    strategy: &S,
    x: usize,
    y: usize,
    size: usize,
) -> bool {
    let off_target = |px: usize, py: usize| !strategy.is_target(image.color_at(px, py));

    (y > 0 && off_target(x, y - 1))
        || (y + size < image.height() && off_target(x, y + size))
        || (x > 0 && off_target(x - 1, y))
        || (x + size < image.width() && off_target(x + size, y))
}

/// Grows a square seeded at `(x, y)` and returns the largest bordered flat one.
pub fn grow_square<S: SlotStrategy>(
    image: &PixelBuffer,
    strategy: &S,
    x: usize,
    y: usize,
    min_slot_size: usize,
) -> Option<SlotRect> {
    if !image.contains(x, y) || !strategy.is_target(image.color_at(x, y)) {
        return None;
    }

    let max_size = (image.width() - x).min(image.height() - y);
    let mut size = min_slot_size;

    if size > max_size || !is_uniform(image, strategy, x, y, size) {
        return None;
    }

    let mut accepted = None;
    loop {
        if has_border(image, strategy, x, y, size) {
            accepted = Some(size);
        }

        size += 1;
        if size > max_size || !grown_edge_is_flat(image, strategy, x, y, size) {
            break;
        }
    }

    accepted.map(|size| SlotRect::square(x, y, size))
}

/// Collects candidate squares in scan order (top to bottom, left to right).
///
/// `should_stop` is polled before every grid position; returning `true`
/// abandons the scan with [`SlotError::Cancelled`].
pub fn scan_candidates<S, F>(
    image: &PixelBuffer,
    strategy: &S,
    params: &ScanParams,
    mut should_stop: F,
) -> Result<Vec<SlotRect>>
where
    S: SlotStrategy,
    F: FnMut() -> bool,
{
    let mut candidates: Vec<SlotRect> = Vec::new();
    let y_end = image.height().saturating_sub(params.min_slot_size);
    let x_end = image.width().saturating_sub(params.min_slot_size);

    for y in (0..y_end).step_by(params.step) {
        for x in (0..x_end).step_by(params.step) {
            if should_stop() {
                return Err(SlotError::Cancelled);
            }

            if candidates.iter().any(|c| c.near(x, y, params.dedup_margin)) {
                continue;
            }

            if let Some(slot) = grow_square(image, strategy, x, y, params.min_slot_size) {
                trace!(x = slot.x, y = slot.y, size = slot.width, "candidate");
                candidates.push(slot);
            }
        }
    }

    Ok(candidates)
}
