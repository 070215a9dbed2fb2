//! Draws item icons into their slots on top of the GUI texture.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::{debug, warn};

use crate::gui_pipeline::common::error::{Result, SlotError};
use crate::gui_pipeline::compose::arrangement::Arrangement;
use crate::gui_pipeline::compose::icons::IconSource;
use crate::gui_pipeline::pixels::PixelBuffer;
use crate::gui_pipeline::slots::SlotRect;

fn into_rgba_image(buffer: PixelBuffer) -> Result<RgbaImage> {
    let (width, height) = (buffer.width(), buffer.height());
    RgbaImage::from_raw(width as u32, height as u32, buffer.into_raw())
        .ok_or(SlotError::InvalidDimensions(width, height))
}

/// Composites every placed item onto a copy of `background`.
///
/// Icons are scaled with nearest-neighbour filtering to the slot size and
/// alpha blended over the texture. Placements pointing past the end of
/// `slots` are skipped; an icon that fails to load aborts the export.
pub fn compose<I>(
    background: &PixelBuffer,
    slots: &[SlotRect],
    arrangement: &Arrangement,
    icons: &I,
) -> Result<PixelBuffer>
where
    I: IconSource + ?Sized,
{
    let mut canvas = into_rgba_image(background.clone())?;

    for (index, item) in arrangement.placements() {
        let Some(slot) = slots.get(index) else {
            warn!(slot = index, item = %item.id, "No detected slot for placement, skipping");
            continue;
        };

        let icon = into_rgba_image(icons.load_icon(&item.source)?)?;
        let scaled = imageops::resize(
            &icon,
            slot.width as u32,
            slot.height as u32,
            FilterType::Nearest,
        );
        imageops::overlay(&mut canvas, &scaled, slot.x as i64, slot.y as i64);

        debug!(slot = index, item = %item.id, x = slot.x, y = slot.y, "Placed icon");
    }

    let (width, height) = (canvas.width() as usize, canvas.height() as usize);
    PixelBuffer::new(width, height, canvas.into_raw())
}
