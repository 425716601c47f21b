//! Synthetic images shared by unit tests.

use crate::grid::PixelGrid;
use crate::Channel;

/// Channel whose samples encode their position, so every shift is visible.
pub(crate) fn ramp_channel(width: usize, height: usize) -> Channel {
    Channel::from_fn(width, height, |x, y| (x + 100 * y) as f64)
}

/// RGB pattern with different structure in each channel.
pub(crate) fn test_pattern(width: usize, height: usize) -> PixelGrid {
    PixelGrid::from_fn(width, height, |x, y| {
        [
            (x * 255 / (width - 1).max(1)) as u8,
            (y * 255 / (height - 1).max(1)) as u8,
            if (x / 4 + y / 4) % 2 == 0 { 220 } else { 30 },
        ]
    })
    .unwrap()
}

/// Black image with a white square covering `[lo, hi)` on both axes.
pub(crate) fn white_square(size: usize, lo: usize, hi: usize) -> PixelGrid {
    PixelGrid::from_fn(size, size, |x, y| {
        if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
            [255, 255, 255]
        } else {
            [0, 0, 0]
        }
    })
    .unwrap()
}
