use deblur::PixelGrid;

/// Black `size x size` image with a white square spanning `[lo, hi)` on both axes.
pub fn white_square(size: usize, lo: usize, hi: usize) -> PixelGrid {
    PixelGrid::from_fn(size, size, |x, y| {
        if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
            [255, 255, 255]
        } else {
            [0, 0, 0]
        }
    })
    .unwrap()
}

/// Uniform gray image.
pub fn uniform_gray(width: usize, height: usize, value: u8) -> PixelGrid {
    PixelGrid::filled(width, height, [value; 3]).unwrap()
}
