//! Image comparison helpers.

use crate::error::Result;
use crate::grid::PixelGrid;

/// Per-channel absolute difference `|a - b|`.
pub fn compute_difference(a: &PixelGrid, b: &PixelGrid) -> Result<PixelGrid> {
    a.check_same_dimensions(b)?;
    PixelGrid::from_fn(a.width(), a.height(), |x, y| {
        let pa = a.pixel(x, y);
        let pb = b.pixel(x, y);
        [0, 1, 2].map(|c| pa[c].abs_diff(pb[c]))
    })
}

/// Replaces every channel by the truncated integer mean `(r + g + b) / 3`.
pub fn to_grayscale(grid: &PixelGrid) -> PixelGrid {
    let mut gray = grid.clone();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let [r, g, b] = grid.pixel(x, y);
            let mean = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
            gray.set_pixel(x, y, [mean; 3]);
        }
    }
    gray
}

/// Mean squared error over all samples of all three channels.
pub fn mean_squared_error(a: &PixelGrid, b: &PixelGrid) -> Result<f64> {
    a.check_same_dimensions(b)?;
    let mut sum = 0.0;
    let mut count = 0usize;
    for (pa, pb) in a.channels().iter().zip(b.channels()) {
        for (&va, &vb) in pa.iter().zip(pb.iter()) {
            let d = f64::from(va) - f64::from(vb);
            sum += d * d;
            count += 1;
        }
    }
    Ok(sum / count as f64)
}

/// Peak signal-to-noise ratio in dB against a peak of 255. Identical images
/// give `f64::INFINITY`.
pub fn psnr(a: &PixelGrid, b: &PixelGrid) -> Result<f64> {
    let mse = mean_squared_error(a, b)?;
    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (255.0 * 255.0 / mse).log10())
}
