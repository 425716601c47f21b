//! 2D correlation of a channel with a kernel.
//!
//! Each output sample is
//!
//! ```text
//! out(x, y) = sum over (i, j) of in(x - i + c, y - j + c) * kernel(i, j),   c = k / 2
//! ```
//!
//! Source samples outside the image contribute nothing: the term is skipped,
//! not clamped or mirrored. Near the border the output therefore loses the
//! energy of the missing taps. Restoration relies on this exact policy, so it
//! must not be replaced with a reflecting border.

#[cfg(test)]
mod tests;

use crate::grid::PixelGrid;
use crate::kernel::Kernel;
use crate::Channel;

/// Correlates one working channel with `kernel`. The output has the input's size.
pub fn correlate(input: &Channel, kernel: &Kernel) -> Channel {
    let width = input.width();
    let height = input.height();
    let k = kernel.size();
    let c = kernel.center();
    let src = input.as_slice();
    let taps = kernel.values();

    let mut output = Channel::new_default(width, height);

    for y in 0..height {
        // Valid j satisfy 0 <= y - j + c < height.
        let j_start = (y + c + 1).saturating_sub(height);
        let j_end = (y + c + 1).min(k);

        let out_row = output.row_mut(y);
        for (x, out) in out_row.iter_mut().enumerate() {
            let i_start = (x + c + 1).saturating_sub(width);
            let i_end = (x + c + 1).min(k);

            let mut sum = 0.0;
            for i in i_start..i_end {
                let sx = x + c - i;
                let kernel_row = &taps[i * k..(i + 1) * k];
                for j in j_start..j_end {
                    let sy = y + c - j;
                    sum += src[sy * width + sx] * kernel_row[j];
                }
            }
            *out = sum;
        }
    }

    output
}

/// Correlates all three channels of `grid`, rounding and clamping the result
/// back to 8 bits.
pub fn correlate_grid(grid: &PixelGrid, kernel: &Kernel) -> PixelGrid {
    grid.map_working_channels(|channel| correlate(&channel, kernel))
}
