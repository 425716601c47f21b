//! Median filtering for impulsive noise.

use common::Plane;

use crate::error::{Error, Result};
use crate::grid::PixelGrid;

/// Replaces every sample by the median of its `neighborhood x neighborhood`
/// window, per channel.
///
/// The window reaches `neighborhood / 2` pixels in each direction and is
/// truncated at the image border. For an even number of in-bounds samples the
/// upper median is used.
pub fn median_denoise(grid: &PixelGrid, neighborhood: usize) -> Result<PixelGrid> {
    if neighborhood == 0 {
        return Err(Error::invalid("neighborhood", "must be positive, got 0"));
    }

    let half = neighborhood / 2;
    let [red, green, blue] = grid.channels();
    let mut scratch = Vec::with_capacity((2 * half + 1) * (2 * half + 1));
    let denoised = PixelGrid::from_channels(
        median_plane(red, half, &mut scratch),
        median_plane(green, half, &mut scratch),
        median_plane(blue, half, &mut scratch),
    )?;

    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        neighborhood,
        "Median denoise"
    );
    Ok(denoised)
}

fn median_plane(plane: &Plane<u8>, half: usize, scratch: &mut Vec<u8>) -> Plane<u8> {
    let width = plane.width();
    let height = plane.height();
    Plane::from_fn(width, height, |x, y| {
        let x_range = x.saturating_sub(half)..(x + half + 1).min(width);
        let y_range = y.saturating_sub(half)..(y + half + 1).min(height);

        scratch.clear();
        for yy in y_range {
            scratch.extend_from_slice(&plane.row(yy)[x_range.clone()]);
        }
        let mid = scratch.len() / 2;
        *scratch.select_nth_unstable(mid).1
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_pattern;

    #[test]
    fn test_zero_neighborhood_is_invalid() {
        let grid = test_pattern(4, 4);
        assert!(matches!(
            median_denoise(&grid, 0),
            Err(Error::InvalidArgument {
                what: "neighborhood",
                ..
            })
        ));
    }

    #[test]
    fn test_single_sample_window_is_identity() {
        let grid = test_pattern(9, 7);
        assert_eq!(median_denoise(&grid, 1).unwrap(), grid);
    }

    #[test]
    fn test_removes_isolated_impulses() {
        let mut grid = PixelGrid::filled(9, 9, [100, 100, 100]).unwrap();
        grid.set_pixel(4, 4, [255, 255, 255]);
        grid.set_pixel(2, 6, [0, 0, 0]);
        let denoised = median_denoise(&grid, 3).unwrap();
        assert_eq!(denoised, PixelGrid::filled(9, 9, [100, 100, 100]).unwrap());
    }

    #[test]
    fn test_border_window_is_truncated() {
        // Corner window of a 3x3 neighborhood holds 4 samples: 1, 2, 4, 5.
        let red = Plane::from_fn(3, 3, |x, y| (1 + x + 3 * y) as u8);
        let zeros = Plane::new_filled(3, 3, 0u8);
        let grid = PixelGrid::from_channels(red, zeros.clone(), zeros).unwrap();
        let denoised = median_denoise(&grid, 3).unwrap();
        // Upper median of [1, 2, 4, 5].
        assert_eq!(denoised.pixel(0, 0)[0], 4);
        // Full window around the center holds 1..=9.
        assert_eq!(denoised.pixel(1, 1)[0], 5);
    }

    #[test]
    fn test_even_neighborhood_uses_the_next_odd_window() {
        let grid = test_pattern(8, 8);
        assert_eq!(
            median_denoise(&grid, 2).unwrap(),
            median_denoise(&grid, 3).unwrap()
        );
    }
}
