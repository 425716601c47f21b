//! Tests for 2D correlation.

use super::*;
use crate::testing::{ramp_channel, test_pattern};

/// Direct transcription of the correlation sum with an explicit bounds test.
fn correlate_reference(input: &Channel, kernel: &Kernel) -> Channel {
    let k = kernel.size() as isize;
    let c = kernel.center() as isize;
    Channel::from_fn(input.width(), input.height(), |x, y| {
        let mut sum = 0.0;
        for i in 0..k {
            for j in 0..k {
                let sx = x as isize - i + c;
                let sy = y as isize - j + c;
                if let Some(&v) = input.get(sx, sy) {
                    sum += v * kernel.value(i as usize, j as usize);
                }
            }
        }
        sum
    })
}

fn assert_channels_close(a: &Channel, b: &Channel, tol: f64) {
    assert!(a.same_size(b));
    for (idx, (va, vb)) in a.iter().zip(b.iter()).enumerate() {
        assert!(
            (va - vb).abs() < tol,
            "sample {} differs: {} vs {}",
            idx,
            va,
            vb
        );
    }
}

// ============================================================================
// Identity behavior
// ============================================================================

#[test]
fn test_identity_1x1_is_exact_identity() {
    let input = ramp_channel(7, 5);
    let output = correlate(&input, &Kernel::identity(1).unwrap());
    assert_eq!(output, input);
}

#[test]
fn test_larger_identity_is_exact_identity() {
    let input = ramp_channel(9, 6);
    for size in [3, 4, 5] {
        let output = correlate(&input, &Kernel::identity(size).unwrap());
        assert_eq!(output, input, "identity({}) changed the channel", size);
    }
}

#[test]
fn test_identity_grid_is_pixel_exact() {
    let grid = test_pattern(16, 12);
    let output = correlate_grid(&grid, &Kernel::identity(5).unwrap());
    assert_eq!(output, grid);
}

// ============================================================================
// Sum semantics and border policy
// ============================================================================

#[test]
fn test_matches_reference_for_asymmetric_kernel() {
    let input = ramp_channel(11, 8);
    let kernel = Kernel::from_rows(vec![
        vec![0.1, 0.2, 0.0],
        vec![0.0, 0.3, 0.05],
        vec![0.15, 0.0, 0.2],
    ])
    .unwrap();
    let output = correlate(&input, &kernel);
    assert_channels_close(&output, &correlate_reference(&input, &kernel), 1e-12);
}

#[test]
fn test_matches_reference_for_even_kernel() {
    let input = ramp_channel(6, 9);
    let kernel = Kernel::gaussian(4, 1.2).unwrap();
    let output = correlate(&input, &kernel);
    assert_channels_close(&output, &correlate_reference(&input, &kernel), 1e-12);
}

#[test]
fn test_kernel_larger_than_image() {
    let input = ramp_channel(3, 2);
    let kernel = Kernel::box_blur(7).unwrap();
    let output = correlate(&input, &kernel);
    assert_channels_close(&output, &correlate_reference(&input, &kernel), 1e-12);
}

#[test]
fn test_shift_direction() {
    // A single tap at (i, j) = (0, 1) reads in(x + 1, y) for a 3x3 kernel.
    let input = ramp_channel(5, 4);
    let kernel = Kernel::from_rows(vec![
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0],
    ])
    .unwrap();
    let output = correlate(&input, &kernel);
    for y in 0..4 {
        for x in 0..5 {
            let expected = if x + 1 < 5 { input[(x + 1, y)] } else { 0.0 };
            assert_eq!(output[(x, y)], expected);
        }
    }
}

#[test]
fn test_border_taps_are_skipped_not_clamped() {
    let input = Channel::new_filled(8, 8, 90.0);
    let output = correlate(&input, &Kernel::box_blur(3).unwrap());

    // Interior keeps the uniform value.
    assert!((output[(4, 4)] - 90.0).abs() < 1e-12);
    // Edge pixels see 6 of 9 taps, corners 4 of 9.
    assert!((output[(0, 4)] - 60.0).abs() < 1e-12);
    assert!((output[(4, 7)] - 60.0).abs() < 1e-12);
    assert!((output[(0, 0)] - 40.0).abs() < 1e-12);
    assert!((output[(7, 7)] - 40.0).abs() < 1e-12);
}

#[test]
fn test_uniform_interior_preserved_by_normalized_kernel() {
    let input = Channel::new_filled(20, 20, 128.0);
    let output = correlate(&input, &Kernel::gaussian(5, 1.0).unwrap());
    for y in 2..18 {
        for x in 2..18 {
            assert!((output[(x, y)] - 128.0).abs() < 1e-9);
        }
    }
}

#[test]
fn test_flipped_kernel_is_the_adjoint() {
    // <K a, b> == <a, K_flipped b> under the zero-border policy.
    let a = ramp_channel(9, 7);
    let b = Channel::from_fn(9, 7, |x, y| ((x * 3 + y * 5) % 7) as f64);
    let kernel = Kernel::motion(5, 30.0).unwrap();

    let ka = correlate(&a, &kernel);
    let kb = correlate(&b, &kernel.flipped());
    let lhs: f64 = ka.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let rhs: f64 = a.iter().zip(kb.iter()).map(|(x, y)| x * y).sum();
    assert!((lhs - rhs).abs() < 1e-9, "{} vs {}", lhs, rhs);
}

#[test]
fn test_correlate_grid_quantizes() {
    let grid = PixelGrid::filled(4, 4, [255, 100, 1]).unwrap();
    let output = correlate_grid(&grid, &Kernel::box_blur(3).unwrap());
    // Corner: 4/9 of each value, rounded.
    assert_eq!(output.pixel(0, 0), [113, 44, 0]);
    // Interior of a 4x4 sees the full window.
    assert_eq!(output.pixel(1, 1), [255, 100, 1]);
}
