//! Finite-difference gradients of a single channel.
//!
//! Interior samples use the central difference `(f[n + 1] - f[n - 1]) / 2`.
//! The first sample along an axis uses the forward difference `f[1] - f[0]`
//! and the last one the backward difference `f[n] - f[n - 1]`. An axis of
//! length 1 has no neighbors and yields zeros.

use crate::Channel;

/// Derivative along x.
pub fn grad_x(channel: &Channel) -> Channel {
    let width = channel.width();
    let mut out = Channel::new_default(width, channel.height());
    if width < 2 {
        return out;
    }

    for y in 0..channel.height() {
        let src = channel.row(y);
        let dst = out.row_mut(y);
        dst[0] = src[1] - src[0];
        for x in 1..width - 1 {
            dst[x] = (src[x + 1] - src[x - 1]) * 0.5;
        }
        dst[width - 1] = src[width - 1] - src[width - 2];
    }
    out
}

/// Derivative along y.
pub fn grad_y(channel: &Channel) -> Channel {
    let height = channel.height();
    let mut out = Channel::new_default(channel.width(), height);
    if height < 2 {
        return out;
    }

    for y in 0..height {
        let (prev, next, scale) = if y == 0 {
            (0, 1, 1.0)
        } else if y == height - 1 {
            (height - 2, height - 1, 1.0)
        } else {
            (y - 1, y + 1, 0.5)
        };
        let dst = out.row_mut(y);
        for ((d, &a), &b) in dst
            .iter_mut()
            .zip(channel.row(prev))
            .zip(channel.row(next))
        {
            *d = (b - a) * scale;
        }
    }
    out
}
