//! Channel-separated 8-bit RGB image, the data currency between stages.

use common::Plane;

use crate::error::{Dimensions, Error, Result};
use crate::Channel;

/// Number of color channels in a [`PixelGrid`].
pub const CHANNELS: usize = 3;

/// One pixel as `[red, green, blue]`.
pub type Rgb = [u8; CHANNELS];

/// An RGB image stored as three equally sized 8-bit planes.
///
/// Processing stages work on `f64` copies of the planes (see
/// [`PixelGrid::channel_f64`]) and come back through
/// [`PixelGrid::from_working_channels`], which clamps to `[0, 255]` and rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    channels: [Plane<u8>; CHANNELS],
}

impl PixelGrid {
    /// Creates a black image.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, [0, 0, 0])
    }

    pub fn filled(width: usize, height: usize, rgb: Rgb) -> Result<Self> {
        check_size(width, height)?;
        Ok(Self {
            channels: rgb.map(|v| Plane::new_filled(width, height, v)),
        })
    }

    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Rgb,
    ) -> Result<Self> {
        let mut grid = Self::filled(width, height, [0, 0, 0])?;
        for y in 0..height {
            for x in 0..width {
                grid.set_pixel(x, y, f(x, y));
            }
        }
        Ok(grid)
    }

    pub fn from_channels(red: Plane<u8>, green: Plane<u8>, blue: Plane<u8>) -> Result<Self> {
        check_size(red.width(), red.height())?;
        for other in [&green, &blue] {
            check_same_size(&red, other)?;
        }
        Ok(Self {
            channels: [red, green, blue],
        })
    }

    /// Reassembles working buffers into an image, clamping every value to
    /// `[0, 255]` and rounding to the nearest integer.
    pub fn from_working_channels(channels: [Channel; CHANNELS]) -> Result<Self> {
        let [red, green, blue] = channels;
        Self::from_channels(quantize(&red), quantize(&green), quantize(&blue))
    }

    /// Decodes row-major interleaved `RGBRGB...` bytes.
    pub fn from_interleaved(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        check_size(width, height)?;
        if bytes.len() != width * height * CHANNELS {
            return Err(Error::invalid(
                "bytes",
                format!(
                    "expected {} bytes for {}x{} RGB, got {}",
                    width * height * CHANNELS,
                    width,
                    height,
                    bytes.len()
                ),
            ));
        }
        let channels = [0, 1, 2].map(|c| {
            Plane::new(
                width,
                height,
                bytes.iter().skip(c).step_by(CHANNELS).copied().collect(),
            )
        });
        Ok(Self { channels })
    }

    /// Encodes the image as row-major interleaved `RGBRGB...` bytes.
    pub fn to_interleaved(&self) -> Vec<u8> {
        let [red, green, blue] = &self.channels;
        red.iter()
            .zip(green.iter())
            .zip(blue.iter())
            .flat_map(|((&r, &g), &b)| [r, g, b])
            .collect()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.channels[0].width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.channels[0].height()
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        [0, 1, 2].map(|c| self.channels[c][(x, y)])
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: Rgb) {
        for (plane, value) in self.channels.iter_mut().zip(rgb) {
            plane[(x, y)] = value;
        }
    }

    #[inline]
    pub fn channel(&self, index: usize) -> &Plane<u8> {
        &self.channels[index]
    }

    #[inline]
    pub fn channels(&self) -> &[Plane<u8>; CHANNELS] {
        &self.channels
    }

    /// Copies one channel into a floating-point working buffer.
    pub fn channel_f64(&self, index: usize) -> Channel {
        self.channels[index].map(|&v| f64::from(v))
    }

    /// All three channels as working buffers, in R, G, B order.
    pub fn working_channels(&self) -> [Channel; CHANNELS] {
        [0, 1, 2].map(|c| self.channel_f64(c))
    }

    /// Applies a size-preserving transform to each working channel and
    /// quantizes the result.
    pub(crate) fn map_working_channels(&self, mut f: impl FnMut(Channel) -> Channel) -> Self {
        let channels = self.working_channels().map(|channel| {
            let out = f(channel);
            assert!(
                out.width() == self.width() && out.height() == self.height(),
                "channel transform must preserve dimensions"
            );
            quantize(&out)
        });
        Self { channels }
    }

    pub(crate) fn check_same_dimensions(&self, other: &PixelGrid) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }
}

/// Clamps to `[0, 255]` and rounds. Non-finite values map to 0.
#[inline]
pub(crate) fn quantize_value(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round() as u8
}

fn quantize(channel: &Channel) -> Plane<u8> {
    channel.map(|&v| quantize_value(v))
}

fn check_size(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid(
            "dimensions",
            format!("width and height must be at least 1, got {}x{}", width, height),
        ));
    }
    Ok(())
}

fn check_same_size<T, U>(expected: &Plane<T>, actual: &Plane<U>) -> Result<()> {
    if !expected.same_size(actual) {
        return Err(Error::DimensionMismatch {
            expected: Dimensions::new(expected.width(), expected.height()),
            actual: Dimensions::new(actual.width(), actual.height()),
        });
    }
    Ok(())
}
