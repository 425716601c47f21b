//! File codec boundary. The engine itself never touches files.

use std::path::{Path, PathBuf};

use image as image_lib;

use crate::grid::PixelGrid;

#[derive(Debug, thiserror::Error)]
pub enum ImageIoError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode '{path}': {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("Failed to encode '{path}': {reason}")]
    Encode { path: PathBuf, reason: String },
    #[error("Unsupported image file extension: {0}")]
    UnsupportedExtension(PathBuf),
}

/// Loads and saves 8-bit RGB images.
pub trait ImageCodec {
    fn load(&self, path: &Path) -> Result<PixelGrid, ImageIoError>;
    fn save(&self, grid: &PixelGrid, path: &Path) -> Result<(), ImageIoError>;
}

/// Codec backed by the `image` crate. Any alpha channel is dropped on load;
/// the output format follows the file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct RgbCodec;

impl ImageCodec for RgbCodec {
    fn load(&self, path: &Path) -> Result<PixelGrid, ImageIoError> {
        let rgb = image_lib::open(path)
            .map_err(|err| from_image_error(path, err, false))?
            .to_rgb8();
        let (width, height) = rgb.dimensions();
        let grid = PixelGrid::from_interleaved(width as usize, height as usize, rgb.as_raw())
            .map_err(|err| ImageIoError::Decode {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        tracing::debug!(path = %path.display(), width, height, "Loaded image");
        Ok(grid)
    }

    fn save(&self, grid: &PixelGrid, path: &Path) -> Result<(), ImageIoError> {
        let format = output_format(path)?;
        let encode_error = |reason: String| ImageIoError::Encode {
            path: path.to_path_buf(),
            reason,
        };
        let width = u32::try_from(grid.width()).map_err(|e| encode_error(e.to_string()))?;
        let height = u32::try_from(grid.height()).map_err(|e| encode_error(e.to_string()))?;

        image_lib::save_buffer_with_format(
            path,
            &grid.to_interleaved(),
            width,
            height,
            image_lib::ColorType::Rgb8,
            format,
        )
        .map_err(|err| from_image_error(path, err, true))?;

        tracing::debug!(path = %path.display(), width, height, "Saved image");
        Ok(())
    }
}

fn output_format(path: &Path) -> Result<image_lib::ImageFormat, ImageIoError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| ImageIoError::UnsupportedExtension(path.to_path_buf()))?;

    match ext.as_str() {
        "bmp" => Ok(image_lib::ImageFormat::Bmp),
        "png" => Ok(image_lib::ImageFormat::Png),
        "tif" | "tiff" => Ok(image_lib::ImageFormat::Tiff),
        "jpg" | "jpeg" => Ok(image_lib::ImageFormat::Jpeg),
        _ => Err(ImageIoError::UnsupportedExtension(path.to_path_buf())),
    }
}

fn from_image_error(path: &Path, err: image_lib::ImageError, encoding: bool) -> ImageIoError {
    let path = path.to_path_buf();
    match err {
        image_lib::ImageError::IoError(source) => ImageIoError::Io { path, source },
        other if encoding => ImageIoError::Encode {
            path,
            reason: other.to_string(),
        },
        other => ImageIoError::Decode {
            path,
            reason: other.to_string(),
        },
    }
}
