//! Single-image transform: decode, normalize to [0, 1], re-quantize and encode.

use image::codecs::jpeg::JpegEncoder;
use image::error::{ParameterError, ParameterErrorKind};
use image::io::Reader as ImageReader;
use image::{ColorType, DynamicImage, ImageBuffer, ImageError, Pixel};
use std::fs;
use std::path::Path;

use crate::error::{PreprocessError, Result};
use crate::types::PixelGrid;

const MAX_SAMPLE: f32 = 255.0;

/// Quality used when the output file is a JPEG
pub const JPEG_QUALITY: u8 = 95;

/// Load an image and scale its samples into [0, 1].
///
/// The decoder is picked from the file contents, falling back to the
/// extension when the contents are not recognized. The grid keeps the
/// height, width and channel count of the decoded file. 8-bit gray,
/// gray+alpha, RGB and RGBA images keep their channels; wider sample types
/// are converted to 8-bit RGB, or RGBA when they carry alpha.
pub fn preprocess_image(image_path: &Path) -> Result<PixelGrid> {
    let load_err = |source: ImageError| PreprocessError::ImageLoad {
        path: image_path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(image_path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| load_err(ImageError::IoError(e)))?
        .decode()
        .map_err(load_err)?;

    let (channels, width, height, raw) = into_raw_samples(img);
    let samples: Vec<f32> = raw.into_iter().map(normalize_sample).collect();

    PixelGrid::from_shape_vec((height as usize, width as usize, channels), samples)
        .map_err(|_| load_err(dimension_mismatch()))
}

/// Scale every sample back to the 8-bit domain, truncating toward zero.
///
/// Samples are returned in row-major (height, width, channel) order.
/// Out-of-range values saturate at 0 and 255.
pub fn quantize(grid: &PixelGrid) -> Vec<u8> {
    grid.iter().map(|&v| (v * MAX_SAMPLE) as u8).collect()
}

/// Re-quantize a grid and encode it to `path`, overwriting any existing file.
///
/// The output format follows the extension of `path`. JPEG files are written
/// with [`JPEG_QUALITY`].
pub fn save_pixel_grid(grid: &PixelGrid, path: &Path) -> Result<()> {
    let (height, width, channels) = grid.dim();
    let (width, height) = (width as u32, height as u32);
    let raw = quantize(grid);

    let color = match channels {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        _ => {
            return Err(PreprocessError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels,
            })
        }
    };

    if is_jpeg_path(path) {
        return write_jpeg(&raw, width, height, color, path);
    }

    let img = match color {
        ColorType::L8 => DynamicImage::ImageLuma8(image_buffer(width, height, raw, path)?),
        ColorType::La8 => DynamicImage::ImageLumaA8(image_buffer(width, height, raw, path)?),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(image_buffer(width, height, raw, path)?),
        _ => DynamicImage::ImageRgba8(image_buffer(width, height, raw, path)?),
    };

    img.save(path).map_err(|source| PreprocessError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

fn is_jpeg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}

// Encoded in memory first so a refused image leaves no partial file behind
fn write_jpeg(raw: &[u8], width: u32, height: u32, color: ColorType, path: &Path) -> Result<()> {
    let encode_err = |source: ImageError| PreprocessError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY)
        .encode(raw, width, height, color)
        .map_err(encode_err)?;
    fs::write(path, bytes).map_err(|e| encode_err(ImageError::IoError(e)))
}

fn normalize_sample(value: u8) -> f32 {
    value as f32 / MAX_SAMPLE
}

fn into_raw_samples(img: DynamicImage) -> (usize, u32, u32, Vec<u8>) {
    match img.color() {
        ColorType::L8 => {
            let buf = img.into_luma8();
            (1, buf.width(), buf.height(), buf.into_raw())
        }
        ColorType::La8 => {
            let buf = img.into_luma_alpha8();
            (2, buf.width(), buf.height(), buf.into_raw())
        }
        color if color.has_alpha() => {
            let buf = img.into_rgba8();
            (4, buf.width(), buf.height(), buf.into_raw())
        }
        _ => {
            let buf = img.into_rgb8();
            (3, buf.width(), buf.height(), buf.into_raw())
        }
    }
}

fn dimension_mismatch() -> ImageError {
    ImageError::Parameter(ParameterError::from_kind(
        ParameterErrorKind::DimensionMismatch,
    ))
}

fn image_buffer<P>(
    width: u32,
    height: u32,
    raw: Vec<u8>,
    path: &Path,
) -> Result<ImageBuffer<P, Vec<u8>>>
where
    P: Pixel<Subpixel = u8>,
{
    ImageBuffer::from_raw(width, height, raw).ok_or_else(|| PreprocessError::Encode {
        path: path.to_path_buf(),
        source: dimension_mismatch(),
    })
}
