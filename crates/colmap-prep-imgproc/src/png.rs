use std::{fs::File, io::BufWriter, path::Path};

use image::{GrayImage, RgbImage};
use png::{BitDepth, ColorType, Encoder};

use crate::error::ImgprocError;

/// Writes the given PNG _(grayscale 8-bit)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The grayscale image.
pub fn write_image_png_gray8(
    file_path: impl AsRef<Path>,
    image: &GrayImage,
) -> Result<(), ImgprocError> {
    write_png_impl(
        file_path,
        image.as_raw(),
        image.dimensions(),
        ColorType::Grayscale,
    )
}

/// Writes the given PNG _(rgb8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The RGB image.
pub fn write_image_png_rgb8(
    file_path: impl AsRef<Path>,
    image: &RgbImage,
) -> Result<(), ImgprocError> {
    write_png_impl(file_path, image.as_raw(), image.dimensions(), ColorType::Rgb)
}

fn write_png_impl(
    file_path: impl AsRef<Path>,
    image_data: &[u8],
    (width, height): (u32, u32),
    color_type: ColorType,
) -> Result<(), ImgprocError> {
    let file = File::create(file_path)?;

    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| ImgprocError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| ImgprocError::PngEncodingError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| ImgprocError::PngEncodingError(e.to_string()))?;
    Ok(())
}
