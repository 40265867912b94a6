use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, RgbImage};

use crate::error::ImgprocError;
use crate::png::{write_image_png_gray8, write_image_png_rgb8};

/// Define the RGB weights for the grayscale conversion, in 1/65536 units.
const RW: u32 = 19595;
const GW: u32 = 38470;
const BW: u32 = 7471;

/// Convert an RGB8 image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// computed in 16-bit fixed point and rounded to nearest.
pub fn gray_from_rgb_u8(src: &RgbImage) -> GrayImage {
    GrayImage::from_fn(src.width(), src.height(), |x, y| {
        let [r, g, b] = src.get_pixel(x, y).0;
        let v = (r as u32 * RW + g as u32 * GW + b as u32 * BW + 0x8000) >> 16;
        image::Luma([v as u8])
    })
}

fn open_image(file_path: &Path) -> Result<DynamicImage, ImgprocError> {
    if !file_path.exists() {
        return Err(ImgprocError::FileDoesNotExist(file_path.to_path_buf()));
    }
    Ok(image::open(file_path)?)
}

fn has_extension(file_path: &Path, extensions: &[&str]) -> bool {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Convert a JPEG image to PNG and delete the JPEG.
///
/// The PNG is written next to the JPEG with the same stem. The JPEG is removed only
/// once the PNG is fully written.
///
/// # Arguments
///
/// * `file_path` - The path to a `.jpg` or `.jpeg` file.
///
/// # Returns
///
/// The path of the PNG file.
pub fn convert_image_to_png(file_path: impl AsRef<Path>) -> Result<PathBuf, ImgprocError> {
    let file_path = file_path.as_ref();
    if !has_extension(file_path, &["jpg", "jpeg"]) {
        return Err(ImgprocError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let png_path = file_path.with_extension("png");
    match open_image(file_path)? {
        DynamicImage::ImageLuma8(gray) => write_image_png_gray8(&png_path, &gray)?,
        other => write_image_png_rgb8(&png_path, &other.to_rgb8())?,
    }

    std::fs::remove_file(file_path)?;

    Ok(png_path)
}

/// Recode a mask to 8-bit grayscale, in place.
///
/// Grayscale masks keep their values, alpha is dropped, color masks go through
/// [`gray_from_rgb_u8`].
pub fn convert_mask_to_gray(file_path: impl AsRef<Path>) -> Result<(), ImgprocError> {
    let file_path = file_path.as_ref();
    let gray = match open_image(file_path)? {
        DynamicImage::ImageLuma8(gray) => gray,
        image @ DynamicImage::ImageLumaA8(_) => image.to_luma8(),
        other => gray_from_rgb_u8(&other.to_rgb8()),
    };
    write_image_png_gray8(file_path, &gray)
}

/// Invert a mask, in place.
///
/// An 8-bit grayscale mask stays grayscale. Any other mask is converted to RGB8
/// before inverting, alpha is dropped.
pub fn invert_mask(file_path: impl AsRef<Path>) -> Result<(), ImgprocError> {
    let file_path = file_path.as_ref();
    match open_image(file_path)? {
        DynamicImage::ImageLuma8(mut gray) => {
            gray.pixels_mut().for_each(|p| p.0[0] = 255 - p.0[0]);
            write_image_png_gray8(file_path, &gray)
        }
        other => {
            let mut rgb = other.to_rgb8();
            rgb.pixels_mut()
                .for_each(|p| p.0.iter_mut().for_each(|c| *c = 255 - *c));
            write_image_png_rgb8(file_path, &rgb)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, Rgba, RgbaImage};

    #[test]
    fn gray_weights() {
        let src = RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb([255, 0, 0]),
            1 => Rgb([255, 255, 255]),
            _ => Rgb([0, 0, 0]),
        });
        let gray = gray_from_rgb_u8(&src);
        assert_eq!(gray.as_raw(), &vec![76, 255, 0]);
    }

    #[test]
    fn convert_jpeg() -> Result<(), ImgprocError> {
        let tmp_dir = tempfile::tempdir()?;
        let jpg_path = tmp_dir.path().join("0.jpg");
        RgbImage::from_pixel(8, 6, Rgb([200, 100, 50])).save(&jpg_path)?;

        let png_path = convert_image_to_png(&jpg_path)?;
        assert_eq!(png_path, tmp_dir.path().join("0.png"));
        assert!(!jpg_path.exists());

        let image = image::open(&png_path)?;
        assert_eq!((image.width(), image.height()), (8, 6));
        Ok(())
    }

    #[test]
    fn convert_rejects_png() -> Result<(), ImgprocError> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("0.png");
        let res = convert_image_to_png(&path);
        assert!(matches!(res, Err(ImgprocError::InvalidFileExtension(_))));
        Ok(())
    }

    #[test]
    fn gray_mask_from_rgba() -> Result<(), ImgprocError> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("mask.png");
        RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgba([255, 255, 255, 0])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
        .save(&path)?;

        convert_mask_to_gray(&path)?;

        let image = image::open(&path)?;
        let DynamicImage::ImageLuma8(gray) = image else {
            panic!("expected a grayscale mask");
        };
        assert_eq!(gray.as_raw(), &vec![255, 0]);
        Ok(())
    }

    #[test]
    fn invert_keeps_mode() -> Result<(), ImgprocError> {
        let tmp_dir = tempfile::tempdir()?;

        let gray_path = tmp_dir.path().join("gray.png");
        GrayImage::from_fn(2, 1, |x, _| Luma([if x == 0 { 0 } else { 200 }])).save(&gray_path)?;
        invert_mask(&gray_path)?;
        let DynamicImage::ImageLuma8(gray) = image::open(&gray_path)? else {
            panic!("expected a grayscale mask");
        };
        assert_eq!(gray.as_raw(), &vec![255, 55]);

        let rgb_path = tmp_dir.path().join("rgb.png");
        RgbImage::from_pixel(1, 1, Rgb([0, 10, 255])).save(&rgb_path)?;
        invert_mask(&rgb_path)?;
        let DynamicImage::ImageRgb8(rgb) = image::open(&rgb_path)? else {
            panic!("expected an rgb mask");
        };
        assert_eq!(rgb.as_raw(), &vec![255, 245, 0]);
        Ok(())
    }
}
