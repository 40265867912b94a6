use std::path::Path;

use crate::error::ImgprocError;
use crate::parallel::{list_files, run_batch, BatchConfig, BatchReport};
use crate::transform::{convert_image_to_png, convert_mask_to_gray, invert_mask};

/// Convert every JPEG of `image_dir` to PNG, deleting the JPEGs that were converted.
pub fn convert_images_to_png(
    image_dir: impl AsRef<Path>,
    config: &BatchConfig,
) -> Result<BatchReport, ImgprocError> {
    let paths = list_files(image_dir, &["jpg", "jpeg"])?;
    log::info!("Found {} JPEG files to convert", paths.len());

    let report = run_batch(&paths, config, |path| convert_image_to_png(path).map(|_| ()))?;

    log::info!(
        "Successfully converted {} images from JPEG to PNG",
        report.succeeded.len()
    );
    Ok(report)
}

/// Recode every PNG mask of `mask_dir` to 8-bit grayscale.
pub fn convert_masks_to_grayscale(
    mask_dir: impl AsRef<Path>,
    config: &BatchConfig,
) -> Result<BatchReport, ImgprocError> {
    let paths = list_files(mask_dir, &["png"])?;
    log::info!("Found {} mask files to convert", paths.len());

    let report = run_batch(&paths, config, |path| convert_mask_to_gray(path))?;

    log::info!(
        "Successfully converted {} masks to grayscale",
        report.succeeded.len()
    );
    Ok(report)
}

/// Invert every PNG mask of `mask_dir`.
pub fn invert_masks(
    mask_dir: impl AsRef<Path>,
    config: &BatchConfig,
) -> Result<BatchReport, ImgprocError> {
    let paths = list_files(mask_dir, &["png"])?;
    log::info!("Found {} mask files to invert", paths.len());

    let report = run_batch(&paths, config, |path| invert_mask(path))?;

    log::info!("Successfully inverted {} masks", report.succeeded.len());
    Ok(report)
}
