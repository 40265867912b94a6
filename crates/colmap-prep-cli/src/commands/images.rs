use std::path::PathBuf;

use argh::FromArgs;
use colmap_prep::imgproc::{self, BatchConfig};

#[derive(FromArgs)]
/// Convert JPEG images to PNG format for COLMAP mask matching.
#[argh(subcommand, name = "convert-images")]
pub struct ConvertImagesArgs {
    /// directory containing image files
    #[argh(option, default = "PathBuf::from(\"images\")")]
    image_dir: PathBuf,

    /// number of threads to use
    #[argh(option, short = 'n', default = "8")]
    num_threads: usize,
}

impl ConvertImagesArgs {
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let config = batch_config(self.num_threads);
        imgproc::convert_images_to_png(&self.image_dir, &config)?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Convert RGB mask images to grayscale format for COLMAP.
#[argh(subcommand, name = "convert-masks")]
pub struct ConvertMasksArgs {
    /// directory containing mask images
    #[argh(option, default = "PathBuf::from(\"masks\")")]
    mask_dir: PathBuf,

    /// number of threads to use
    #[argh(option, short = 'n', default = "8")]
    num_threads: usize,
}

impl ConvertMasksArgs {
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let config = batch_config(self.num_threads);
        imgproc::convert_masks_to_grayscale(&self.mask_dir, &config)?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Invert mask images for COLMAP.
#[argh(subcommand, name = "invert-masks")]
pub struct InvertMasksArgs {
    /// directory containing mask images
    #[argh(option, default = "PathBuf::from(\"masks\")")]
    mask_dir: PathBuf,

    /// number of threads to use
    #[argh(option, short = 'n', default = "8")]
    num_threads: usize,
}

impl InvertMasksArgs {
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let config = batch_config(self.num_threads);
        imgproc::invert_masks(&self.mask_dir, &config)?;
        Ok(())
    }
}

fn batch_config(num_threads: usize) -> BatchConfig {
    BatchConfig {
        num_threads,
        ..Default::default()
    }
}
