#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image transforms.
pub mod error;

/// PNG encoding of decoded images.
pub mod png;

/// Single file transforms: JPEG to PNG, mask grayscale recode and inversion.
///
/// Every transform reads one file and writes its result next to it or in place.
pub mod transform;

/// Bounded parallel batch driver.
///
/// Runs a per-file transform on a fixed size thread pool and collects the failures
/// instead of aborting. See [`parallel::run_batch`].
pub mod parallel;

/// Directory level batch jobs built on [`parallel::run_batch`].
pub mod jobs;

pub use error::ImgprocError;
pub use jobs::{convert_images_to_png, convert_masks_to_grayscale, invert_masks};
pub use parallel::{BatchConfig, BatchReport};
