//! Dataset preparation for COLMAP-style reconstruction pipelines.
//!
//! - [`dataset`]: mask to image correspondence and campose export.
//! - [`imgproc`]: per-file image and mask transforms.

#[doc(inline)]
pub use colmap_prep_dataset as dataset;

#[doc(inline)]
pub use colmap_prep_imgproc as imgproc;
