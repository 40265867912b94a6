#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Mask to image correspondence resolution.
///
/// Matches mask files to image files through the numeric identifier embedded in
/// the mask file name and renames the masks so both share the same name.
/// See [`correspondence::resolve_mask_names`].
pub mod correspondence;

/// Camera pose records and the campose text format.
///
/// Reads tabular position logs or structured pose documents and writes one
/// `<image_name> <x> <y> <z>` line per capture. See [`pose::export_campose`].
pub mod pose;
