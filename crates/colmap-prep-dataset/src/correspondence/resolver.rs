use std::path::Path;

use super::{
    plan_renames, CorrespondenceError, ImageSet, MaskOutcome, RenamePlan, ResolveReport,
    ResolverConfig,
};

/// List the regular files of a directory, sorted by name.
///
/// The scan is not recursive. Names that are not valid UTF-8 are skipped.
pub fn list_file_names(dir: impl AsRef<Path>) -> Result<Vec<String>, CorrespondenceError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(CorrespondenceError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in walkdir::WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => log::debug!("Skipping non UTF-8 file name: {:?}", entry.path()),
        }
    }
    names.sort();

    Ok(names)
}

/// Apply the renames of a plan inside `mask_dir`.
///
/// Renames happen in plan order. A target that appeared on disk after the plan was
/// computed is not overwritten, the mask is reported as a conflict instead. A rename
/// that fails, e.g. because the mask was removed in the meantime, is logged and
/// listed in [`ResolveReport::failed`], the other masks are still renamed.
///
/// # Arguments
///
/// * `mask_dir` - The directory holding the masks.
/// * `plan` - The plan computed by [`super::plan_renames`].
/// * `config` - The resolver configuration.
pub fn apply_plan(
    mask_dir: impl AsRef<Path>,
    plan: &RenamePlan,
    config: &ResolverConfig,
) -> Result<ResolveReport, CorrespondenceError> {
    let mask_dir = mask_dir.as_ref();
    let mut report = plan.report();
    report.renamed.clear();

    for entry in &plan.entries {
        let MaskOutcome::Rename { target } = &entry.outcome else {
            continue;
        };

        let dst = mask_dir.join(target);
        if dst.exists() {
            log::warn!("Target {} appeared on disk, leaving {}", target, entry.file_name);
            report.conflicts.push(entry.file_name.clone());
            continue;
        }

        if let Err(e) = std::fs::rename(mask_dir.join(&entry.file_name), &dst) {
            log::warn!("Error renaming {} to {}: {}", entry.file_name, target, e);
            report.failed.push((entry.file_name.clone(), e.to_string()));
            continue;
        }
        report
            .renamed
            .push((entry.file_name.clone(), target.clone()));

        if config.progress_every > 0 && report.renamed.len() % config.progress_every == 0 {
            log::info!("Renamed {} masks...", report.renamed.len());
        }
    }

    log::info!(
        "Renamed {} masks, {} already matched",
        report.renamed.len(),
        report.already_matched.len()
    );
    if !report.failed.is_empty() {
        log::warn!("Failed to rename {} masks", report.failed.len());
    }

    Ok(report)
}

/// Snapshot both directories and plan the renames, without touching any file.
///
/// # Arguments
///
/// * `mask_dir` - The directory holding the masks.
/// * `image_dir` - The directory holding the images.
/// * `config` - The resolver configuration.
pub fn plan_mask_dir(
    mask_dir: impl AsRef<Path>,
    image_dir: impl AsRef<Path>,
    config: &ResolverConfig,
) -> Result<RenamePlan, CorrespondenceError> {
    let images = ImageSet::from_dir(image_dir)?;

    let mask_ext = config.mask_extension.as_str();
    let mask_names = list_file_names(mask_dir)?
        .into_iter()
        .filter(|name| {
            Path::new(name)
                .extension()
                .map(|ext| ext == mask_ext)
                .unwrap_or(false)
        })
        .collect::<Vec<_>>();

    log::info!(
        "Found {} masks and {} images",
        mask_names.len(),
        images.len()
    );

    Ok(plan_renames(&mask_names, &images, config))
}

/// Rename the masks of `mask_dir` after the images of `image_dir`.
///
/// Both directories are read once. The whole set of renames is computed and checked
/// for conflicts before the first file is moved.
///
/// # Arguments
///
/// * `mask_dir` - The directory holding the masks, modified in place.
/// * `image_dir` - The directory holding the images, read only.
/// * `config` - The resolver configuration.
///
/// # Returns
///
/// The report of the run. Unparseable, unmatched and conflicting masks are left
/// untouched and listed in the report.
pub fn resolve_mask_names(
    mask_dir: impl AsRef<Path>,
    image_dir: impl AsRef<Path>,
    config: &ResolverConfig,
) -> Result<ResolveReport, CorrespondenceError> {
    let mask_dir = mask_dir.as_ref();
    let plan = plan_mask_dir(mask_dir, image_dir, config)?;
    apply_plan(mask_dir, &plan, config)
}
