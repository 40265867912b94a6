use std::{fs, path::Path};

use colmap_prep_dataset::correspondence::{
    plan_mask_dir, resolve_mask_names, CorrespondenceError, IdentifierStyle, ResolverConfig,
};

fn touch(dir: &Path, names: &[&str]) -> std::io::Result<()> {
    for name in names {
        fs::write(dir.join(name), name.as_bytes())?;
    }
    Ok(())
}

fn listing(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<Vec<_>, _>>()?;
    names.sort();
    Ok(names)
}

#[test]
fn resolve_then_resolve_again() -> Result<(), CorrespondenceError> {
    let image_dir = tempfile::tempdir()?;
    let mask_dir = tempfile::tempdir()?;

    touch(image_dir.path(), &["0.png", "1.png", "2.png", "10.png"])?;
    touch(
        mask_dir.path(),
        &["0.png", "0001_mask.png", "2_mask.png", "0010.png", "99.png", "notes.png"],
    )?;

    let config = ResolverConfig::default();
    let report = resolve_mask_names(mask_dir.path(), image_dir.path(), &config)?;

    assert_eq!(report.already_matched, vec!["0.png".to_string()]);
    assert_eq!(report.renamed.len(), 3);
    assert_eq!(report.unmatched, vec!["99.png".to_string()]);
    assert_eq!(report.unparseable, vec!["notes.png".to_string()]);
    assert!(report.conflicts.is_empty());

    assert_eq!(
        listing(mask_dir.path())?,
        vec!["0.png", "1.png", "10.png", "2.png", "99.png", "notes.png"]
    );
    // the content moved with the name
    assert_eq!(fs::read(mask_dir.path().join("1.png"))?, b"0001_mask.png");

    let second = resolve_mask_names(mask_dir.path(), image_dir.path(), &config)?;
    assert!(second.renamed.is_empty());
    assert_eq!(second.already_matched.len(), 4);
    assert_eq!(
        listing(mask_dir.path())?,
        vec!["0.png", "1.png", "10.png", "2.png", "99.png", "notes.png"]
    );

    Ok(())
}

#[test]
fn conflicting_masks_stay_in_place() -> Result<(), CorrespondenceError> {
    let image_dir = tempfile::tempdir()?;
    let mask_dir = tempfile::tempdir()?;

    touch(image_dir.path(), &["7.png"])?;
    touch(mask_dir.path(), &["007.png", "7_mask.png"])?;

    let report = resolve_mask_names(mask_dir.path(), image_dir.path(), &ResolverConfig::default())?;

    assert!(report.renamed.is_empty());
    assert_eq!(report.conflicts.len(), 2);
    assert_eq!(listing(mask_dir.path())?, vec!["007.png", "7_mask.png"]);

    Ok(())
}

#[test]
fn padded_identifiers_and_other_extensions() -> Result<(), CorrespondenceError> {
    let image_dir = tempfile::tempdir()?;
    let mask_dir = tempfile::tempdir()?;

    touch(image_dir.path(), &["000003.jpg"])?;
    touch(mask_dir.path(), &["3_seg.png", "3.txt"])?;

    let config = ResolverConfig {
        image_extension: "jpg".to_string(),
        suffixes: vec!["_seg".to_string()],
        identifier_style: IdentifierStyle::ZeroPadded { width: 6 },
        ..Default::default()
    };
    let report = resolve_mask_names(mask_dir.path(), image_dir.path(), &config)?;

    assert_eq!(
        report.renamed,
        vec![("3_seg.png".to_string(), "000003.jpg".to_string())]
    );
    assert_eq!(listing(mask_dir.path())?, vec!["000003.jpg", "3.txt"]);

    Ok(())
}

#[test]
fn planning_leaves_the_masks_untouched() -> Result<(), CorrespondenceError> {
    let image_dir = tempfile::tempdir()?;
    let mask_dir = tempfile::tempdir()?;

    touch(image_dir.path(), &["0.png", "1.png", "2.png", "7.png"])?;
    touch(
        mask_dir.path(),
        &[
            "0.png",
            "0001_mask.png",
            "2_mask.png",
            "007.png",
            "7_mask.png",
            "9.png",
            "notes.png",
            "readme.txt",
        ],
    )?;
    let before = listing(mask_dir.path())?;

    let plan = plan_mask_dir(mask_dir.path(), image_dir.path(), &ResolverConfig::default())?;

    assert_eq!(
        plan.renames().collect::<Vec<_>>(),
        vec![("0001_mask.png", "1.png"), ("2_mask.png", "2.png")]
    );
    // readme.txt is not a mask
    assert_eq!(plan.entries.len(), 7);

    let report = plan.report();
    assert_eq!(report.renamed.len(), 2);
    assert_eq!(report.already_matched, vec!["0.png".to_string()]);
    assert_eq!(
        report.conflicts,
        vec!["007.png".to_string(), "7_mask.png".to_string()]
    );
    assert_eq!(report.unmatched, vec!["9.png".to_string()]);
    assert_eq!(report.unparseable, vec!["notes.png".to_string()]);
    assert!(report.failed.is_empty());

    assert_eq!(listing(mask_dir.path())?, before);

    Ok(())
}

#[test]
fn unpadded_masks_find_padded_images() -> Result<(), CorrespondenceError> {
    let image_dir = tempfile::tempdir()?;
    let mask_dir = tempfile::tempdir()?;

    touch(image_dir.path(), &["000003.png", "000012.png"])?;
    touch(mask_dir.path(), &["3_mask.png", "0012.png"])?;

    let config = ResolverConfig::default();
    let report = resolve_mask_names(mask_dir.path(), image_dir.path(), &config)?;
    assert_eq!(report.renamed.len(), 2);
    assert!(report.unmatched.is_empty());
    assert_eq!(listing(mask_dir.path())?, vec!["000003.png", "000012.png"]);

    let second = resolve_mask_names(mask_dir.path(), image_dir.path(), &config)?;
    assert!(second.renamed.is_empty());
    assert_eq!(second.already_matched.len(), 2);

    Ok(())
}

#[test]
fn missing_image_dir_is_fatal() -> Result<(), CorrespondenceError> {
    let mask_dir = tempfile::tempdir()?;
    let res = resolve_mask_names(
        mask_dir.path(),
        mask_dir.path().join("images"),
        &ResolverConfig::default(),
    );
    assert!(matches!(res, Err(CorrespondenceError::DirectoryNotFound(_))));
    Ok(())
}
