use std::fs;

use colmap_prep_dataset::pose::{
    export_campose, read_campose_txt, ExportConfig, PoseError, PoseSourceKind,
};

#[test]
fn poslog_rows_map_to_image_sequence() -> Result<(), PoseError> {
    let dataset_dir = tempfile::tempdir()?;
    let rows = (0..12)
        .map(|i| format!("0,{},{},{}.5,{}.25,-{}.0,0.1,0.2,0.3,0,0,0", i, i, i, i, i))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(dataset_dir.path().join("poslog.csv"), rows)?;

    let report = export_campose(dataset_dir.path(), &ExportConfig::default())?;
    assert_eq!(report.written, 12);
    assert!(report.skipped.is_empty());

    let lines = read_campose_txt(&report.output_path)?;
    assert_eq!(lines.len(), 12);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line.image_name, format!("img{:06}_0_0.png", i));
        assert_eq!(line.position.x, i as f64 + 0.5);
        assert_eq!(line.position.y, i as f64 + 0.25);
        assert_eq!(line.position.z, -(i as f64));
    }

    Ok(())
}

#[test]
fn structured_source_skips_malformed_entries() -> Result<(), PoseError> {
    let dataset_dir = tempfile::tempdir()?;
    fs::write(
        dataset_dir.path().join("metadata.json"),
        r#"{"poses": [
            [0, 0, 0, 1, 0.0, 0.0, 1.0],
            [0, 0, 0, 1, 1.0, 0.0, 1.0],
            [0, 0, 0, 0, 4.0, 5.0, 6.0],
            [1, 2],
            {"y": 2.5}
        ]}"#,
    )?;

    let report = export_campose(dataset_dir.path(), &ExportConfig::default())?;
    assert_eq!(report.source, PoseSourceKind::Structured);
    assert_eq!(report.written, 4);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 3);

    assert_eq!(
        fs::read_to_string(&report.output_path)?,
        "0.jpg 0.0 0.0 1.0\n1.jpg 1.0 0.0 1.0\n2.jpg 4.0 5.0 6.0\n4.jpg 0 2.5 0\n"
    );

    Ok(())
}

#[test]
fn structured_numbers_keep_their_notation() -> Result<(), PoseError> {
    let dataset_dir = tempfile::tempdir()?;
    fs::write(
        dataset_dir.path().join("metadata.json"),
        r#"{"poses": [
            [0, 0, 0, 0, 4, 5, 6],
            [0, 0, 0, 0, 0.00001, 1e16, 2.0]
        ]}"#,
    )?;

    let report = export_campose(dataset_dir.path(), &ExportConfig::default())?;
    assert_eq!(
        fs::read_to_string(&report.output_path)?,
        "0.jpg 4 5 6\n1.jpg 1e-05 1e+16 2.0\n"
    );

    Ok(())
}

#[test]
fn export_is_idempotent() -> Result<(), PoseError> {
    let dataset_dir = tempfile::tempdir()?;
    fs::write(
        dataset_dir.path().join("poslog.csv"),
        "0,100,200,1.5,2.5,3.5,0,0,0,0,0,0\n1,101,201,0.1,0.2,0.3,0,0,0,0,0,0\n",
    )?;

    let config = ExportConfig::default();
    let first = export_campose(dataset_dir.path(), &config)?;
    let first_bytes = fs::read(&first.output_path)?;

    let second = export_campose(dataset_dir.path(), &config)?;
    assert_eq!(fs::read(&second.output_path)?, first_bytes);
    assert_eq!(
        String::from_utf8_lossy(&first_bytes),
        "img000000_0_0.png 1.5 2.5 3.5\nimg000001_0_0.png 0.1 0.2 0.3\n"
    );

    Ok(())
}

#[test]
fn missing_source_is_fatal() -> Result<(), PoseError> {
    let dataset_dir = tempfile::tempdir()?;
    let res = export_campose(dataset_dir.path(), &ExportConfig::default());
    assert!(matches!(res, Err(PoseError::SourceNotFound(_))));
    assert!(!dataset_dir.path().join("work").exists());
    Ok(())
}
