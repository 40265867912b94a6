use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{write_campose_txt, ImageNameTemplate, PoseError, PoseSource, PoseSourceKind, SkippedEntry};

/// Configuration of the campose export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Force a source shape instead of detecting it.
    pub source: Option<PoseSourceKind>,
    /// Position log file name, relative to the dataset directory.
    pub poslog_file: PathBuf,
    /// Structured document file name, relative to the dataset directory.
    pub metadata_file: PathBuf,
    /// Output directory, created if needed. A relative path is resolved against the
    /// dataset directory.
    pub output_dir: PathBuf,
    /// Output file name, inside `output_dir`.
    pub output_file: PathBuf,
    /// Naming of the images of a position log.
    pub template: ImageNameTemplate,
    /// Extension of the image names of a structured document.
    pub structured_image_extension: String,
}

impl ExportConfig {
    /// Path of the campose file written for `dataset_dir`.
    pub fn output_path(&self, dataset_dir: impl AsRef<Path>) -> PathBuf {
        dataset_dir
            .as_ref()
            .join(&self.output_dir)
            .join(&self.output_file)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            source: None,
            poslog_file: PathBuf::from("poslog.csv"),
            metadata_file: PathBuf::from("metadata.json"),
            output_dir: PathBuf::from("work"),
            output_file: PathBuf::from("campose.txt"),
            template: ImageNameTemplate::default(),
            structured_image_extension: "jpg".to_string(),
        }
    }
}

/// Summary of a campose export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// The source that was read.
    pub source: PoseSourceKind,
    /// The written campose file.
    pub output_path: PathBuf,
    /// Number of lines written.
    pub written: usize,
    /// Source entries left out of the output.
    pub skipped: Vec<SkippedEntry>,
}

/// Export the poses of a dataset to a campose.txt file.
///
/// The whole source is parsed before anything is written: a missing source, a
/// malformed document or a malformed log row aborts the export without touching
/// the output. The output directory is created if needed and the file is fully
/// rewritten, so exporting an unchanged source twice gives identical files.
///
/// # Arguments
///
/// * `dataset_dir` - The dataset directory holding the pose source.
/// * `config` - The export configuration.
pub fn export_campose(
    dataset_dir: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<ExportReport, PoseError> {
    let dataset_dir = dataset_dir.as_ref();

    let source = PoseSource::detect(dataset_dir, config)?;
    log::info!(
        "Reading {} poses from {}",
        source.kind(),
        source.path().display()
    );

    let batch = source.read()?;

    std::fs::create_dir_all(dataset_dir.join(&config.output_dir))?;
    let output_path = config.output_path(dataset_dir);
    write_campose_txt(&output_path, &batch.records)?;

    if !batch.skipped.is_empty() {
        log::warn!("Skipped {} invalid pose entries", batch.skipped.len());
    }
    log::info!(
        "Successfully created {} with {} poses",
        output_path.display(),
        batch.records.len()
    );

    Ok(ExportReport {
        source: source.kind(),
        output_path,
        written: batch.records.len(),
        skipped: batch.skipped,
    })
}
