use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::{read_pose_document, read_poslog, ExportConfig, ImageNameTemplate, PoseBatch, PoseError};

/// The shape of a pose source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseSourceKind {
    /// Comma separated position log, see [`super::read_poslog`].
    Tabular,
    /// JSON document with a `poses` list, see [`super::read_pose_document`].
    Structured,
}

impl FromStr for PoseSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tabular" | "csv" => Ok(Self::Tabular),
            "structured" | "json" => Ok(Self::Structured),
            _ => Err(format!(
                "invalid pose source: {}, expected `tabular` or `structured`",
                s
            )),
        }
    }
}

impl fmt::Display for PoseSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tabular => write!(f, "tabular"),
            Self::Structured => write!(f, "structured"),
        }
    }
}

/// A located pose source, ready to be read.
#[derive(Debug, Clone, PartialEq)]
pub enum PoseSource {
    /// A position log whose image names come from a template.
    Tabular {
        /// Path to the log.
        path: PathBuf,
        /// Template of the image names.
        template: ImageNameTemplate,
    },
    /// A structured pose document.
    Structured {
        /// Path to the document.
        path: PathBuf,
        /// Extension of the synthesized image names.
        image_extension: String,
    },
}

impl PoseSource {
    /// Locate the pose source of a dataset.
    ///
    /// When `config.source` is set, that source must exist. Otherwise the position
    /// log is used when present, then the structured document.
    ///
    /// # Arguments
    ///
    /// * `dataset_dir` - The dataset directory.
    /// * `config` - The export configuration.
    pub fn detect(dataset_dir: impl AsRef<Path>, config: &ExportConfig) -> Result<Self, PoseError> {
        let dataset_dir = dataset_dir.as_ref();
        let tabular = || PoseSource::Tabular {
            path: dataset_dir.join(&config.poslog_file),
            template: config.template.clone(),
        };
        let structured = || PoseSource::Structured {
            path: dataset_dir.join(&config.metadata_file),
            image_extension: config.structured_image_extension.clone(),
        };

        let source = match config.source {
            Some(PoseSourceKind::Tabular) => tabular(),
            Some(PoseSourceKind::Structured) => structured(),
            None => [tabular(), structured()]
                .into_iter()
                .find(|source| source.path().is_file())
                .ok_or_else(|| PoseError::SourceNotFound(dataset_dir.to_path_buf()))?,
        };

        if !source.path().is_file() {
            return Err(PoseError::SourceNotFound(source.path().to_path_buf()));
        }

        Ok(source)
    }

    /// The shape of this source.
    pub fn kind(&self) -> PoseSourceKind {
        match self {
            Self::Tabular { .. } => PoseSourceKind::Tabular,
            Self::Structured { .. } => PoseSourceKind::Structured,
        }
    }

    /// The path of the source file.
    pub fn path(&self) -> &Path {
        match self {
            Self::Tabular { path, .. } | Self::Structured { path, .. } => path,
        }
    }

    /// Read every record of the source, in source order.
    pub fn read(&self) -> Result<PoseBatch, PoseError> {
        match self {
            Self::Tabular { path, template } => Ok(PoseBatch {
                records: read_poslog(path, template)?,
                skipped: Vec::new(),
            }),
            Self::Structured {
                path,
                image_extension,
            } => read_pose_document(path, image_extension),
        }
    }
}
