use std::path::PathBuf;

mod types;
pub use types::{
    CamposeLine, ImageNameTemplate, NumberFormat, Orientation, PoseRecord, Position, Velocity,
};

mod poslog;
pub use poslog::{read_poslog, POSLOG_NUM_COLUMNS};

mod document;
pub use document::read_pose_document;

mod campose;
pub use campose::{read_campose_txt, write_campose_txt};

mod source;
pub use source::{PoseSource, PoseSourceKind};

mod export;
pub use export::{export_campose, ExportConfig, ExportReport};

/// Error types for the pose module.
#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    /// The pose source file does not exist.
    #[error("Pose source not found: {0}")]
    SourceNotFound(PathBuf),

    /// Error reading or writing file
    #[error("error reading or writing file. {0}")]
    Io(#[from] std::io::Error),

    /// The structured pose document is not valid JSON.
    #[error("Error parsing JSON. {0}")]
    Json(#[from] serde_json::Error),

    /// The structured pose document has no `poses` list.
    #[error("Missing \"poses\" list in {0}")]
    MissingPoses(PathBuf),

    /// A row of the position log does not have the expected number of columns.
    #[error("Invalid number of columns at line {line}: expected {expected}, got {found}")]
    InvalidColumnCount {
        /// 1-based line number.
        line: usize,
        /// Expected number of columns.
        expected: usize,
        /// Number of columns found.
        found: usize,
    },

    /// Parse error
    #[error("Parse error {0}")]
    ParseError(String),
}

/// A pose entry that was skipped while reading a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// 0-based index of the entry in the source.
    pub index: usize,
    /// Why the entry was skipped.
    pub reason: String,
}

/// The records read from a pose source, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseBatch {
    /// Parsed records.
    pub records: Vec<PoseRecord>,
    /// Entries that could not be parsed.
    pub skipped: Vec<SkippedEntry>,
}

/// Parse a single numeric token of the 1-based line `line_number`.
fn parse_part<T: std::str::FromStr>(s: &str, line_number: usize) -> Result<T, PoseError>
where
    T::Err: std::fmt::Display,
{
    s.parse::<T>()
        .map_err(|e| PoseError::ParseError(format!("line {}: {}: {}", line_number, s, e)))
}
