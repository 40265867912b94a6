use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ImgprocError;

/// Controls how a batch of files is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of worker threads. Must be > 0.
    pub num_threads: usize,
    /// Log progress every this many processed files. Zero disables progress messages.
    pub progress_every: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num_threads: 8,
            progress_every: 50,
        }
    }
}

/// A file the batch operation failed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Error message.
    pub error: String,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Files processed successfully, in input order.
    pub succeeded: Vec<PathBuf>,
    /// Files the operation failed on, in input order.
    pub failed: Vec<FailedFile>,
}

/// List the files of `dir` with one of the given extensions, sorted by path.
///
/// The scan is not recursive and the extension match ignores case.
pub fn list_files(dir: impl AsRef<Path>, extensions: &[&str]) -> Result<Vec<PathBuf>, ImgprocError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ImgprocError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in walkdir::WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
            .unwrap_or(false);
        if entry.file_type().is_file() && matches {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    Ok(paths)
}

/// Apply `op` to every file on a local thread pool.
///
/// Each file is handled independently. A failure is logged and recorded in the report,
/// the rest of the batch keeps going.
///
/// # Arguments
///
/// * `paths` - The files to process.
/// * `config` - The batch configuration.
/// * `op` - The per-file operation.
pub fn run_batch<F>(
    paths: &[PathBuf],
    config: &BatchConfig,
    op: F,
) -> Result<BatchReport, ImgprocError>
where
    F: Fn(&Path) -> Result<(), ImgprocError> + Send + Sync,
{
    if config.num_threads == 0 {
        return Err(ImgprocError::InvalidThreadCount(config.num_threads));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build()
        .map_err(|e| ImgprocError::ThreadPoolError(e.to_string()))?;

    let total = paths.len();
    let processed = AtomicUsize::new(0);

    let results = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let result = op(path);
                let n = processed.fetch_add(1, Ordering::Relaxed) + 1;
                if config.progress_every > 0 && n % config.progress_every == 0 {
                    log::info!("Processed {}/{} files...", n, total);
                }
                result
            })
            .collect::<Vec<_>>()
    });

    let mut report = BatchReport::default();
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(()) => report.succeeded.push(path.clone()),
            Err(e) => {
                log::warn!("Error processing {}: {}", path.display(), e);
                report.failed.push(FailedFile {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn list_by_extension() -> Result<(), ImgprocError> {
        let tmp_dir = tempfile::tempdir()?;
        for name in ["b.JPG", "a.jpg", "c.jpeg", "d.png"] {
            fs::write(tmp_dir.path().join(name), b"")?;
        }

        let paths = list_files(tmp_dir.path(), &["jpg", "jpeg"])?;
        let names = paths
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a.jpg", "b.JPG", "c.jpeg"]);
        Ok(())
    }

    #[test]
    fn failures_do_not_abort() -> Result<(), ImgprocError> {
        let paths = (0..20)
            .map(|i| PathBuf::from(format!("{}.png", i)))
            .collect::<Vec<_>>();
        let config = BatchConfig {
            num_threads: 4,
            progress_every: 5,
        };

        let report = run_batch(&paths, &config, |path| {
            if path.to_string_lossy().starts_with('1') {
                Err(ImgprocError::FileDoesNotExist(path.to_path_buf()))
            } else {
                Ok(())
            }
        })?;

        // 1.png and 10.png to 19.png
        assert_eq!(report.failed.len(), 11);
        assert_eq!(report.succeeded.len(), 9);
        assert_eq!(report.succeeded[0], PathBuf::from("0.png"));
        Ok(())
    }

    #[test]
    fn zero_threads() {
        let config = BatchConfig {
            num_threads: 0,
            ..Default::default()
        };
        let res = run_batch(&[], &config, |_| Ok(()));
        assert!(matches!(res, Err(ImgprocError::InvalidThreadCount(0))));
    }
}
