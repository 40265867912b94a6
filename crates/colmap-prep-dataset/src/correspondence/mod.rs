use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

mod identifier;
pub use identifier::{parse_image_identifier, parse_mask_identifier, IdentifierStyle};

mod resolver;
pub use resolver::{apply_plan, list_file_names, plan_mask_dir, resolve_mask_names};

/// Error types for the correspondence module.
#[derive(Debug, thiserror::Error)]
pub enum CorrespondenceError {
    /// The mask or image directory does not exist.
    #[error("Directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    /// Error scanning a directory or renaming a file.
    #[error("Failed to manipulate the file. {0}")]
    Io(#[from] std::io::Error),

    /// Error walking a directory.
    #[error("Failed to scan the directory. {0}")]
    Walk(#[from] walkdir::Error),
}

/// Configuration of the mask correspondence resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Extension of the mask files, without the dot.
    pub mask_extension: String,
    /// Extension of the target image names, without the dot.
    pub image_extension: String,
    /// Tokens allowed between the digits and the extension of a mask name.
    pub suffixes: Vec<String>,
    /// How the extracted digits are written into the target name.
    pub identifier_style: IdentifierStyle,
    /// Log progress every this many renames. Zero disables progress messages.
    pub progress_every: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            mask_extension: "png".to_string(),
            image_extension: "png".to_string(),
            suffixes: vec!["_mask".to_string()],
            identifier_style: IdentifierStyle::Unpadded,
            progress_every: 50,
        }
    }
}

/// The file names found in the image directory.
///
/// Only used to test membership, the order of the names carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct ImageSet(HashSet<String>);

impl ImageSet {
    /// Snapshot the regular files of `dir` (non-recursive).
    pub fn from_dir(dir: impl AsRef<std::path::Path>) -> Result<Self, CorrespondenceError> {
        Ok(list_file_names(dir)?.into_iter().collect())
    }

    /// Check whether an image with exactly this file name exists.
    pub fn contains(&self, file_name: &str) -> bool {
        self.0.contains(file_name)
    }

    /// Number of images in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no image.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the image names, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Group the image names by identifier, names without an identifier are left out.
    pub fn by_identifier(&self, config: &ResolverConfig) -> HashMap<String, Vec<&str>> {
        let mut index: HashMap<String, Vec<&str>> = HashMap::new();
        for name in self.iter() {
            if let Some(identifier) = parse_image_identifier(name, config) {
                index.entry(identifier).or_default().push(name);
            }
        }
        index
    }
}

impl FromIterator<String> for ImageSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A mask file with the identifier parsed from its name.
///
/// The target name only depends on the file name and the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskFile {
    /// Current file name of the mask.
    pub file_name: String,
    /// Canonical identifier extracted from the file name.
    pub identifier: String,
    /// Name the mask must take to match its image: `<identifier>.<image_extension>`.
    pub target_name: String,
}

impl MaskFile {
    /// Parse a mask file name, returns `None` if the name has no identifier.
    pub fn from_file_name(file_name: &str, config: &ResolverConfig) -> Option<Self> {
        let identifier = parse_mask_identifier(file_name, config)?;
        let target_name = format!("{}.{}", identifier, config.image_extension);
        Some(Self {
            file_name: file_name.to_string(),
            identifier,
            target_name,
        })
    }
}

/// What the resolver decided for a single mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskOutcome {
    /// The mask name already equals an image name, nothing to do.
    AlreadyMatched,
    /// The mask name does not carry an identifier.
    Unparseable,
    /// No image is named after the mask identifier.
    NoMatchingImage {
        /// The image name that was looked up.
        target: String,
    },
    /// The target name is claimed by another mask or already taken in the mask directory.
    Conflict {
        /// The contested target name.
        target: String,
    },
    /// The mask must be renamed to `target`.
    Rename {
        /// The new file name.
        target: String,
    },
}

/// A mask file name and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMask {
    /// Current file name of the mask.
    pub file_name: String,
    /// The decision taken for this mask.
    pub outcome: MaskOutcome,
}

/// The decisions for every mask, computed before touching the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    /// One entry per mask, in the order the names were given.
    pub entries: Vec<PlannedMask>,
}

impl RenamePlan {
    /// Iterate over the `(source, target)` pairs to rename.
    pub fn renames(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            MaskOutcome::Rename { target } => Some((e.file_name.as_str(), target.as_str())),
            _ => None,
        })
    }

    /// Summarize the plan as if every rename had been applied.
    pub fn report(&self) -> ResolveReport {
        let mut report = ResolveReport::default();
        for entry in &self.entries {
            let name = entry.file_name.clone();
            match &entry.outcome {
                MaskOutcome::AlreadyMatched => report.already_matched.push(name),
                MaskOutcome::Unparseable => report.unparseable.push(name),
                MaskOutcome::NoMatchingImage { .. } => report.unmatched.push(name),
                MaskOutcome::Conflict { .. } => report.conflicts.push(name),
                MaskOutcome::Rename { target } => report.renamed.push((name, target.clone())),
            }
        }
        report
    }
}

/// Summary of a resolver run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// `(old, new)` names of the renamed masks.
    pub renamed: Vec<(String, String)>,
    /// Masks already named after an image.
    pub already_matched: Vec<String>,
    /// Masks whose name has no identifier.
    pub unparseable: Vec<String>,
    /// Masks whose identifier has no image.
    pub unmatched: Vec<String>,
    /// Masks left in place because their target name is contested.
    pub conflicts: Vec<String>,
    /// `(mask, error)` for the renames that failed on disk.
    pub failed: Vec<(String, String)>,
}

/// Decide what to do with every mask.
///
/// A mask already named after an image is never parsed. Every other mask is
/// parsed, and its target looked up in `images`: first the image named
/// `<identifier>.<image_extension>`, then the single image whose own parsed
/// identifier is the same, so `3_mask.png` still finds `000003.png`. Several images
/// sharing the identifier make the target ambiguous, the mask is a conflict.
///
/// Targets are joined through a map so that two masks resolving to the same target,
/// or a target already used by a mask file, are reported as conflicts and none of
/// the claimants is moved.
///
/// # Arguments
///
/// * `mask_names` - The file names in the mask directory.
/// * `images` - The file names in the image directory.
/// * `config` - The resolver configuration.
pub fn plan_renames(
    mask_names: &[String],
    images: &ImageSet,
    config: &ResolverConfig,
) -> RenamePlan {
    let existing = mask_names.iter().map(String::as_str).collect::<HashSet<_>>();
    let image_ids = images.by_identifier(config);

    let mut claims: HashMap<String, &str> = HashMap::new();
    let mut contested: HashSet<String> = HashSet::new();

    let mut outcomes = Vec::with_capacity(mask_names.len());
    for name in mask_names {
        if images.contains(name) {
            outcomes.push(MaskOutcome::AlreadyMatched);
            continue;
        }

        let outcome = match MaskFile::from_file_name(name, config) {
            None => {
                log::warn!("Could not parse mask name: {}", name);
                MaskOutcome::Unparseable
            }
            Some(mask) => match image_for(&mask, images, &image_ids) {
                ImageMatch::None => {
                    log::warn!("No matching image for mask {} ({})", name, mask.target_name);
                    MaskOutcome::NoMatchingImage {
                        target: mask.target_name,
                    }
                }
                ImageMatch::Ambiguous(candidates) => {
                    log::warn!(
                        "Several images match mask {}: {}",
                        name,
                        candidates.join(", ")
                    );
                    MaskOutcome::Conflict {
                        target: mask.target_name,
                    }
                }
                ImageMatch::One(target) => {
                    if claims.insert(target.clone(), name).is_some()
                        || existing.contains(target.as_str())
                    {
                        contested.insert(target.clone());
                    }
                    MaskOutcome::Rename { target }
                }
            },
        };
        outcomes.push(outcome);
    }

    let entries = mask_names
        .iter()
        .zip(outcomes)
        .map(|(name, outcome)| {
            let outcome = match outcome {
                MaskOutcome::Rename { target } if contested.contains(&target) => {
                    log::warn!("Conflicting target {} for mask {}", target, name);
                    MaskOutcome::Conflict { target }
                }
                other => other,
            };
            PlannedMask {
                file_name: name.clone(),
                outcome,
            }
        })
        .collect();

    RenamePlan { entries }
}

enum ImageMatch<'a> {
    None,
    One(String),
    Ambiguous(&'a [&'a str]),
}

fn image_for<'a>(
    mask: &MaskFile,
    images: &ImageSet,
    image_ids: &'a HashMap<String, Vec<&'a str>>,
) -> ImageMatch<'a> {
    if images.contains(&mask.target_name) {
        return ImageMatch::One(mask.target_name.clone());
    }
    match image_ids.get(&mask.identifier).map(Vec::as_slice) {
        None | Some([]) => ImageMatch::None,
        Some([name]) => ImageMatch::One(name.to_string()),
        Some(candidates) => ImageMatch::Ambiguous(candidates),
    }
}
