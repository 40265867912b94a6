use std::path::PathBuf;

use argh::FromArgs;
use colmap_prep::dataset::correspondence::{self, IdentifierStyle, ResolverConfig};

#[derive(FromArgs)]
/// Rename masks so that each one carries the name of its image.
#[argh(subcommand, name = "match-masks")]
pub struct MatchMasksArgs {
    /// directory containing mask images
    #[argh(option, default = "PathBuf::from(\"masks\")")]
    mask_dir: PathBuf,

    /// directory containing image files
    #[argh(option, default = "PathBuf::from(\"images\")")]
    image_dir: PathBuf,

    /// token allowed between the mask digits and the extension, repeatable (default: _mask)
    #[argh(option)]
    suffix: Vec<String>,

    /// extension of the image names, without the dot
    #[argh(option, default = "String::from(\"png\")")]
    image_extension: String,

    /// zero pad the identifiers to this width instead of stripping the zeros
    #[argh(option)]
    pad_width: Option<usize>,

    /// keep the identifier digits exactly as in the mask name
    #[argh(switch)]
    verbatim: bool,

    /// only report what would be renamed
    #[argh(switch)]
    dry_run: bool,
}

impl MatchMasksArgs {
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let mut config = ResolverConfig {
            image_extension: self.image_extension,
            identifier_style: match (self.verbatim, self.pad_width) {
                (true, _) => IdentifierStyle::Verbatim,
                (false, Some(width)) => IdentifierStyle::ZeroPadded { width },
                (false, None) => IdentifierStyle::Unpadded,
            },
            ..Default::default()
        };
        if !self.suffix.is_empty() {
            config.suffixes = self.suffix;
        }

        if self.dry_run {
            let plan = correspondence::plan_mask_dir(&self.mask_dir, &self.image_dir, &config)?;
            for (src, dst) in plan.renames() {
                log::info!("Would rename {} -> {}", src, dst);
            }
            let report = plan.report();
            log::info!(
                "Would rename {} masks, {} already matched",
                report.renamed.len(),
                report.already_matched.len()
            );
            return Ok(());
        }

        let report = correspondence::resolve_mask_names(&self.mask_dir, &self.image_dir, &config)?;
        if !report.conflicts.is_empty() {
            log::warn!(
                "{} masks were left in place because of conflicting names",
                report.conflicts.len()
            );
        }
        for (mask, error) in &report.failed {
            log::error!("Could not rename {}: {}", mask, error);
        }

        Ok(())
    }
}
