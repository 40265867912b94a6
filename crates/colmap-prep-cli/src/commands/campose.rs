use std::path::PathBuf;

use argh::FromArgs;
use colmap_prep::dataset::pose::{self, ExportConfig, PoseSourceKind};

#[derive(FromArgs)]
/// Convert a position log or a pose document to campose.txt for COLMAP model alignment.
#[argh(subcommand, name = "export-campose")]
pub struct ExportCamposeArgs {
    /// dataset directory holding poslog.csv or metadata.json
    #[argh(positional)]
    dataset_dir: PathBuf,

    /// pose source to read: tabular or structured (default: detected)
    #[argh(option)]
    source: Option<PoseSourceKind>,

    /// output file (default: <dataset_dir>/work/campose.txt)
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

impl ExportCamposeArgs {
    pub fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let mut config = ExportConfig {
            source: self.source,
            ..Default::default()
        };
        if let Some(output) = self.output {
            // relative to the working directory, not to the dataset
            let output = std::env::current_dir()?.join(output);
            let (Some(dir), Some(file)) = (output.parent(), output.file_name()) else {
                return Err(format!("invalid output path: {}", output.display()).into());
            };
            config.output_dir = dir.to_path_buf();
            config.output_file = PathBuf::from(file);
        }

        pose::export_campose(&self.dataset_dir, &config)?;
        Ok(())
    }
}
