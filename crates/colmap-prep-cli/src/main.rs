use argh::FromArgs;

mod commands;
use commands::{
    ConvertImagesArgs, ConvertMasksArgs, ExportCamposeArgs, InvertMasksArgs, MatchMasksArgs,
};

#[derive(FromArgs)]
/// Prepare image, mask and pose files for COLMAP.
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    ConvertImages(ConvertImagesArgs),
    ConvertMasks(ConvertMasksArgs),
    InvertMasks(InvertMasksArgs),
    MatchMasks(MatchMasksArgs),
    ExportCampose(ExportCamposeArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    match args.command {
        Command::ConvertImages(args) => args.run(),
        Command::ConvertMasks(args) => args.run(),
        Command::InvertMasks(args) => args.run(),
        Command::MatchMasks(args) => args.run(),
        Command::ExportCampose(args) => args.run(),
    }
}
