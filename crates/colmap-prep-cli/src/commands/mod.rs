mod campose;
mod images;
mod masks;

pub use campose::ExportCamposeArgs;
pub use images::{ConvertImagesArgs, ConvertMasksArgs, InvertMasksArgs};
pub use masks::MatchMasksArgs;
