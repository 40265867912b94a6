use std::fmt;

use serde::{Deserialize, Serialize};

/// A 3D camera position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// x coordinate
    pub x: f64,
    /// y coordinate
    pub y: f64,
    /// z coordinate
    pub z: f64,
}

/// Camera orientation as logged by the capture device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// roll angle
    pub roll: f64,
    /// pitch angle
    pub pitch: f64,
    /// yaw angle
    pub yaw: f64,
}

/// Camera velocity as logged by the capture device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    /// velocity along x
    pub x: f64,
    /// velocity along y
    pub y: f64,
    /// velocity along z
    pub z: f64,
}

/// How a coordinate was written in its source, integers are written back without
/// a fractional part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// A floating point literal, e.g. `4.0` or `1e-05`.
    #[default]
    Real,
    /// An integer literal, e.g. `4`.
    Integer,
}

impl NumberFormat {
    /// Classify a numeric token.
    pub fn of_token(token: &str) -> Self {
        if token.parse::<i64>().is_ok() {
            Self::Integer
        } else {
            Self::Real
        }
    }
}

/// Write a coordinate the way it reads in a campose file.
///
/// Reals use the shortest round-trip digits, with a trailing `.0` for integral
/// values and a signed two-digit exponent outside `[1e-4, 1e16)`.
fn format_coordinate(value: f64, format: NumberFormat) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if format == NumberFormat::Integer && value.fract() == 0.0 {
        return format!("{:.0}", value);
    }

    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

/// One captured frame: the image it belongs to and where it was taken.
///
/// Orientation and velocity are kept when the source provides them but are not
/// part of the campose output.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseRecord {
    /// File name of the associated image.
    pub image_name: String,
    /// Camera position.
    pub position: Position,
    /// Camera orientation, if the source has one.
    pub orientation: Option<Orientation>,
    /// Camera velocity, if the source has one.
    pub velocity: Option<Velocity>,
    /// Source format of x, y and z.
    pub formats: [NumberFormat; 3],
}

impl PoseRecord {
    /// Create a record with a position only.
    pub fn new(image_name: impl Into<String>, position: Position) -> Self {
        Self {
            image_name: image_name.into(),
            position,
            orientation: None,
            velocity: None,
            formats: [NumberFormat::Real; 3],
        }
    }

    /// Set the source format of x, y and z.
    pub fn with_formats(mut self, formats: [NumberFormat; 3]) -> Self {
        self.formats = formats;
        self
    }
}

/// A line of the campose file: `<image_name> <x> <y> <z>`.
#[derive(Debug, Clone, PartialEq)]
pub struct CamposeLine {
    /// Image file name.
    pub image_name: String,
    /// Camera position.
    pub position: Position,
    /// Format of x, y and z.
    pub formats: [NumberFormat; 3],
}

impl From<&PoseRecord> for CamposeLine {
    fn from(record: &PoseRecord) -> Self {
        Self {
            image_name: record.image_name.clone(),
            position: record.position,
            formats: record.formats,
        }
    }
}

impl fmt::Display for CamposeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [fx, fy, fz] = self.formats;
        write!(
            f,
            "{} {} {} {}",
            self.image_name,
            format_coordinate(self.position.x, fx),
            format_coordinate(self.position.y, fy),
            format_coordinate(self.position.z, fz)
        )
    }
}

/// Template of the image names synthesized for sources without a file name field.
///
/// The default renders `img000042_0_0.png` for index 42.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageNameTemplate {
    /// Text before the index.
    pub prefix: String,
    /// Zero padded width of the index.
    pub width: usize,
    /// Text between the index and the extension.
    pub suffix: String,
    /// Extension, without the dot.
    pub extension: String,
}

impl Default for ImageNameTemplate {
    fn default() -> Self {
        Self {
            prefix: "img".to_string(),
            width: 6,
            suffix: "_0_0".to_string(),
            extension: "png".to_string(),
        }
    }
}

impl ImageNameTemplate {
    /// Render the image name of the record at `index` (0-based).
    pub fn render(&self, index: usize) -> String {
        format!(
            "{}{:0width$}{}.{}",
            self.prefix,
            index,
            self.suffix,
            self.extension,
            width = self.width
        )
    }
}
