use std::{fs::File, io::BufReader, path::Path};

use serde_json::Value;

use super::{NumberFormat, PoseBatch, PoseError, PoseRecord, Position, SkippedEntry};

/// Minimum number of fields of a positional pose entry.
const MIN_POSE_FIELDS: usize = 7;

/// Read a structured pose document.
///
/// The document is a JSON object whose `poses` key holds the list of entries.
/// An entry is either a numeric list of at least 7 fields with x, y, z at positions
/// 4, 5 and 6, or an object with optional `x`, `y` and `z` keys defaulting to 0.
/// Integer coordinates are recorded as such and written back without a fraction.
/// The image of entry `i` is named `<i>.<image_extension>`.
///
/// Malformed entries are skipped, the batch reports one [`SkippedEntry`] each and
/// the following entries keep their own index.
///
/// # Arguments
///
/// * `path` - The path to the JSON document.
/// * `image_extension` - Extension of the synthesized image names, without the dot.
pub fn read_pose_document(
    path: impl AsRef<Path>,
    image_extension: &str,
) -> Result<PoseBatch, PoseError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PoseError::SourceNotFound(path.to_path_buf()));
    }

    let document: Value = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    let Some(poses) = document.get("poses").and_then(Value::as_array) else {
        return Err(PoseError::MissingPoses(path.to_path_buf()));
    };

    let mut batch = PoseBatch::default();
    for (index, entry) in poses.iter().enumerate() {
        match parse_pose_entry(entry) {
            Ok((position, formats)) => batch.records.push(
                PoseRecord::new(format!("{}.{}", index, image_extension), position)
                    .with_formats(formats),
            ),
            Err(reason) => {
                log::warn!("Invalid position format for entry {} in poses: {}", index, reason);
                batch.skipped.push(SkippedEntry { index, reason });
            }
        }
    }

    Ok(batch)
}

type Coordinate = (f64, NumberFormat);

fn parse_pose_entry(entry: &Value) -> Result<(Position, [NumberFormat; 3]), String> {
    let axes = match entry {
        Value::Array(fields) if fields.len() >= MIN_POSE_FIELDS => [
            numeric_field(&fields[4], "4")?,
            numeric_field(&fields[5], "5")?,
            numeric_field(&fields[6], "6")?,
        ],
        Value::Array(fields) => {
            return Err(format!(
                "expected at least {} fields, got {}",
                MIN_POSE_FIELDS,
                fields.len()
            ))
        }
        Value::Object(map) => {
            let axis = |key: &str| {
                map.get(key)
                    .map_or(Ok((0.0, NumberFormat::Integer)), |v| numeric_field(v, key))
            };
            [axis("x")?, axis("y")?, axis("z")?]
        }
        other => return Err(format!("unsupported entry {}", other)),
    };

    let [(x, fx), (y, fy), (z, fz)] = axes;
    Ok((Position { x, y, z }, [fx, fy, fz]))
}

fn numeric_field(value: &Value, field: &str) -> Result<Coordinate, String> {
    let Value::Number(number) = value else {
        return Err(format!("field {} is not a number: {}", field, value));
    };
    let format = if number.is_f64() {
        NumberFormat::Real
    } else {
        NumberFormat::Integer
    };
    number
        .as_f64()
        .map(|v| (v, format))
        .ok_or_else(|| format!("field {} is not representable: {}", field, number))
}
