use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use super::{
    parse_part, ImageNameTemplate, NumberFormat, Orientation, PoseError, PoseRecord, Position,
    Velocity,
};

/// Number of columns of a position log row.
pub const POSLOG_NUM_COLUMNS: usize = 12;

/// Read a position log and return one record per row.
///
/// The log is a comma separated file without header. Each row holds, in order:
/// status, camera time, system time, x, y, z, roll, pitch, yaw, x velocity,
/// y velocity, z velocity. Blank lines are ignored.
///
/// The log has no file name column, the image name of the i-th row is rendered
/// from `template`, so the rows must follow the order of the images on disk.
///
/// # Arguments
///
/// * `path` - The path to the position log.
/// * `template` - The template used to name the images.
///
/// # Returns
///
/// The records in row order.
pub fn read_poslog(
    path: impl AsRef<Path>,
    template: &ImageNameTemplate,
) -> Result<Vec<PoseRecord>, PoseError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PoseError::SourceNotFound(path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(path)?);

    let mut records = Vec::new();
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = parse_poslog_line(line, line_idx + 1)?;
        records.push(PoseRecord {
            image_name: template.render(records.len()),
            position: row.position,
            orientation: Some(row.orientation),
            velocity: Some(row.velocity),
            formats: row.formats,
        });
    }

    Ok(records)
}

struct PoslogRow {
    position: Position,
    orientation: Orientation,
    velocity: Velocity,
    formats: [NumberFormat; 3],
}

/// Parse a position log row.
/// NOTE: status, camera time and system time are only counted, not parsed.
fn parse_poslog_line(line: &str, line_number: usize) -> Result<PoslogRow, PoseError> {
    let parts = line.split(',').map(str::trim).collect::<Vec<_>>();

    if parts.len() != POSLOG_NUM_COLUMNS {
        return Err(PoseError::InvalidColumnCount {
            line: line_number,
            expected: POSLOG_NUM_COLUMNS,
            found: parts.len(),
        });
    }

    let values = parts[3..]
        .iter()
        .map(|s| parse_part::<f64>(s, line_number))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PoslogRow {
        position: Position {
            x: values[0],
            y: values[1],
            z: values[2],
        },
        orientation: Orientation {
            roll: values[3],
            pitch: values[4],
            yaw: values[5],
        },
        velocity: Velocity {
            x: values[6],
            y: values[7],
            z: values[8],
        },
        formats: [
            NumberFormat::of_token(parts[3]),
            NumberFormat::of_token(parts[4]),
            NumberFormat::of_token(parts[5]),
        ],
    })
}
