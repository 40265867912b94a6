use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use super::{parse_part, CamposeLine, NumberFormat, PoseError, PoseRecord, Position};

/// Write the campose.txt file, one `<image_name> <x> <y> <z>` line per record.
///
/// The file is truncated first, so writing the same records twice gives the same bytes.
///
/// # Arguments
///
/// * `path` - The path to the campose.txt file.
/// * `records` - The records, written in the given order.
pub fn write_campose_txt(path: impl AsRef<Path>, records: &[PoseRecord]) -> Result<(), PoseError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        writeln!(writer, "{}", CamposeLine::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read the campose.txt file and return its lines.
///
/// # Arguments
///
/// * `path` - The path to the campose.txt file.
pub fn read_campose_txt(path: impl AsRef<Path>) -> Result<Vec<CamposeLine>, PoseError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    reader
        .lines()
        .enumerate()
        .map(|(line_idx, line)| -> Result<CamposeLine, PoseError> {
            let line = line?;
            parse_campose_line(&line, line_idx + 1)
        })
        .collect()
}

/// IMAGE_NAME, X, Y, Z
fn parse_campose_line(line: &str, line_number: usize) -> Result<CamposeLine, PoseError> {
    let parts = line.split_whitespace().collect::<Vec<_>>();

    if parts.len() != 4 {
        return Err(PoseError::ParseError(format!(
            "line {}: invalid number of parts: {}",
            line_number,
            parts.len()
        )));
    }

    Ok(CamposeLine {
        image_name: parts[0].to_string(),
        position: Position {
            x: parse_part(parts[1], line_number)?,
            y: parse_part(parts[2], line_number)?,
            z: parse_part(parts[3], line_number)?,
        },
        formats: [
            NumberFormat::of_token(parts[1]),
            NumberFormat::of_token(parts[2]),
            NumberFormat::of_token(parts[3]),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn write_overwrites() -> Result<(), PoseError> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("campose.txt");
        fs::write(&path, "stale content that is longer than the output\n")?;

        let records = vec![
            PoseRecord::new("img000000_0_0.png", Position { x: 1.5, y: 2.5, z: 3.5 }),
            PoseRecord::new("img000001_0_0.png", Position { x: 4.0, y: 0.0, z: -1.0 }),
        ];
        write_campose_txt(&path, &records)?;

        assert_eq!(
            fs::read_to_string(&path)?,
            "img000000_0_0.png 1.5 2.5 3.5\nimg000001_0_0.png 4.0 0.0 -1.0\n"
        );

        let lines = read_campose_txt(&path)?;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].image_name, "img000001_0_0.png");
        assert_eq!(lines[1].position, records[1].position);
        Ok(())
    }

    #[test]
    fn integers_survive_a_rewrite() -> Result<(), PoseError> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("campose.txt");
        fs::write(&path, "0.jpg 4 5.0 1e-05\n")?;

        let lines = read_campose_txt(&path)?;
        assert_eq!(
            lines[0].formats,
            [NumberFormat::Integer, NumberFormat::Real, NumberFormat::Real]
        );
        assert_eq!(lines[0].to_string(), "0.jpg 4 5.0 1e-05");
        Ok(())
    }

    #[test]
    fn reject_extra_columns() {
        let res = parse_campose_line("0.jpg 1 2 3 4", 1);
        assert!(matches!(res, Err(PoseError::ParseError(_))));
    }
}
