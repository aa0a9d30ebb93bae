//! Lap file loading
//!
//! Parses a written lap file back into an in-memory table. Row order is
//! preserved exactly as read; no reordering or deduplication.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{LapFileError, SEPARATOR};

/// In-memory contents of one lap file: the schema and its rows, in file order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapData {
    /// Ordered channel names from the schema line
    pub schema: Vec<String>,
    /// One entry per data line, each `schema.len()` values wide
    pub rows: Vec<Vec<f32>>,
}

impl LapData {
    /// Number of columns in the schema
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find the index of a channel by name
    pub fn channel_index(&self, name: &str) -> Option<usize> {
        self.schema.iter().position(|c| c == name)
    }
}

/// Read a lap file from disk.
///
/// Fails with [`LapFileError::MissingSchema`] when the schema line is
/// absent, [`LapFileError::RaggedRow`] when a data row's field count
/// differs from the schema's, and [`LapFileError::InvalidValue`] when a
/// field cannot be parsed as a number.
pub fn read_lap_file<P: AsRef<Path>>(path: P) -> Result<LapData, LapFileError> {
    let content = fs::read_to_string(path.as_ref())?;
    let mut lines = content.lines();

    let schema: Vec<String> = match lines.next() {
        Some(header) if !header.is_empty() => {
            header.split(SEPARATOR).map(str::to_string).collect()
        }
        _ => return Err(LapFileError::MissingSchema),
    };

    let mut rows = Vec::new();
    for (i, line) in lines.enumerate() {
        // line numbers are 1-based and include the schema line
        let line_number = i + 2;

        let fields: Vec<&str> = line.split(SEPARATOR).collect();
        if fields.len() != schema.len() {
            return Err(LapFileError::RaggedRow {
                line: line_number,
                expected: schema.len(),
                actual: fields.len(),
            });
        }

        let mut row = Vec::with_capacity(fields.len());
        for field in fields {
            let value = field.parse::<f32>().map_err(|_| LapFileError::InvalidValue {
                line: line_number,
                value: field.to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    tracing::debug!(
        "loaded lap file {}: {} channels, {} rows",
        path.as_ref().display(),
        schema.len(),
        rows.len()
    );

    Ok(LapData { schema, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("lap.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "time,speed\n0,10\n0.5,12.5\n");

        let data = read_lap_file(&path).unwrap();
        assert_eq!(data.schema, vec!["time", "speed"]);
        assert_eq!(data.row_count(), 2);
        assert_eq!(data.rows[1], vec![0.5, 12.5]);
        assert_eq!(data.channel_index("speed"), Some(1));
        assert_eq!(data.channel_index("rpm"), None);
    }

    #[test]
    fn test_missing_schema() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "");

        assert!(matches!(
            read_lap_file(&path),
            Err(LapFileError::MissingSchema)
        ));
    }

    #[test]
    fn test_ragged_row() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "time,speed\n0,10,99\n");

        match read_lap_file(&path) {
            Err(LapFileError::RaggedRow {
                line,
                expected,
                actual,
            }) => {
                assert_eq!(line, 2);
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("expected ragged row error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_value() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "time,speed\n0,fast\n");

        match read_lap_file(&path) {
            Err(LapFileError::InvalidValue { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "fast");
            }
            other => panic!("expected invalid value error, got {other:?}"),
        }
    }
}
