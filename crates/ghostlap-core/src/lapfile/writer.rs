//! Lap file writer
//!
//! Append-only serializer for lap telemetry tables. The writer owns its
//! file handle exclusively for its lifetime; dropping it flushes and
//! closes the file on every exit path.

use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

use crate::timefmt;

use super::{LapFileError, EXTENSION, SEPARATOR};

/// Append-only writer for a single lap file.
///
/// The schema is written exactly once via [`write_headers`]; afterwards
/// rows are appended one line at a time. Each completed line reaches the
/// operating system as soon as the call returns, so a reader opening the
/// same path sees every row written so far.
///
/// [`write_headers`]: LapFileWriter::write_headers
pub struct LapFileWriter {
    /// Path of the backing file
    path: PathBuf,
    /// Backing file, line-buffered so every row is flushed on its newline
    file: LineWriter<File>,
    /// Whether the schema line has been written
    headers_written: bool,
    /// Number of columns fixed by the schema
    column_count: usize,
    /// Number of data rows written so far
    line_count: usize,
}

impl LapFileWriter {
    /// Create the backing file and a writer that owns it.
    ///
    /// The file exists on disk as soon as this returns, even before any
    /// headers or rows are written. An existing file at the same path is
    /// truncated.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, LapFileError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        tracing::debug!("created lap file {}", path.display());

        Ok(Self {
            path,
            file: LineWriter::new(file),
            headers_written: false,
            column_count: 0,
            line_count: 0,
        })
    }

    /// Create a lap file in `dir` named after the wall clock and the lap time,
    /// e.g. `2026-08-07 14.03.59 1.23.456.csv`.
    pub fn create_timestamped<P: AsRef<Path>>(
        dir: P,
        lap_time: f32,
    ) -> Result<Self, LapFileError> {
        let name = format!(
            "{} {}.{}",
            chrono::Local::now().format("%Y-%m-%d %H.%M.%S"),
            timefmt::format_file_stamp(lap_time),
            EXTENSION
        );
        Self::create(dir.as_ref().join(name))
    }

    /// Path of the backing file
    pub fn filename(&self) -> &Path {
        &self.path
    }

    /// Whether the schema line has been written
    pub fn headers_written(&self) -> bool {
        self.headers_written
    }

    /// Number of columns fixed by the schema, 0 before headers are written
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Number of data rows written so far
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Write the schema line.
    ///
    /// Fails with [`LapFileError::HeadersAlreadyWritten`] on a second call
    /// for the lifetime of this writer, and with
    /// [`LapFileError::SeparatorInHeader`] if any name contains the
    /// reserved separator. Nothing is written unless every name is valid.
    pub fn write_headers<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), LapFileError> {
        if self.headers_written {
            return Err(LapFileError::HeadersAlreadyWritten);
        }

        for name in names {
            if name.as_ref().contains(SEPARATOR) {
                return Err(LapFileError::SeparatorInHeader(name.as_ref().to_string()));
            }
        }

        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                write!(self.file, "{}", SEPARATOR)?;
            }
            write!(self.file, "{}", name.as_ref())?;
        }
        writeln!(self.file)?;

        self.headers_written = true;
        self.column_count = names.len();
        Ok(())
    }

    /// Append one row without validating its shape.
    ///
    /// Intended for hot paths where the caller already guarantees the row
    /// matches the schema. Use [`write_row_safe`] at any boundary where
    /// input is untrusted.
    ///
    /// [`write_row_safe`]: LapFileWriter::write_row_safe
    pub fn write_row(&mut self, values: &[f32]) -> Result<(), LapFileError> {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                write!(self.file, "{}", SEPARATOR)?;
            }
            write!(self.file, "{}", value)?;
        }
        writeln!(self.file)?;

        self.line_count += 1;
        Ok(())
    }

    /// Append one row, validating it against the schema first.
    ///
    /// Fails with [`LapFileError::HeadersNotWritten`] if no schema has been
    /// written yet, and with [`LapFileError::ColumnMismatch`] if the row
    /// length differs from the schema's column count.
    pub fn write_row_safe(&mut self, values: &[f32]) -> Result<(), LapFileError> {
        if !self.headers_written {
            return Err(LapFileError::HeadersNotWritten);
        }
        if values.len() != self.column_count {
            return Err(LapFileError::ColumnMismatch {
                expected: self.column_count,
                actual: values.len(),
            });
        }
        self.write_row(values)
    }

    /// Flush buffered bytes to the operating system.
    ///
    /// Rows are already flushed line by line; this only matters after a
    /// write that failed mid-line.
    pub fn flush(&mut self) -> Result<(), LapFileError> {
        self.file.flush()?;
        Ok(())
    }
}
