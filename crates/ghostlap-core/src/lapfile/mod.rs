//! Lap Files
//!
//! Persists lap telemetry as a delimited text table: one schema line
//! followed by one line per sample row. All fields are single-precision
//! numbers except the schema's channel names.

mod error;
mod reader;
mod writer;

pub use error::LapFileError;
pub use reader::{read_lap_file, LapData};
pub use writer::LapFileWriter;

/// Reserved field separator. Channel names must not contain it.
pub const SEPARATOR: char = ',';

/// File extension used for lap files
pub const EXTENSION: &str = "csv";
