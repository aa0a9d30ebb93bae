//! Error types for lap file writing and loading

use thiserror::Error;

/// Errors that can occur while writing or loading a lap file
#[derive(Error, Debug)]
pub enum LapFileError {
    #[error("headers have already been written")]
    HeadersAlreadyWritten,

    #[error("header '{0}' contains the reserved separator character")]
    SeparatorInHeader(String),

    #[error("rows cannot be written before headers")]
    HeadersNotWritten,

    #[error("row has {actual} values but the schema has {expected} columns")]
    ColumnMismatch { expected: usize, actual: usize },

    #[error("missing schema line")]
    MissingSchema,

    #[error("row at line {line} has {actual} fields, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unparseable value '{value}' at line {line}")]
    InvalidValue { line: usize, value: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
