//! Output sinks for normalized records.
//!
//! Expanded atomic records are written as NDJSON (one object per line);
//! decomposition results are written as a single pretty-printed JSON
//! document with `orders` and `order_items` arrays.

use serde::Serialize;
use std::io::Write;

use crate::decompose::Decomposition;

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    JsonError(serde_json::Error),
    IoError(std::io::Error),
}

impl From<serde_json::Error> for OutputError {
    fn from(err: serde_json::Error) -> Self {
        OutputError::JsonError(err)
    }
}

impl From<std::io::Error> for OutputError {
    fn from(err: std::io::Error) -> Self {
        OutputError::IoError(err)
    }
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::JsonError(e) => write!(f, "JSON error: {}", e),
            OutputError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {}

/// NDJSON (Newline Delimited JSON) writer
///
/// Writes records as NDJSON, one JSON object per line, in the order they
/// are given.
pub struct NdjsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonWriter<W> {
    /// Create a new NDJSON writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single record as an NDJSON line
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<(), OutputError> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    /// Write multiple records
    pub fn write_all<T: Serialize>(&mut self, records: &[T]) -> Result<(), OutputError> {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write a decomposition as a pretty-printed JSON document.
///
/// The document has the shape `{ "orders": [...], "order_items": [...] }`,
/// with both arrays in the order the decomposition produced them.
pub fn write_decomposition<W: Write>(
    mut writer: W,
    decomposition: &Decomposition,
) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(decomposition)?;
    writeln!(writer, "{}", json)?;
    writer.flush()?;
    Ok(())
}
