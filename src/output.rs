//! JSON serialization of a [`SnapshotResult`].
//!
//! Pretty output is indented with two spaces. Non-ASCII text is written as-is.

use crate::{SnapshotError, SnapshotResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serializes the snapshot into a JSON string.
pub fn to_json(result: &SnapshotResult, pretty: bool) -> Result<String, SnapshotError> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

/// Writes the snapshot to `path`, replacing any existing file.
///
/// The file handle is dropped on every exit path; a partially written file may
/// remain if serialization or the write fails.
pub fn write_snapshot(
    result: &SnapshotResult,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SnapshotError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, result)?;
    } else {
        serde_json::to_writer(&mut writer, result)?;
    }
    writer.write_all(b"\n").map_err(|e| SnapshotError::io(path, e))?;
    writer.flush().map_err(|e| SnapshotError::io(path, e))?;
    Ok(())
}
