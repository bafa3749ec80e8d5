//! JSON rendering of result entities.
//!
//! Results serialize to indented UTF-8 JSON with field names matching the
//! result structs. File export is an isolated boundary: a storage failure
//! is caught and logged, and the computation's result stays with the
//! caller.

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::ExportError;

/// Renders a result entity as indented JSON.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes a result entity to `path` as indented JSON.
///
/// Returns `true` on success. Serialization and I/O failures are logged
/// and reported as `false`, never propagated.
pub fn write_json_file<T: Serialize>(value: &T, path: &Path) -> bool {
    let outcome = to_pretty_json(value).and_then(|json| Ok(fs::write(path, json)?));
    match outcome {
        Ok(()) => {
            log::debug!("exported results to {}", path.display());
            true
        }
        Err(err) => {
            log::error!("export to {} failed: {}", path.display(), err);
            false
        }
    }
}
