//! JSON exchange format for scan records.

pub mod export;
pub mod import;
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

pub use export::{encode_records, escape_minimal};
pub use import::{decode_records, import_into, DecodedBatch, ImportReport};
pub use schema::{
    format_timestamp, parse_timestamp, Field, FieldNames, CURRENT_SCHEMA, FIELD_SCHEMAS,
    LEGACY_SCHEMA, TIMESTAMP_FORMAT,
};

use crate::error::CodecError;
use crate::record::{now_millis, ScanResult};
use crate::store::RecordStore;

/// Media type announced when an export file is shared.
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// `scan_records_<millis>.json`
pub fn export_file_name(now_millis: i64) -> String {
    format!("scan_records_{}.json", now_millis)
}

/// Writes `records` to a fresh export file in `dir` and returns its path.
pub fn write_export(
    dir: &Path,
    records: &[ScanResult],
    now_millis: i64,
) -> Result<PathBuf, CodecError> {
    fs::create_dir_all(dir).map_err(|e| CodecError::WriteFile {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let path = dir.join(export_file_name(now_millis));
    fs::write(&path, encode_records(records)).map_err(|e| CodecError::WriteFile {
        path: path.clone(),
        source: e,
    })?;

    log::info!("Exported {} records to {}", records.len(), path.display());
    Ok(path)
}

/// Exports every stored record, most recent first.
pub fn export_store(store: &dyn RecordStore, dir: &Path) -> Result<PathBuf, CodecError> {
    let records = store.list_recent()?;
    write_export(dir, &records, now_millis())
}

/// Reads an export file and imports it into `store`.
pub fn import_file(store: &dyn RecordStore, path: &Path) -> Result<ImportReport, CodecError> {
    let text = fs::read_to_string(path).map_err(|e| CodecError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    import_into(store, &text)
}
