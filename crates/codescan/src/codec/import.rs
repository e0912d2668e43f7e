//! Record import.
//!
//! Parsing is all-or-nothing at the document level: anything that is not a
//! JSON array fails the whole import before a single record is written.
//! Inside the array, anomalies are handled per record: empty content skips
//! the record, an unreadable timestamp is replaced by the import time.

use std::fmt;

use serde_json::{Map, Value};
use tracing::{debug, info, info_span, warn};

use super::schema::{parse_timestamp, resolve, Field};
use crate::error::CodecError;
use crate::record::{now_millis, NewScanResult, Symbology};
use crate::store::RecordStore;

/// Records recovered from an import document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBatch {
    pub records: Vec<NewScanResult>,
    /// Number of elements in the source array.
    pub total: usize,
}

/// Outcome of an import, shown to the user as "inserted of total".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub total: usize,
}

impl ImportReport {
    pub fn skipped(&self) -> usize {
        self.total - self.inserted
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.inserted, self.total)
    }
}

/// Parses an import document into new records.
///
/// `now` is substituted for timestamps that do not match the exchange
/// pattern. Source ids, if any, are ignored.
pub fn decode_records(text: &str, now: i64) -> Result<DecodedBatch, CodecError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let document: Value = serde_json::from_str(text)?;
    let Value::Array(elements) = document else {
        return Err(CodecError::NotAnArray);
    };

    let total = elements.len();
    let records: Vec<NewScanResult> = elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| match element {
            Value::Object(object) => decode_record(object, now).or_else(|| {
                debug!(index, "Skipping record without content");
                None
            }),
            _ => {
                debug!(index, "Skipping non-object element");
                None
            }
        })
        .collect();

    Ok(DecodedBatch { records, total })
}

fn decode_record(object: &Map<String, Value>, now: i64) -> Option<NewScanResult> {
    let content = resolve(object, Field::Content)?;
    if content.is_empty() {
        return None;
    }

    let code_type = resolve(object, Field::CodeType)
        .map(|c| c.into_owned())
        .unwrap_or_else(|| Symbology::Unknown.as_str().to_string());
    let remark = resolve(object, Field::Remark).map(|r| r.into_owned());
    let timestamp = match resolve(object, Field::Timestamp) {
        Some(text) => parse_timestamp(&text).unwrap_or_else(|| {
            warn!("Unreadable timestamp in import, using current time");
            now
        }),
        None => now,
    };

    Some(NewScanResult::new(
        content.into_owned(),
        remark,
        code_type,
        timestamp,
    ))
}

/// Parses `text` and inserts every usable record into `store`.
///
/// Import only ever adds records; existing ones are neither replaced nor
/// deduplicated. The batch is written atomically.
pub fn import_into(store: &dyn RecordStore, text: &str) -> Result<ImportReport, CodecError> {
    let span = info_span!("import", bytes = text.len());
    let _enter = span.enter();

    let batch = decode_records(text, now_millis())?;
    let inserted = store.insert_many(&batch.records)?;
    let report = ImportReport {
        inserted,
        total: batch.total,
    };

    info!(inserted = report.inserted, total = report.total, "Import finished");
    Ok(report)
}
