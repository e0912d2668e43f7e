//! Record export.
//!
//! The writer produces a pretty-printed JSON array under the current field
//! schema. String values go through a minimal escaper that only handles
//! backslash and double quote; control characters such as newlines are
//! written as-is, so content containing them does not produce strict JSON.

use std::fmt::Write;

use super::schema::{format_timestamp, Field, CURRENT_SCHEMA};
use crate::record::ScanResult;

/// Backslash-escapes `\` and `"`. Nothing else is touched.
pub fn escape_minimal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Serializes records in the given order.
pub fn encode_records(records: &[ScanResult]) -> String {
    if records.is_empty() {
        return "[]".to_string();
    }

    let mut json = String::from("[\n");
    for (index, record) in records.iter().enumerate() {
        let fields = [
            (Field::Content, escape_minimal(&record.content)),
            (Field::CodeType, escape_minimal(&record.code_type)),
            (
                Field::Remark,
                escape_minimal(record.remark.as_deref().unwrap_or("")),
            ),
            (Field::Timestamp, format_timestamp(record.timestamp)),
        ];

        json.push_str("  {\n");
        for (position, (field, value)) in fields.iter().enumerate() {
            let separator = if position + 1 < fields.len() { "," } else { "" };
            // Writing to a String cannot fail.
            let _ = writeln!(
                json,
                "    \"{}\": \"{}\"{}",
                CURRENT_SCHEMA.key(*field),
                value,
                separator
            );
        }
        json.push_str("  }");
        if index + 1 < records.len() {
            json.push(',');
        }
        json.push('\n');
    }
    json.push(']');
    json
}
