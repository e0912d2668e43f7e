//! Field naming schemes of the record exchange format and the timestamp
//! pattern shared by export and import.

use std::borrow::Cow;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// Local date-time pattern used in exchange files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One record field of the exchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Content,
    CodeType,
    Remark,
    Timestamp,
}

/// Key names used by one schema generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldNames {
    pub content: &'static str,
    pub code_type: &'static str,
    pub remark: &'static str,
    pub timestamp: &'static str,
}

impl FieldNames {
    pub fn key(&self, field: Field) -> &'static str {
        match field {
            Field::Content => self.content,
            Field::CodeType => self.code_type,
            Field::Remark => self.remark,
            Field::Timestamp => self.timestamp,
        }
    }
}

/// Written by export and preferred on import.
pub const CURRENT_SCHEMA: FieldNames = FieldNames {
    content: "数据",
    code_type: "类型",
    remark: "备注",
    timestamp: "时间",
};

/// Earlier English key names, still accepted on import.
pub const LEGACY_SCHEMA: FieldNames = FieldNames {
    content: "content",
    code_type: "codeType",
    remark: "remark",
    timestamp: "timestamp",
};

/// Schemas tried on import, highest priority first. Resolution is per
/// field, so a record may mix key names.
pub const FIELD_SCHEMAS: &[FieldNames] = &[CURRENT_SCHEMA, LEGACY_SCHEMA];

/// Reads a field from a record object, trying each schema in priority order.
///
/// `null` counts as absent. Numbers and booleans are read as their JSON
/// text; arrays and objects are ignored.
pub fn resolve<'a>(object: &'a Map<String, Value>, field: Field) -> Option<Cow<'a, str>> {
    FIELD_SCHEMAS.iter().find_map(|schema| {
        match object.get(schema.key(field))? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    })
}

/// Formats epoch milliseconds as a local `YYYY-MM-DD HH:MM:SS` string.
pub fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Parses a local `YYYY-MM-DD HH:MM:SS` string to epoch milliseconds.
///
/// For times that occur twice on a DST change the earlier instant wins.
pub fn parse_timestamp(text: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), TIMESTAMP_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}
