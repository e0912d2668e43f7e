//! Persisted scan records and the symbology tags attached to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Barcode standard a payload was encoded under.
///
/// Tags follow the decode adapter's naming (`"QR_CODE"`, `"EAN_13"`, ...).
/// Anything the adapter cannot classify maps to [`Symbology::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Symbology {
    #[serde(rename = "CODE_128")]
    Code128,
    #[serde(rename = "CODE_39")]
    Code39,
    #[serde(rename = "CODE_93")]
    Code93,
    Codabar,
    #[serde(rename = "EAN_13")]
    Ean13,
    #[serde(rename = "EAN_8")]
    Ean8,
    QrCode,
    #[serde(rename = "UPC_A")]
    UpcA,
    #[serde(rename = "UPC_E")]
    UpcE,
    #[serde(rename = "PDF417")]
    Pdf417,
    Aztec,
    DataMatrix,
    Itf,
    #[default]
    Unknown,
}

impl Symbology {
    pub const ALL: [Symbology; 14] = [
        Symbology::Code128,
        Symbology::Code39,
        Symbology::Code93,
        Symbology::Codabar,
        Symbology::Ean13,
        Symbology::Ean8,
        Symbology::QrCode,
        Symbology::UpcA,
        Symbology::UpcE,
        Symbology::Pdf417,
        Symbology::Aztec,
        Symbology::DataMatrix,
        Symbology::Itf,
        Symbology::Unknown,
    ];

    /// Canonical tag stored in the `code_type` column and in export files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbology::Code128 => "CODE_128",
            Symbology::Code39 => "CODE_39",
            Symbology::Code93 => "CODE_93",
            Symbology::Codabar => "CODABAR",
            Symbology::Ean13 => "EAN_13",
            Symbology::Ean8 => "EAN_8",
            Symbology::QrCode => "QR_CODE",
            Symbology::UpcA => "UPC_A",
            Symbology::UpcE => "UPC_E",
            Symbology::Pdf417 => "PDF417",
            Symbology::Aztec => "AZTEC",
            Symbology::DataMatrix => "DATA_MATRIX",
            Symbology::Itf => "ITF",
            Symbology::Unknown => "UNKNOWN",
        }
    }

    /// Returns the symbology for a tag, or `Unknown` if the tag is not recognised.
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_str() == tag)
            .unwrap_or(Symbology::Unknown)
    }

    /// Two-dimensional formats render on a square canvas.
    pub fn is_matrix(&self) -> bool {
        matches!(
            self,
            Symbology::QrCode | Symbology::Pdf417 | Symbology::Aztec | Symbology::DataMatrix
        )
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbology {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

/// Store-assigned record identifier.
pub type RecordId = i64;

/// A saved scan record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub id: RecordId,
    pub content: String,
    /// `None` is distinct from an empty note; empty notes are never stored.
    pub remark: Option<String>,
    /// Symbology tag, kept verbatim so imported tags round-trip exactly.
    pub code_type: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ScanResult {
    pub fn symbology(&self) -> Symbology {
        Symbology::from_tag(&self.code_type)
    }
}

/// A record that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScanResult {
    pub content: String,
    pub remark: Option<String>,
    pub code_type: String,
    pub timestamp: i64,
}

impl NewScanResult {
    /// Builds a record, normalising an empty remark to absent.
    pub fn new(
        content: impl Into<String>,
        remark: Option<String>,
        code_type: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            content: content.into(),
            remark: normalize_remark(remark),
            code_type: code_type.into(),
            timestamp,
        }
    }

    pub fn with_id(self, id: RecordId) -> ScanResult {
        ScanResult {
            id,
            content: self.content,
            remark: self.remark,
            code_type: self.code_type,
            timestamp: self.timestamp,
        }
    }
}

/// User edit of an existing record. Only content and remark are mutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUpdate {
    pub content: String,
    pub remark: Option<String>,
}

impl RecordUpdate {
    pub fn new(content: impl Into<String>, remark: Option<String>) -> Self {
        Self {
            content: content.into(),
            remark: normalize_remark(remark),
        }
    }
}

pub(crate) fn normalize_remark(remark: Option<String>) -> Option<String> {
    remark.filter(|r| !r.is_empty())
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbology_tags_round_trip() {
        for s in Symbology::ALL {
            assert_eq!(Symbology::from_tag(s.as_str()), s);
        }
    }

    #[test]
    fn test_unrecognised_tag_is_unknown() {
        assert_eq!(Symbology::from_tag("MAXICODE"), Symbology::Unknown);
        assert_eq!(Symbology::from_tag(""), Symbology::Unknown);
        assert_eq!("qr_code".parse::<Symbology>().unwrap(), Symbology::Unknown);
    }

    #[test]
    fn test_serde_uses_canonical_tags() {
        let json = serde_json::to_string(&Symbology::Ean13).unwrap();
        assert_eq!(json, "\"EAN_13\"");
        let back: Symbology = serde_json::from_str("\"QR_CODE\"").unwrap();
        assert_eq!(back, Symbology::QrCode);
        let pdf: Symbology = serde_json::from_str("\"PDF417\"").unwrap();
        assert_eq!(pdf, Symbology::Pdf417);
    }

    #[test]
    fn test_matrix_formats() {
        assert!(Symbology::QrCode.is_matrix());
        assert!(Symbology::DataMatrix.is_matrix());
        assert!(!Symbology::Ean13.is_matrix());
        assert!(!Symbology::Code128.is_matrix());
    }

    #[test]
    fn test_empty_remark_becomes_absent() {
        let rec = NewScanResult::new("abc", Some(String::new()), "QR_CODE", 1);
        assert!(rec.remark.is_none());

        let rec = NewScanResult::new("abc", Some("note".into()), "QR_CODE", 1);
        assert_eq!(rec.remark.as_deref(), Some("note"));

        let update = RecordUpdate::new("abc", Some(String::new()));
        assert!(update.remark.is_none());
    }

    #[test]
    fn test_with_id_keeps_fields() {
        let rec = NewScanResult::new("payload", None, "EAN_13", 42).with_id(7);
        assert_eq!(rec.id, 7);
        assert_eq!(rec.content, "payload");
        assert_eq!(rec.symbology(), Symbology::Ean13);
        assert_eq!(rec.timestamp, 42);
    }
}
