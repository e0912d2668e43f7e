use std::path::PathBuf;
use thiserror::Error;

use crate::db::DatabaseError;
use crate::record::Symbology;

#[derive(Error, Debug)]
pub enum CodescanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Import/export error: {0}")]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("No QR code or barcode found in the image")]
    NoCode,

    #[error("No valid code recognized")]
    EmptyPayload,

    #[error("Recognition failed: {0}")]
    Decode(#[from] crate::scan::DecodeError),

    #[error("Failed to read image '{path}': {source}")]
    ReadImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to spawn frame analyzer: {0}")]
    SpawnFailed(String),

    #[error("Failed to save scan result: {0}")]
    Store(#[from] DatabaseError),
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Import failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Import failed: expected a JSON array of records")]
    NotAnArray,

    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to store imported records: {0}")]
    Store(#[from] DatabaseError),
}

/// Failures reported by a barcode encode adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The input is formally malformed for the symbology.
    #[error("{0}")]
    InvalidContent(String),

    /// The encoder itself failed.
    #[error("{0}")]
    Internal(String),

    #[error("{0} generation is not supported by this encoder")]
    Unsupported(Symbology),
}

/// User-facing diagnosis of a failed barcode generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Please enter the content to encode")]
    EmptyInput,

    #[error(
        "EAN-13 needs exactly 12 or 13 digits, got {length} characters. \
         Try CODE_128 or QR_CODE for other content"
    )]
    Ean13WrongLength { length: usize },

    #[error(
        "EAN-13 accepts digits only, found '{character}' at position {position}. \
         Try CODE_128 or QR_CODE for text content"
    )]
    Ean13NonDigit { character: char, position: usize },

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Generation failed: {0}")]
    EncoderFailed(String),

    #[error("{0} generation is not supported")]
    Unsupported(Symbology),
}

impl From<EncodeError> for GenerateError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::InvalidContent(msg) => GenerateError::InvalidContent(msg),
            EncodeError::Internal(msg) => GenerateError::EncoderFailed(msg),
            EncodeError::Unsupported(symbology) => GenerateError::Unsupported(symbology),
        }
    }
}

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Content must not be empty")]
    EmptyContent,

    #[error("Record {0} not found")]
    NotFound(crate::record::RecordId),

    #[error("{0}")]
    Store(#[from] DatabaseError),
}

pub type Result<T> = std::result::Result<T, CodescanError>;
