//! Shared test utilities for codescan integration tests.
//!
//! - `TestHarness`: a file-backed database and export directory in a temp dir
//! - `ScriptedDecoder`: replays a fixed list of decode results
//! - `FakeEncoder`: blank canvases or a scripted failure
//! - `FailingStore`: rejects every operation

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use codescan::db::DatabaseError;
use codescan::error::EncodeError;
use codescan::scan::DecodeError;
use codescan::{
    BarcodeEncoder, CanvasSize, Database, DecodedCode, Decoder, NewScanResult, RecordId,
    RecordStore, RecordUpdate, ScanResult, Symbology,
};
use image::GrayImage;
use tempfile::TempDir;

pub struct TestHarness {
    temp_dir: TempDir,
    pub export_dir: PathBuf,
    pub db: Arc<Database>,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let export_dir = temp_dir.path().join("exports");
        let db = Database::open(&temp_dir.path().join("data").join("codescan.db"))
            .expect("Failed to open database");
        Self {
            temp_dir,
            export_dir,
            db: Arc::new(db),
        }
    }

    pub fn store(&self) -> Arc<dyn RecordStore> {
        self.db.clone()
    }

    pub fn path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    pub fn seed(&self, content: &str, remark: Option<&str>, code_type: &str, timestamp: i64) {
        self.db
            .insert(&NewScanResult::new(
                content,
                remark.map(str::to_string),
                code_type,
                timestamp,
            ))
            .expect("Failed to seed record");
    }
}

/// Returns queued results in order, then nothing.
pub struct ScriptedDecoder {
    script: Mutex<VecDeque<Result<Vec<DecodedCode>, DecodeError>>>,
}

impl ScriptedDecoder {
    pub fn new(script: Vec<Result<Vec<DecodedCode>, DecodeError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }

    /// Every call yields the same single code.
    pub fn repeating(payload: &str, symbology: Symbology, times: usize) -> Self {
        Self::new(
            (0..times)
                .map(|_| Ok(vec![DecodedCode::new(payload, symbology)]))
                .collect(),
        )
    }
}

impl Decoder for ScriptedDecoder {
    fn decode(&self, _image: &GrayImage) -> Result<Vec<DecodedCode>, DecodeError> {
        self.script
            .lock()
            .expect("decoder script poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub enum FakeEncoder {
    Blank,
    Fail(EncodeError),
}

impl BarcodeEncoder for FakeEncoder {
    fn encode(
        &self,
        _text: &str,
        _symbology: Symbology,
        size: CanvasSize,
    ) -> Result<GrayImage, EncodeError> {
        match self {
            FakeEncoder::Blank => Ok(GrayImage::new(size.width, size.height)),
            FakeEncoder::Fail(e) => Err(e.clone()),
        }
    }
}

pub struct FailingStore;

impl RecordStore for FailingStore {
    fn insert(&self, _: &NewScanResult) -> Result<ScanResult, DatabaseError> {
        Err(DatabaseError::LockPoisoned)
    }

    fn insert_many(&self, _: &[NewScanResult]) -> Result<usize, DatabaseError> {
        Err(DatabaseError::LockPoisoned)
    }

    fn update(&self, _: RecordId, _: &RecordUpdate) -> Result<ScanResult, DatabaseError> {
        Err(DatabaseError::LockPoisoned)
    }

    fn delete(&self, _: RecordId) -> Result<bool, DatabaseError> {
        Err(DatabaseError::LockPoisoned)
    }

    fn delete_all(&self) -> Result<usize, DatabaseError> {
        Err(DatabaseError::LockPoisoned)
    }

    fn list_recent(&self) -> Result<Vec<ScanResult>, DatabaseError> {
        Err(DatabaseError::LockPoisoned)
    }

    fn find_by_id(&self, _: RecordId) -> Result<Option<ScanResult>, DatabaseError> {
        Err(DatabaseError::LockPoisoned)
    }
}

pub fn frame() -> GrayImage {
    GrayImage::new(32, 32)
}
