//! Confirmation flow: the only path that turns a scan into a saved record.

use std::path::Path;
use std::sync::Arc;

use super::decoder::Decoder;
use super::gate::{Candidate, PendingCandidate};
use crate::broadcast::{ScanEventBroadcaster, ScanEventKind};
use crate::error::ScanError;
use crate::record::{now_millis, NewScanResult, ScanResult};
use crate::store::RecordStore;

/// What the confirmation surface shows for a pending candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub payload: String,
    pub code_type: String,
    /// Label for the optional note field.
    pub remark_hint: &'static str,
    /// The surface must not offer a plain dismiss; only save or discard.
    pub cancelable: bool,
}

pub struct ConfirmationFlow {
    store: Arc<dyn RecordStore>,
    events: Option<ScanEventBroadcaster>,
}

impl ConfirmationFlow {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            events: None,
        }
    }

    pub fn with_events(store: Arc<dyn RecordStore>, events: ScanEventBroadcaster) -> Self {
        Self {
            store,
            events: Some(events),
        }
    }

    fn emit(&self, kind: ScanEventKind) {
        if let Some(events) = &self.events {
            events.send(kind);
        }
    }

    /// Exposes the candidate to the user. Changes no state.
    pub fn present(&self, pending: &PendingCandidate) -> Presentation {
        let candidate = pending.candidate();
        self.emit(ScanEventKind::CandidatePresented {
            code_type: candidate.symbology.as_str().to_string(),
        });
        Presentation {
            payload: candidate.payload.clone(),
            code_type: candidate.symbology.as_str().to_string(),
            remark_hint: "Remark (optional)",
            cancelable: false,
        }
    }

    /// Saves the candidate with an optional note, then reopens the gate.
    ///
    /// The gate reopens after the store write returns, whether or not the
    /// write succeeded. A failed write leaves no record behind.
    pub fn save(&self, pending: PendingCandidate, remark: &str) -> Result<ScanResult, ScanError> {
        let record = {
            let candidate = pending.candidate();
            NewScanResult::new(
                candidate.payload.clone(),
                Some(remark.to_string()),
                candidate.symbology.as_str(),
                now_millis(),
            )
        };

        let written = self.store.insert(&record);
        let candidate = pending.finish();

        match written {
            Ok(saved) => {
                log::info!("Saved {} record {}", candidate.symbology, saved.id);
                self.emit(ScanEventKind::Saved {
                    id: saved.id,
                    code_type: saved.code_type.clone(),
                });
                Ok(saved)
            }
            Err(e) => {
                log::error!("Failed to save {} scan result: {}", candidate.symbology, e);
                self.emit(ScanEventKind::SaveFailed {
                    message: e.to_string(),
                });
                Err(ScanError::Store(e))
            }
        }
    }

    /// Drops the candidate without writing anything and reopens the gate.
    pub fn discard(&self, pending: PendingCandidate) -> Candidate {
        let candidate = pending.finish();
        log::debug!("Discarded {} candidate", candidate.symbology);
        self.emit(ScanEventKind::Discarded);
        candidate
    }

    /// Decodes a still image chosen by the user.
    ///
    /// The first code found becomes the candidate. No gate is involved since
    /// this is a single explicit action.
    pub fn scan_image(
        &self,
        decoder: &dyn Decoder,
        image: &image::GrayImage,
    ) -> Result<PendingCandidate, ScanError> {
        let codes = decoder.decode(image)?;
        let first = codes.into_iter().next().ok_or(ScanError::NoCode)?;
        if first.payload.is_empty() {
            return Err(ScanError::EmptyPayload);
        }
        Ok(PendingCandidate::ungated(first.into()))
    }

    /// Loads an image file and decodes it like [`scan_image`](Self::scan_image).
    pub fn scan_image_file(
        &self,
        decoder: &dyn Decoder,
        path: &Path,
    ) -> Result<PendingCandidate, ScanError> {
        let image = load_gray_image(path)?;
        self.scan_image(decoder, &image)
    }
}

/// Reads an image file and converts it to 8-bit grayscale.
pub fn load_gray_image(path: &Path) -> Result<image::GrayImage, ScanError> {
    let image = image::open(path).map_err(|e| ScanError::ReadImage {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(image.to_luma8())
}
