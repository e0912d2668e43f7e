//! Single-flight scan gate.
//!
//! Converts the per-frame stream of decode results into at most one
//! outstanding [`PendingCandidate`]. The gate closes when a candidate is
//! emitted and reopens only when that candidate is disposed of.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::decoder::{DecodedCode, Region};
use crate::record::Symbology;

/// A decode result awaiting user disposition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Candidate {
    pub payload: String,
    pub symbology: Symbology,
    pub region: Option<Region>,
}

impl From<DecodedCode> for Candidate {
    fn from(code: DecodedCode) -> Self {
        Self {
            payload: code.payload,
            symbology: code.symbology,
            region: code.region,
        }
    }
}

/// Open/closed flag shared by the analysis thread and the interactive side.
#[derive(Debug)]
pub struct ScanGate {
    open: AtomicBool,
}

impl ScanGate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            open: AtomicBool::new(true),
        })
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Offers one decode event to the gate.
    ///
    /// Returns a candidate only for a non-empty payload arriving while the
    /// gate is open; the gate is closed atomically in the same step. Events
    /// arriving while closed are dropped, not queued.
    pub fn offer(self: &Arc<Self>, code: DecodedCode) -> Option<PendingCandidate> {
        if code.payload.is_empty() {
            return None;
        }

        if self
            .open
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::trace!("Gate closed, dropping {} event", code.symbology);
            return None;
        }

        log::debug!(
            "Gate closed on {} candidate ({} bytes)",
            code.symbology,
            code.payload.len()
        );
        Some(PendingCandidate {
            candidate: code.into(),
            gate: Some(Arc::clone(self)),
        })
    }

    fn reopen(&self) {
        self.open.store(true, Ordering::Release);
    }
}

/// Move-only handle on the outstanding candidate.
///
/// Consumed by exactly one of save or discard. If the handle is dropped
/// without either, the gate still reopens so scanning never stalls.
#[derive(Debug)]
pub struct PendingCandidate {
    candidate: Candidate,
    gate: Option<Arc<ScanGate>>,
}

impl PendingCandidate {
    /// A candidate obtained outside the frame stream (gallery image, manual
    /// entry). No gate is involved.
    pub fn ungated(candidate: Candidate) -> Self {
        Self {
            candidate,
            gate: None,
        }
    }

    pub fn manual(payload: impl Into<String>, symbology: Symbology) -> Self {
        Self::ungated(Candidate {
            payload: payload.into(),
            symbology,
            region: None,
        })
    }

    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn is_gated(&self) -> bool {
        self.gate.is_some()
    }

    /// Releases the gate and hands back the candidate.
    pub(crate) fn finish(mut self) -> Candidate {
        self.release();
        std::mem::take(&mut self.candidate)
    }

    fn release(&mut self) {
        if let Some(gate) = self.gate.take() {
            gate.reopen();
        }
    }
}

impl Drop for PendingCandidate {
    fn drop(&mut self) {
        if self.gate.is_some() {
            log::warn!("Candidate dropped without save or discard, reopening gate");
            self.release();
        }
    }
}
