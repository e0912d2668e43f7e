//! Frame analysis worker.
//!
//! Camera frames are decoded one at a time on a dedicated background
//! thread. Results pass through the [`ScanGate`] and surviving candidates
//! are handed to the interactive side over a channel.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use image::GrayImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info, trace, warn};

use super::decoder::{DecodedCode, Decoder, Region};
use super::gate::{PendingCandidate, ScanGate};
use crate::error::ScanError;

/// Frame analysis settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// When set, only codes centred inside this window are accepted.
    #[serde(default)]
    pub scan_window: Option<Region>,
}

impl AnalyzerConfig {
    /// Picks the first readable code this configuration accepts.
    pub fn select(&self, codes: Vec<DecodedCode>) -> Option<DecodedCode> {
        codes.into_iter().find(|code| {
            if code.payload.is_empty() {
                return false;
            }
            match (&self.scan_window, &code.region) {
                (Some(window), Some(region)) => window.contains_center_of(region),
                // Without a region the code cannot be placed; accept it.
                _ => true,
            }
        })
    }
}

/// Outcome of [`FrameAnalyzer::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDisposition {
    Queued,
    /// A candidate is outstanding; frames are not decoded.
    GateClosed,
    /// The worker is still busy with the previous frame.
    Busy,
    Stopped,
}

pub struct FrameAnalyzer {
    frame_sender: Option<Sender<GrayImage>>,
    worker: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    gate: Arc<ScanGate>,
    dropped_frames: Arc<AtomicU64>,
}

impl FrameAnalyzer {
    /// Starts the analysis thread.
    ///
    /// Returns the analyzer and the receiving end for candidates. At most
    /// one candidate is outstanding at any time.
    pub fn spawn(
        decoder: Arc<dyn Decoder>,
        gate: Arc<ScanGate>,
        config: AnalyzerConfig,
    ) -> Result<(Self, Receiver<PendingCandidate>), ScanError> {
        let (frame_sender, frame_receiver) = bounded::<GrayImage>(1);
        let (candidate_sender, candidate_receiver) = bounded::<PendingCandidate>(1);
        let shutdown = Arc::new(AtomicBool::new(false));

        let worker_gate = Arc::clone(&gate);
        let shutdown_flag = Arc::clone(&shutdown);
        let worker = thread::Builder::new()
            .name("codescan-analyzer".into())
            .spawn(move || {
                run_analyzer(
                    frame_receiver,
                    candidate_sender,
                    worker_gate,
                    decoder,
                    config,
                    shutdown_flag,
                );
            })
            .map_err(|e| ScanError::SpawnFailed(e.to_string()))?;

        info!("Frame analyzer started");

        Ok((
            Self {
                frame_sender: Some(frame_sender),
                worker: Some(worker),
                shutdown,
                gate,
                dropped_frames: Arc::new(AtomicU64::new(0)),
            },
            candidate_receiver,
        ))
    }

    /// Hands a frame to the worker without blocking.
    pub fn submit(&self, frame: GrayImage) -> FrameDisposition {
        if self.shutdown.load(Ordering::Relaxed) {
            return FrameDisposition::Stopped;
        }
        if !self.gate.is_open() {
            return FrameDisposition::GateClosed;
        }
        let Some(sender) = &self.frame_sender else {
            return FrameDisposition::Stopped;
        };

        match sender.try_send(frame) {
            Ok(()) => FrameDisposition::Queued,
            Err(TrySendError::Full(_)) => {
                self.dropped_frames.fetch_add(1, Ordering::Relaxed);
                FrameDisposition::Busy
            }
            Err(TrySendError::Disconnected(_)) => FrameDisposition::Stopped,
        }
    }

    /// Frames discarded because the worker was busy.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped_frames.load(Ordering::Relaxed)
    }

    pub fn gate(&self) -> &Arc<ScanGate> {
        &self.gate
    }

    /// Stops the worker and waits for it to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        // Dropping the sender disconnects the worker's receiver.
        self.frame_sender.take();

        if let Some(worker) = self.worker.take() {
            if let Err(e) = worker.join() {
                warn!("Frame analyzer panicked: {:?}", e);
            } else {
                debug!("Frame analyzer stopped");
            }
        }
    }
}

impl Drop for FrameAnalyzer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_analyzer(
    frames: Receiver<GrayImage>,
    candidates: Sender<PendingCandidate>,
    gate: Arc<ScanGate>,
    decoder: Arc<dyn Decoder>,
    config: AnalyzerConfig,
    shutdown: Arc<AtomicBool>,
) {
    loop {
        if shutdown.load(Ordering::Relaxed) {
            debug!("Frame analyzer received shutdown signal");
            break;
        }

        let frame = match frames.recv_timeout(Duration::from_millis(100)) {
            Ok(frame) => frame,
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                debug!("Frame channel disconnected");
                break;
            }
        };

        // The gate may have closed while this frame was queued.
        if !gate.is_open() {
            continue;
        }

        let span = debug_span!("analyze_frame", width = frame.width(), height = frame.height());
        let _enter = span.enter();

        let codes = match decoder.decode(&frame) {
            Ok(codes) => codes,
            Err(e) => {
                warn!("Frame decode failed: {}", e);
                continue;
            }
        };

        let Some(code) = config.select(codes) else {
            trace!("No acceptable code in frame");
            continue;
        };

        if let Some(pending) = gate.offer(code) {
            debug!(code_type = %pending.candidate().symbology, "Candidate emitted");
            if candidates.send(pending).is_err() {
                // The pending candidate is dropped with the error, which reopens the gate.
                debug!("Candidate receiver gone, stopping analyzer");
                break;
            }
        }
    }
}
