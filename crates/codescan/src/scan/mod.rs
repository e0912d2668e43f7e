//! Scan capture: decode adapter seam, single-flight gate, frame analysis
//! worker and the confirmation flow.

pub mod analyzer;
pub mod confirm;
pub mod decoder;
pub mod gate;
pub mod qr;

pub use analyzer::{AnalyzerConfig, FrameAnalyzer, FrameDisposition};
pub use confirm::{load_gray_image, ConfirmationFlow, Presentation};
pub use decoder::{DecodeError, DecodedCode, Decoder, Region};
pub use gate::{Candidate, PendingCandidate, ScanGate};
pub use qr::QrDecoder;
