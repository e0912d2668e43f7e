pub mod broadcast;
pub mod codec;
pub mod config;
pub mod db;
pub mod error;
pub mod generate;
pub mod history;
pub mod logging;
pub mod messages;
pub mod record;
pub mod scan;
pub mod store;

pub use broadcast::{ScanEvent, ScanEventBroadcaster, ScanEventKind};
pub use codec::{export_file_name, import_file, write_export, ImportReport, EXPORT_MIME_TYPE};
pub use config::{load_config, load_or_default, AppConfig, GeneratorConfig, Language};
pub use db::{Database, DatabaseError};
pub use error::{
    CodecError, CodescanError, ConfigError, EncodeError, GenerateError, HistoryError, Result,
    ScanError,
};
pub use generate::{
    BarcodeEncoder, CanvasSize, Generator, LinearEncoder, QrEncoder, StandardEncoder,
};
pub use history::{ActionOutcome, History, HistoryAction};
pub use logging::{init_logging, LogFormat};
pub use messages::Localize;
pub use record::{NewScanResult, RecordId, RecordUpdate, ScanResult, Symbology};
pub use scan::{
    AnalyzerConfig, Candidate, ConfirmationFlow, DecodedCode, Decoder, FrameAnalyzer,
    PendingCandidate, QrDecoder, ScanGate,
};
pub use store::RecordStore;
