use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use codescan::Symbology;

#[derive(Parser)]
#[command(name = "codescan")]
#[command(about = "Scan history, JSON import/export and barcode generation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.codescan/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overrides the config
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List saved records, most recent first
    List,

    /// Save a code entered by hand
    Add {
        content: String,

        #[arg(short, long)]
        remark: Option<String>,

        /// Symbology tag such as QR_CODE or EAN_13
        #[arg(long, default_value = "UNKNOWN")]
        code_type: String,
    },

    /// Scan a code from an image file and save it
    Scan {
        image: PathBuf,

        #[arg(short, long)]
        remark: Option<String>,

        /// Show the result without saving it
        #[arg(long, conflicts_with = "remark")]
        discard: bool,
    },

    /// Replace a record's content and, optionally, its remark
    Edit {
        id: i64,

        content: String,

        /// New remark; omit to keep the current one, pass "" to clear it
        #[arg(short, long)]
        remark: Option<String>,
    },

    /// Delete one record
    Delete { id: i64 },

    /// Delete every record
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Export all records to a JSON file
    Export {
        /// Output directory (default: from config)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Import records from a JSON export file
    Import { file: PathBuf },

    /// Render a code to a PNG file
    Generate {
        text: String,

        #[arg(short, long, value_enum)]
        format: CodeFormat,

        #[arg(short, long)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CodeFormat {
    Qr,
    Ean13,
    Code128,
}

impl From<CodeFormat> for Symbology {
    fn from(format: CodeFormat) -> Self {
        match format {
            CodeFormat::Qr => Symbology::QrCode,
            CodeFormat::Ean13 => Symbology::Ean13,
            CodeFormat::Code128 => Symbology::Code128,
        }
    }
}
