mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use codescan::codec::format_timestamp;
use codescan::generate::save_png;
use codescan::{
    init_logging, load_or_default, ConfirmationFlow, Database, Generator, History, Language,
    Localize, LogFormat, PendingCandidate, QrDecoder, RecordStore, StandardEncoder, Symbology,
};

use cli::{Cli, Commands};

fn open_store(path: &Path) -> Result<Arc<dyn RecordStore>> {
    let db = Database::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    Ok(Arc::new(db))
}

/// Turns a library error into its message in the configured language.
fn localized<E: Localize>(language: Language) -> impl Fn(E) -> anyhow::Error {
    move |err| anyhow!(err.localized(language))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_logging(if cli.verbose { "debug" } else { "warn" }, format);

    let config = load_or_default(cli.config.as_deref()).context("Failed to load config")?;
    let language = config.language.resolve();
    let database_path = cli
        .database
        .clone()
        .unwrap_or_else(|| config.database_path.clone());

    match cli.command {
        Commands::List => {
            let history = History::new(open_store(&database_path)?);
            let records = history.list().map_err(localized(language))?;
            if records.is_empty() {
                println!("No records");
            }
            for record in records {
                let remark = record
                    .remark
                    .map(|r| format!("  ({})", r))
                    .unwrap_or_default();
                println!(
                    "{:>5}  {}  {:<12}  {}{}",
                    record.id,
                    format_timestamp(record.timestamp),
                    record.code_type,
                    record.content,
                    remark
                );
            }
        }

        Commands::Add {
            content,
            remark,
            code_type,
        } => {
            if content.is_empty() {
                bail!("Content must not be empty");
            }
            let flow = ConfirmationFlow::new(open_store(&database_path)?);
            let pending = PendingCandidate::manual(content, Symbology::from_tag(&code_type));
            let saved = flow
                .save(pending, remark.as_deref().unwrap_or(""))
                .map_err(localized(language))?;
            println!("Saved record {}", saved.id);
        }

        Commands::Scan {
            image,
            remark,
            discard,
        } => {
            let flow = ConfirmationFlow::new(open_store(&database_path)?);
            let pending = flow
                .scan_image_file(&QrDecoder, &image)
                .map_err(localized(language))?;
            let shown = flow.present(&pending);
            println!("{}  {}", shown.code_type, shown.payload);

            if discard {
                flow.discard(pending);
                println!("Discarded");
            } else {
                let saved = flow
                    .save(pending, remark.as_deref().unwrap_or(""))
                    .map_err(localized(language))?;
                println!("Saved record {}", saved.id);
            }
        }

        Commands::Edit {
            id,
            content,
            remark,
        } => {
            let history = History::new(open_store(&database_path)?);
            let updated = history
                .edit(id, &content, remark)
                .map_err(localized(language))?;
            println!("Updated record {}", updated.id);
        }

        Commands::Delete { id } => {
            let history = History::new(open_store(&database_path)?);
            history.delete(id).map_err(localized(language))?;
            println!("Deleted record {}", id);
        }

        Commands::Clear { yes } => {
            let store = open_store(&database_path)?;
            if !yes {
                let pending = store.count()?;
                bail!("Refusing to delete all {} records without --yes", pending);
            }
            let history = History::new(store);
            let removed = history.clear_all().map_err(localized(language))?;
            println!("Deleted {} records", removed);
        }

        Commands::Export { dir } => {
            let history = History::new(open_store(&database_path)?);
            let dir = dir.unwrap_or(config.export_directory);
            let path = history.export_all(&dir).map_err(localized(language))?;
            println!("Exported to {}", path.display());
        }

        Commands::Import { file } => {
            let history = History::new(open_store(&database_path)?);
            let report = history.import_file(&file).map_err(localized(language))?;
            println!("{}", report.localized(language));
        }

        Commands::Generate { text, format, out } => {
            let symbology = Symbology::from(format);
            let generator = Generator::with_config(StandardEncoder::new(), config.generator);
            let image = generator
                .generate(&text, symbology)
                .map_err(localized(language))?;
            save_png(&image, &out).map_err(localized(language))?;
            println!("Saved {} to {}", symbology, out.display());
        }
    }

    Ok(())
}
