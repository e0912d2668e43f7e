//! Saved-record browsing and per-record actions.

use std::path::Path;
use std::sync::Arc;

use crate::broadcast::{ScanEventBroadcaster, ScanEventKind};
use crate::codec::{self, ImportReport};
use crate::error::{CodecError, HistoryError};
use crate::record::{RecordId, RecordUpdate, ScanResult};
use crate::store::RecordStore;

/// Action chosen on a single history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    /// A `None` remark leaves the stored one in place.
    Edit {
        content: String,
        remark: Option<String>,
    },
    Delete,
    /// Open the generator with this record's content.
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Updated(ScanResult),
    Deleted(RecordId),
    /// Text to prefill the generator input with.
    GeneratorPrefill(String),
}

pub struct History<S: ?Sized = dyn RecordStore> {
    store: Arc<S>,
    events: Option<ScanEventBroadcaster>,
}

impl<S: RecordStore + ?Sized> History<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            events: None,
        }
    }

    pub fn with_events(store: Arc<S>, events: ScanEventBroadcaster) -> Self {
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

    /// All records, most recent first.
    pub fn list(&self) -> Result<Vec<ScanResult>, HistoryError> {
        Ok(self.store.list_recent()?)
    }

    /// Replaces the content and, when given, the remark.
    ///
    /// `None` keeps the stored remark; `Some("")` clears it.
    pub fn edit(
        &self,
        id: RecordId,
        content: &str,
        remark: Option<String>,
    ) -> Result<ScanResult, HistoryError> {
        if content.is_empty() {
            return Err(HistoryError::EmptyContent);
        }
        let remark = match remark {
            Some(remark) => Some(remark),
            None => {
                self.store
                    .find_by_id(id)?
                    .ok_or(HistoryError::NotFound(id))?
                    .remark
            }
        };
        let change = RecordUpdate::new(content, remark);
        match self.store.update(id, &change) {
            Ok(updated) => Ok(updated),
            Err(crate::db::DatabaseError::NotFound { id }) => Err(HistoryError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn delete(&self, id: RecordId) -> Result<(), HistoryError> {
        if self.store.delete(id)? {
            log::debug!("Deleted record {}", id);
            Ok(())
        } else {
            Err(HistoryError::NotFound(id))
        }
    }

    /// Removes every record and returns how many were removed.
    pub fn clear_all(&self) -> Result<usize, HistoryError> {
        let removed = self.store.delete_all()?;
        self.emit(ScanEventKind::Cleared { removed });
        Ok(removed)
    }

    pub fn apply(
        &self,
        action: HistoryAction,
        record: &ScanResult,
    ) -> Result<ActionOutcome, HistoryError> {
        match action {
            HistoryAction::Edit { content, remark } => self
                .edit(record.id, &content, remark)
                .map(ActionOutcome::Updated),
            HistoryAction::Delete => self
                .delete(record.id)
                .map(|()| ActionOutcome::Deleted(record.id)),
            HistoryAction::Export => Ok(ActionOutcome::GeneratorPrefill(record.content.clone())),
        }
    }

    /// Writes every record to a new export file in `dir`.
    pub fn export_all(&self, dir: &Path) -> Result<std::path::PathBuf, CodecError> {
        codec::export_store(&self.store, dir)
    }

    /// Imports an export file, adding to the existing records.
    pub fn import_file(&self, path: &Path) -> Result<ImportReport, CodecError> {
        let report = codec::import_file(&self.store, path)?;
        self.emit(ScanEventKind::Imported {
            inserted: report.inserted,
            total: report.total,
        });
        Ok(report)
    }
}
