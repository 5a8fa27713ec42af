use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::portfolio::defaults::default_document;
use crate::portfolio::edits::{DocumentError, Edit};
use crate::portfolio::export::parse_export;
use crate::portfolio::models::Document;

/// One published document value. Versions start at 1 and grow by one per
/// successful edit or replacement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub version: u64,
    pub updated_at: DateTime<Utc>,
    pub document: Document,
}

impl Snapshot {
    fn initial(document: Document) -> Self {
        Self {
            version: 1,
            updated_at: Utc::now(),
            document,
        }
    }

    fn next(&self, document: Document) -> Self {
        Self {
            version: self.version + 1,
            updated_at: Utc::now(),
            document,
        }
    }
}

/// Holds the single portfolio document and publishes every new version.
///
/// Edits are serialized through the watch channel's write lock: each one
/// reads the current snapshot, computes a whole replacement and swaps it in
/// before the next edit can look. Subscribers only ever see complete
/// snapshots, and a failed edit publishes nothing.
pub struct DocumentStore {
    tx: watch::Sender<Arc<Snapshot>>,
}

impl DocumentStore {
    pub fn new(document: Document) -> Self {
        let (tx, _) = watch::channel(Arc::new(Snapshot::initial(document)));
        Self { tx }
    }

    pub fn current(&self) -> Arc<Snapshot> {
        self.tx.borrow().clone()
    }

    /// Receiver that always yields the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.tx.subscribe()
    }

    /// Applies `edit` to whatever the current document is.
    pub fn apply(&self, edit: &Edit) -> Result<Arc<Snapshot>, DocumentError> {
        self.commit(None, edit)
    }

    /// Applies `edit` only if the store is still at `expected_version`.
    ///
    /// Index arguments are positional, so a caller holding an older version
    /// would otherwise edit whatever entry has since shifted into place.
    pub fn apply_if_current(
        &self,
        expected_version: u64,
        edit: &Edit,
    ) -> Result<Arc<Snapshot>, DocumentError> {
        self.commit(Some(expected_version), edit)
    }

    /// Installs a whole document, e.g. one read back from an export snippet.
    pub fn replace(&self, document: Document) -> Arc<Snapshot> {
        let mut installed = None;
        self.tx.send_modify(|current| {
            let next = Arc::new(current.next(document));
            installed = Some(next.clone());
            *current = next;
        });
        let snapshot = installed.unwrap_or_else(|| self.current());
        info!("Replaced portfolio document (version {})", snapshot.version);
        snapshot
    }

    fn commit(
        &self,
        expected_version: Option<u64>,
        edit: &Edit,
    ) -> Result<Arc<Snapshot>, DocumentError> {
        let mut outcome = None;
        self.tx.send_if_modified(|current| {
            let result = match expected_version {
                Some(expected) if expected != current.version => {
                    Err(DocumentError::StaleVersion {
                        expected,
                        current: current.version,
                    })
                }
                _ => current.document.apply(edit),
            };
            match result {
                Ok(document) => {
                    let next = Arc::new(current.next(document));
                    outcome = Some(Ok(next.clone()));
                    *current = next;
                    true
                }
                Err(err) => {
                    outcome = Some(Err(err));
                    false
                }
            }
        });

        let outcome = outcome.unwrap_or_else(|| Ok(self.current()));
        match &outcome {
            Ok(snapshot) => info!(
                "Applied {} (version {})",
                edit.op_name(),
                snapshot.version
            ),
            Err(err) => debug!("Rejected {}: {err}", edit.op_name()),
        }
        outcome
    }
}

/// Logs each published snapshot until the store is dropped.
pub async fn log_published_versions(mut rx: watch::Receiver<Arc<Snapshot>>) {
    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        debug!(
            "Published portfolio version {} at {}",
            snapshot.version, snapshot.updated_at
        );
    }
}

/// Document to start from: the seed snippet if one is configured, else the
/// embedded default.
pub fn initial_document(seed_path: Option<&Path>) -> Result<Document> {
    match seed_path {
        Some(path) => {
            let snippet = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read seed snippet {}", path.display()))?;
            let document = parse_export(&snippet)
                .with_context(|| format!("Failed to parse seed snippet {}", path.display()))?;
            info!("Loaded portfolio document from {}", path.display());
            Ok(document)
        }
        None => default_document().context("Embedded default portfolio is invalid"),
    }
}
