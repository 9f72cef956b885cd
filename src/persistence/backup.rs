//! Bounded backup history of collection documents.
//!
//! Before a document is overwritten it is copied to
//! `{backups_dir}/{stem}_{YYYYMMDD_HHMMSS}.json`. Names sort chronologically,
//! so pruning keeps the lexicographically last `retention` files per stem.
//! Backups are never read back by the service; restoring is manual.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::SymbolError;

const BACKUP_TIME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Copies documents into the backup directory and prunes old copies.
#[derive(Debug, Clone)]
pub struct BackupRotator {
    dir: PathBuf,
    retention: usize,
}

impl BackupRotator {
    /// Creates a rotator writing into `dir`, keeping at most `retention`
    /// backups per document (at least one).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, retention: usize) -> Self {
        Self {
            dir: dir.into(),
            retention: retention.max(1),
        }
    }

    /// Backs up `source` using the current time.
    ///
    /// Returns the backup path, or `None` when `source` does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] if copying or pruning fails.
    pub async fn snapshot(&self, source: &Path) -> Result<Option<PathBuf>, SymbolError> {
        self.snapshot_at(source, Utc::now()).await
    }

    /// Backs up `source` stamped with `at`, then prunes old backups.
    ///
    /// Two snapshots within the same second share a name; the later one
    /// replaces the earlier.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] if copying or pruning fails, or
    /// [`SymbolError::Internal`] if `source` has no usable file stem.
    pub async fn snapshot_at(
        &self,
        source: &Path,
        at: DateTime<Utc>,
    ) -> Result<Option<PathBuf>, SymbolError> {
        let stem = document_stem(source)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self
            .dir
            .join(format!("{stem}_{}.json", at.format(BACKUP_TIME_FORMAT)));

        match tokio::fs::copy(source, &target).await {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }
        tracing::info!(backup = %target.display(), "backup created");

        self.prune(stem).await?;
        Ok(Some(target))
    }

    /// Lists the backups of the document with the given stem, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] if the directory cannot be read.
    pub async fn list(&self, stem: &str) -> Result<Vec<PathBuf>, SymbolError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut backups = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry
                .file_name()
                .to_str()
                .is_some_and(|name| is_backup_of(name, stem))
            {
                backups.push(entry.path());
            }
        }
        backups.sort();
        Ok(backups)
    }

    async fn prune(&self, stem: &str) -> Result<(), SymbolError> {
        let backups = self.list(stem).await?;
        let excess = backups.len().saturating_sub(self.retention);
        for old in backups.iter().take(excess) {
            tokio::fs::remove_file(old).await?;
        }
        if excess > 0 {
            tracing::debug!(stem, removed = excess, "pruned old backups");
        }
        Ok(())
    }
}

fn document_stem(source: &Path) -> Result<&str, SymbolError> {
    source
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| SymbolError::Internal(format!("no file stem in {}", source.display())))
}

/// `true` for `{stem}_{YYYYMMDD_HHMMSS}.json`.
fn is_backup_of(name: &str, stem: &str) -> bool {
    name.strip_prefix(stem)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix(".json"))
        .is_some_and(|ts| NaiveDateTime::parse_from_str(ts, BACKUP_TIME_FORMAT).is_ok())
}
