//! JSON document store for one symbol collection.

use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use super::atomic_file::write_atomic;
use super::backup::BackupRotator;
use crate::domain::{Collection, SymbolFields};
use crate::error::SymbolError;

/// Loads and saves the [`Collection`] of one category.
///
/// Saving always backs up the current document first, bumps the version
/// by one, and replaces the file atomically. Loading never fails on a
/// missing or malformed document; both yield an empty collection.
#[derive(Debug)]
pub struct CollectionStore<F> {
    path: PathBuf,
    backups: BackupRotator,
    _fields: PhantomData<fn() -> F>,
}

impl<F: SymbolFields> CollectionStore<F> {
    /// Creates a store for `F`'s category inside `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path, backups: BackupRotator) -> Self {
        Self {
            path: data_dir.join(F::CATEGORY.document_file()),
            backups,
            _fields: PhantomData,
        }
    }

    /// Path of the backing JSON document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Backup rotator used on every save.
    #[must_use]
    pub fn backups(&self) -> &BackupRotator {
        &self.backups
    }

    /// Creates the data directory and, if absent, an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] on filesystem failure.
    pub async fn initialize(&self) -> Result<(), SymbolError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        if !tokio::fs::try_exists(&self.path).await? {
            let mut collection = Collection::empty();
            self.save(&mut collection).await?;
            tracing::info!(category = %F::CATEGORY, path = %self.path.display(), "created collection document");
        }
        Ok(())
    }

    /// Reads the collection from disk.
    ///
    /// A missing or unparsable document yields [`Collection::empty`]; the
    /// latter is logged as a warning. CEX records written before the raw
    /// symbol existed are upgraded here.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] for I/O failures other than a
    /// missing file (e.g. permission denied).
    pub async fn load(&self) -> Result<Collection<F>, SymbolError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Collection::empty()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Collection<F>>(&raw) {
            Ok(mut collection) => {
                for record in &mut collection.symbols {
                    record.fields.upgrade_legacy();
                }
                Ok(collection)
            }
            Err(e) => {
                tracing::warn!(
                    category = %F::CATEGORY,
                    path = %self.path.display(),
                    error = %e,
                    "collection document is corrupted, continuing with an empty collection"
                );
                Ok(Collection::empty())
            }
        }
    }

    /// Persists `collection`, updating its version and timestamp in place.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] or [`SymbolError::Serialization`]
    /// if the backup or the write fails. On error the document on disk is
    /// left as it was.
    pub async fn save(&self, collection: &mut Collection<F>) -> Result<(), SymbolError> {
        self.backups.snapshot(&self.path).await?;

        collection.touch();
        let json = serde_json::to_vec_pretty(collection)?;
        write_atomic(&self.path, &json).await?;

        tracing::debug!(
            category = %F::CATEGORY,
            version = collection.version,
            records = collection.len(),
            "collection saved"
        );
        Ok(())
    }
}
