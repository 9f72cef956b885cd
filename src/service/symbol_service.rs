//! Aggregate over the three category services.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::CollectionService;
use crate::config::ManagerConfig;
use crate::domain::{CexFields, Category, DexFields, FuturesFields};
use crate::error::SymbolError;
use crate::persistence::TextProjector;

/// Record counts, generated-file sizes, and existence flags.
#[derive(Debug, Clone)]
pub struct FileStatus {
    /// Number of DEX records.
    pub dex_symbols_count: usize,
    /// Number of CEX records.
    pub cex_symbols_count: usize,
    /// Number of futures records.
    pub futures_symbols_count: usize,
    /// Size of `pooladdress.txt` in bytes.
    pub dex_file_size: u64,
    /// Size of `cex_symbols.txt` in bytes.
    pub cex_file_size: u64,
    /// Size of `futures_symbols.txt` in bytes.
    pub futures_file_size: u64,
    /// Later of the DEX and CEX collections' last-updated timestamps.
    pub last_updated: DateTime<Utc>,
    /// Whether `pooladdress.txt` exists.
    pub pooladdress_file_exists: bool,
    /// Whether `cex_symbols.txt` exists.
    pub cex_symbols_file_exists: bool,
    /// Whether `futures_symbols.txt` exists.
    pub futures_symbols_file_exists: bool,
}

/// Owns one [`CollectionService`] per category.
///
/// Constructed once at startup and shared with every request through
/// [`crate::app_state::AppState`].
#[derive(Debug)]
pub struct SymbolService {
    dex: Arc<CollectionService<DexFields>>,
    cex: Arc<CollectionService<CexFields>>,
    futures: Arc<CollectionService<FuturesFields>>,
}

impl SymbolService {
    /// Builds all category services from `config`.
    #[must_use]
    pub fn new(config: &ManagerConfig) -> Self {
        Self {
            dex: Arc::new(CollectionService::from_config(config)),
            cex: Arc::new(CollectionService::from_config(config)),
            futures: Arc::new(CollectionService::from_config(config)),
        }
    }

    /// DEX pool service.
    #[must_use]
    pub fn dex(&self) -> &Arc<CollectionService<DexFields>> {
        &self.dex
    }

    /// CEX mapping service.
    #[must_use]
    pub fn cex(&self) -> &Arc<CollectionService<CexFields>> {
        &self.cex
    }

    /// Futures symbol service.
    #[must_use]
    pub fn futures(&self) -> &Arc<CollectionService<FuturesFields>> {
        &self.futures
    }

    /// Text projector of `category`.
    #[must_use]
    pub fn projector(&self, category: Category) -> &TextProjector {
        match category {
            Category::Dex => self.dex.projector(),
            Category::Cex => self.cex.projector(),
            Category::Futures => self.futures.projector(),
        }
    }

    /// Prepares every category: creates missing documents and regenerates
    /// all text files from the persisted state.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered.
    pub async fn bootstrap(&self) -> Result<(), SymbolError> {
        self.dex.bootstrap().await?;
        self.cex.bootstrap().await?;
        self.futures.bootstrap().await?;
        Ok(())
    }

    /// Collects counts, sizes, and existence flags of the generated files.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] if a document cannot be read.
    pub async fn file_status(&self) -> Result<FileStatus, SymbolError> {
        let dex = self.dex.collection().await?;
        let cex = self.cex.collection().await?;
        let futures = self.futures.collection().await?;

        let dex_file = self.dex.projector();
        let cex_file = self.cex.projector();
        let futures_file = self.futures.projector();

        Ok(FileStatus {
            dex_symbols_count: dex.len(),
            cex_symbols_count: cex.len(),
            futures_symbols_count: futures.len(),
            dex_file_size: dex_file.size().await,
            cex_file_size: cex_file.size().await,
            futures_file_size: futures_file.size().await,
            last_updated: dex.last_updated.max(cex.last_updated),
            pooladdress_file_exists: dex_file.exists().await,
            cex_symbols_file_exists: cex_file.exists().await,
            futures_symbols_file_exists: futures_file.exists().await,
        })
    }

    /// Backs up every existing document now, without modifying any.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered.
    pub async fn backup_all(&self) -> Result<Vec<PathBuf>, SymbolError> {
        let created = [
            self.dex.backup().await?,
            self.cex.backup().await?,
            self.futures.backup().await?,
        ];
        Ok(created.into_iter().flatten().collect())
    }
}
