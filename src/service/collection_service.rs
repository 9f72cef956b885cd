//! Per-category add/update/delete orchestration.

use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::config::ManagerConfig;
use crate::domain::{Collection, Record, RecordId, SymbolFields};
use crate::error::SymbolError;
use crate::persistence::{BackupRotator, CollectionStore, TextProjector};

/// Mutation service for one symbol category.
///
/// Every mutation follows the pattern: validate → acquire the category
/// write lock → load → check invariants → apply → save (backup + version
/// bump) → regenerate the text file → return the record. The lock is held
/// for the whole cycle, so concurrent writers to the same category are
/// applied one after another instead of overwriting each other.
#[derive(Debug)]
pub struct CollectionService<F> {
    store: CollectionStore<F>,
    projector: TextProjector,
    write_lock: Mutex<()>,
}

impl<F: SymbolFields> CollectionService<F> {
    /// Creates a service over an existing store and projector.
    #[must_use]
    pub fn new(store: CollectionStore<F>, projector: TextProjector) -> Self {
        Self {
            store,
            projector,
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a service with the directories and retention from `config`.
    #[must_use]
    pub fn from_config(config: &ManagerConfig) -> Self {
        let backups = BackupRotator::new(config.backups_dir(), config.backup_retention);
        Self::new(
            CollectionStore::new(&config.data_dir, backups),
            TextProjector::new(&config.output_dir, F::CATEGORY),
        )
    }

    /// Text projector for this category.
    #[must_use]
    pub fn projector(&self) -> &TextProjector {
        &self.projector
    }

    /// Creates the document if absent and regenerates the text file, so the
    /// file reflects the last persisted state after an unclean restart.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] on filesystem failure.
    pub async fn bootstrap(&self) -> Result<(), SymbolError> {
        let _guard = self.write_lock.lock().await;
        self.store.initialize().await?;
        let collection = self.store.load().await?;
        self.projector.project(&collection).await?;
        tracing::info!(
            category = %F::CATEGORY,
            records = collection.len(),
            version = collection.version,
            "category ready"
        );
        Ok(())
    }

    /// Returns the current collection, including its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] if the document cannot be read.
    pub async fn collection(&self) -> Result<Collection<F>, SymbolError> {
        self.store.load().await
    }

    /// Returns all records in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] if the document cannot be read.
    pub async fn list(&self) -> Result<Vec<Record<F>>, SymbolError> {
        Ok(self.store.load().await?.symbols)
    }

    /// Returns one record.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::NotFound`] if no record has `id`.
    pub async fn get(&self, id: &RecordId) -> Result<Record<F>, SymbolError> {
        let collection = self.store.load().await?;
        collection
            .find(id)
            .cloned()
            .ok_or_else(|| not_found::<F>(id))
    }

    /// Validates `request` and appends it as a new record.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::InvalidInput`] on validation failure,
    /// [`SymbolError::Conflict`] if the category's uniqueness rule is
    /// violated, or a storage error if saving fails.
    pub async fn add(&self, request: F::Request) -> Result<Record<F>, SymbolError> {
        let fields = F::from_request(request)?;

        let _guard = self.write_lock.lock().await;
        let mut collection = self.store.load().await?;

        if let Some(conflict) = find_conflict(&collection, &fields, None) {
            return Err(SymbolError::Conflict(conflict));
        }

        let record = Record::create(fields);
        collection.symbols.push(record.clone());
        self.commit(&mut collection).await?;

        tracing::info!(category = %F::CATEGORY, id = %record.id, "symbol added");
        Ok(record)
    }

    /// Replaces every mutable field of record `id` with `request`.
    ///
    /// The identifier and creation time are preserved; `updated_at` is
    /// stamped now. Uniqueness is checked against all other records.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::InvalidInput`] on validation failure,
    /// [`SymbolError::NotFound`] if no record has `id` (the document is
    /// left untouched), [`SymbolError::Conflict`] if the new fields
    /// duplicate another record, or a storage error if saving fails.
    pub async fn update(
        &self,
        id: &RecordId,
        request: F::Request,
    ) -> Result<Record<F>, SymbolError> {
        let fields = F::from_request(request)?;

        let _guard = self.write_lock.lock().await;
        let mut collection = self.store.load().await?;

        if collection.find(id).is_none() {
            return Err(not_found::<F>(id));
        }
        if let Some(conflict) = find_conflict(&collection, &fields, Some(id)) {
            return Err(SymbolError::Conflict(conflict));
        }

        let slot = collection
            .find_mut(id)
            .ok_or_else(|| not_found::<F>(id))?;
        let updated = slot.revise(fields);
        *slot = updated.clone();
        self.commit(&mut collection).await?;

        tracing::info!(category = %F::CATEGORY, id = %updated.id, "symbol updated");
        Ok(updated)
    }

    /// Removes record `id` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::NotFound`] if no record has `id`, or a
    /// storage error if saving fails.
    pub async fn delete(&self, id: &RecordId) -> Result<Record<F>, SymbolError> {
        let _guard = self.write_lock.lock().await;
        let mut collection = self.store.load().await?;

        let removed = collection.remove(id).ok_or_else(|| not_found::<F>(id))?;
        self.commit(&mut collection).await?;

        tracing::info!(category = %F::CATEGORY, id = %removed.id, "symbol deleted");
        Ok(removed)
    }

    /// Rewrites the text file from the persisted collection.
    ///
    /// Read-only with respect to the document: no backup, no version bump.
    /// Returns the number of records written.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] if reading or writing fails.
    pub async fn regenerate(&self) -> Result<usize, SymbolError> {
        let _guard = self.write_lock.lock().await;
        let collection = self.store.load().await?;
        self.projector.project(&collection).await?;
        Ok(collection.len())
    }

    /// Backs up the current document without modifying it.
    ///
    /// Returns `None` if the document does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] if the copy fails.
    pub async fn backup(&self) -> Result<Option<PathBuf>, SymbolError> {
        let _guard = self.write_lock.lock().await;
        self.store.backups().snapshot(self.store.path()).await
    }

    async fn commit(&self, collection: &mut Collection<F>) -> Result<(), SymbolError> {
        self.store.save(collection).await?;
        self.projector.project(collection).await
    }
}

fn find_conflict<F: SymbolFields>(
    collection: &Collection<F>,
    fields: &F,
    exclude: Option<&RecordId>,
) -> Option<String> {
    collection
        .symbols
        .iter()
        .filter(|r| exclude.is_none_or(|id| &r.id != id))
        .find_map(|r| fields.conflict_with(&r.fields))
}

fn not_found<F: SymbolFields>(id: &RecordId) -> SymbolError {
    SymbolError::NotFound {
        category: F::CATEGORY,
        id: id.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::domain::{
        CexFields, CexSymbolRequest, DexFields, DexSymbolRequest, FuturesFields,
        FuturesSymbolRequest,
    };

    const ADDR: &str = "0xAbC0000000000000000000000000000000000001";

    fn service<F: SymbolFields>(dir: &Path) -> CollectionService<F> {
        CollectionService::from_config(&ManagerConfig::for_dirs(
            dir.join("data"),
            dir.join("out"),
        ))
    }

    fn dex_request(address: &str, name: &str, quantity: i64) -> DexSymbolRequest {
        DexSymbolRequest {
            dex_type: "uniswap_v2".to_string(),
            pool_address: address.to_string(),
            pool_name: name.to_string(),
            altcoin_quantity: quantity.into(),
        }
    }

    async fn version<F: SymbolFields>(service: &CollectionService<F>) -> u64 {
        let Ok(collection) = service.collection().await else {
            panic!("load failed");
        };
        collection.version
    }

    async fn projected_lines<F: SymbolFields>(service: &CollectionService<F>) -> usize {
        let Ok(text) = service.projector().read().await else {
            panic!("projection missing");
        };
        text.lines().count()
    }

    #[tokio::test]
    async fn add_normalizes_and_projects() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let service = service::<DexFields>(dir.path());
        assert!(service.bootstrap().await.is_ok());

        let Ok(record) = service.add(dex_request(ADDR, "weth-usdc", 5)).await else {
            panic!("add failed");
        };
        assert_eq!(record.fields.pool_name, "WETH-USDC");

        let Ok(records) = service.list().await else {
            panic!("list failed");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records.first().map(|r| &r.id), Some(&record.id));

        let Ok(text) = service.projector().read().await else {
            panic!("projection missing");
        };
        assert_eq!(
            text.lines().last(),
            Some(format!("uniswap_v2:{ADDR}:WETH-USDC:5").as_str())
        );
        assert_eq!(
            projected_lines(&service).await,
            DexFields::projection_header().len() + 1
        );
    }

    #[tokio::test]
    async fn add_rejects_address_differing_only_in_case() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let service = service::<DexFields>(dir.path());
        assert!(service.add(dex_request(ADDR, "a", 1)).await.is_ok());
        let before = version(&service).await;

        let result = service
            .add(dex_request(&ADDR.to_lowercase(), "b", 2))
            .await;
        assert!(matches!(result, Err(SymbolError::Conflict(_))));
        assert_eq!(version(&service).await, before);
    }

    #[tokio::test]
    async fn invalid_input_does_not_touch_document() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let service = service::<DexFields>(dir.path());
        assert!(service.bootstrap().await.is_ok());
        let before = version(&service).await;

        let result = service.add(dex_request(ADDR, "a", 0)).await;
        assert!(matches!(result, Err(SymbolError::InvalidInput(_))));
        assert_eq!(version(&service).await, before);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found_and_keeps_version() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let service = service::<DexFields>(dir.path());
        assert!(service.add(dex_request(ADDR, "a", 1)).await.is_ok());
        let before = version(&service).await;

        let result = service
            .update(&RecordId::from("nope"), dex_request(ADDR, "b", 2))
            .await;
        assert!(matches!(result, Err(SymbolError::NotFound { .. })));
        assert_eq!(version(&service).await, before);
    }

    #[tokio::test]
    async fn update_preserves_identity_and_replaces_fields() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let service = service::<DexFields>(dir.path());
        let Ok(original) = service.add(dex_request(ADDR, "old", 1)).await else {
            panic!("add failed");
        };

        let Ok(updated) = service
            .update(&original.id, dex_request(ADDR, "new", 9))
            .await
        else {
            panic!("update failed");
        };
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.fields.pool_name, "NEW");
        assert_eq!(updated.fields.altcoin_quantity, 9);

        let Ok(stored) = service.get(&original.id).await else {
            panic!("get failed");
        };
        assert_eq!(stored.fields.altcoin_quantity, 9);
    }

    #[tokio::test]
    async fn update_cannot_duplicate_another_record() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let service = service::<DexFields>(dir.path());
        let other = "0x0000000000000000000000000000000000000002";
        assert!(service.add(dex_request(ADDR, "a", 1)).await.is_ok());
        let Ok(second) = service.add(dex_request(other, "b", 1)).await else {
            panic!("add failed");
        };

        let result = service
            .update(&second.id, dex_request(&ADDR.to_uppercase().replace("0X", "0x"), "b", 1))
            .await;
        assert!(matches!(result, Err(SymbolError::Conflict(_))));
    }

    #[tokio::test]
    async fn delete_removes_one_and_bumps_version_once() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let service = service::<CexFields>(dir.path());
        let request = |ticker: &str| CexSymbolRequest {
            ticker_name: ticker.to_string(),
            exchange_name: "binance".to_string(),
            symbol: None,
        };
        let Ok(first) = service.add(request("btc")).await else {
            panic!("add failed");
        };
        assert!(service.add(request("eth")).await.is_ok());
        let before = version(&service).await;

        assert!(service.delete(&first.id).await.is_ok());

        let Ok(collection) = service.collection().await else {
            panic!("load failed");
        };
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.version, before + 1);
        assert_eq!(projected_lines(&service).await, 1);

        let again = service.delete(&first.id).await;
        assert!(matches!(again, Err(SymbolError::NotFound { .. })));
    }

    #[tokio::test]
    async fn regenerate_does_not_bump_version() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let service = service::<FuturesFields>(dir.path());
        let request = FuturesSymbolRequest {
            symbol: "BTCUSDT".to_string(),
            ticker: "BTC".to_string(),
            exchange: "binance".to_string(),
        };
        assert!(service.add(request).await.is_ok());
        let before = version(&service).await;

        if tokio::fs::remove_file(service.projector().path()).await.is_err() {
            panic!("remove projection");
        }
        assert!(matches!(service.regenerate().await, Ok(1)));
        assert_eq!(version(&service).await, before);
        assert_eq!(projected_lines(&service).await, 1);
    }

    #[tokio::test]
    async fn multiline_field_cannot_add_extra_lines() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let service = service::<CexFields>(dir.path());
        assert!(service.bootstrap().await.is_ok());
        let added = service
            .add(CexSymbolRequest {
                ticker_name: "ETH".to_string(),
                exchange_name: "okx".to_string(),
                symbol: None,
            })
            .await;
        assert!(added.is_ok());
        let before = version(&service).await;

        let result = service
            .add(CexSymbolRequest {
                ticker_name: "BTC".to_string(),
                exchange_name: "binance\nETH:evil".to_string(),
                symbol: None,
            })
            .await;
        assert!(matches!(result, Err(SymbolError::InvalidInput(_))));
        assert_eq!(version(&service).await, before);
        assert!(matches!(service.list().await, Ok(r) if r.len() == 1));
        assert_eq!(projected_lines(&service).await, 1);
    }

    #[tokio::test]
    async fn futures_accept_duplicates() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let service = service::<FuturesFields>(dir.path());
        let request = || FuturesSymbolRequest {
            symbol: "ETHUSDT".to_string(),
            ticker: "ETH".to_string(),
            exchange: "okx".to_string(),
        };
        assert!(service.add(request()).await.is_ok());
        assert!(service.add(request()).await.is_ok());
        assert!(matches!(service.list().await, Ok(r) if r.len() == 2));
    }

    #[tokio::test]
    async fn concurrent_adds_are_all_kept() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let service = std::sync::Arc::new(service::<FuturesFields>(dir.path()));

        let mut handles = Vec::new();
        for i in 0..8 {
            let service = std::sync::Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service
                    .add(FuturesSymbolRequest {
                        symbol: format!("S{i}"),
                        ticker: "T".to_string(),
                        exchange: "X".to_string(),
                    })
                    .await
                    .is_ok()
            }));
        }
        for handle in handles {
            assert!(matches!(handle.await, Ok(true)));
        }

        assert!(matches!(service.list().await, Ok(r) if r.len() == 8));
    }
}
