//! Versioned wrapper holding every record of one category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, RecordId, timestamp};

/// Persisted document shape:
/// `{ "symbols": [...], "last_updated": "<ISO-8601>", "version": n }`.
///
/// Record order is insertion order. The version starts at 1 and grows by
/// exactly one on every save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<F> {
    /// Records in insertion order.
    pub symbols: Vec<Record<F>>,

    /// Time of the last save.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub last_updated: DateTime<Utc>,

    /// Monotonic write counter.
    pub version: u64,
}

impl<F> Collection<F> {
    /// A fresh collection: no records, version 1, stamped now.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            symbols: Vec::new(),
            last_updated: Utc::now(),
            version: 1,
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` when the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Looks up a record by identifier.
    #[must_use]
    pub fn find(&self, id: &RecordId) -> Option<&Record<F>> {
        self.symbols.iter().find(|r| &r.id == id)
    }

    /// Looks up a record by identifier for in-place replacement.
    pub fn find_mut(&mut self, id: &RecordId) -> Option<&mut Record<F>> {
        self.symbols.iter_mut().find(|r| &r.id == id)
    }

    /// Removes and returns the record with the given identifier.
    pub fn remove(&mut self, id: &RecordId) -> Option<Record<F>> {
        let index = self.symbols.iter().position(|r| &r.id == id)?;
        Some(self.symbols.remove(index))
    }

    /// Marks the collection as written: bumps the version and the timestamp.
    pub fn touch(&mut self) {
        self.version = self.version.saturating_add(1);
        self.last_updated = Utc::now();
    }
}

impl<F> Default for Collection<F> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::FuturesFields;

    fn record(symbol: &str) -> Record<FuturesFields> {
        Record::create(FuturesFields {
            symbol: symbol.to_string(),
            ticker: "BTC".to_string(),
            exchange: "okx".to_string(),
        })
    }

    #[test]
    fn empty_starts_at_version_one() {
        let collection = Collection::<FuturesFields>::empty();
        assert_eq!(collection.version, 1);
        assert!(collection.is_empty());
    }

    #[test]
    fn touch_bumps_version_once() {
        let mut collection = Collection::<FuturesFields>::empty();
        let before = collection.last_updated;
        collection.touch();
        assert_eq!(collection.version, 2);
        assert!(collection.last_updated >= before);
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut collection = Collection::empty();
        let a = record("A");
        let b = record("B");
        let c = record("C");
        let b_id = b.id.clone();
        collection.symbols.extend([a, b, c]);

        let removed = collection.remove(&b_id);
        assert!(removed.is_some());
        let order: Vec<&str> = collection
            .symbols
            .iter()
            .map(|r| r.fields.symbol.as_str())
            .collect();
        assert_eq!(order, ["A", "C"]);
        assert!(collection.remove(&b_id).is_none());
    }

    #[test]
    fn loads_document_with_naive_timestamps() {
        let json = r#"{
            "symbols": [{
                "id": "f3b1",
                "symbol": "BTCUSDT",
                "ticker": "BTC",
                "exchange": "binance",
                "created_at": "2024-05-01T09:30:00.000001",
                "updated_at": "2024-05-01T09:30:00.000001"
            }],
            "last_updated": "2024-05-01T09:30:00.000001",
            "version": 7
        }"#;
        let Ok(collection) = serde_json::from_str::<Collection<FuturesFields>>(json) else {
            panic!("document failed to parse");
        };
        assert_eq!(collection.version, 7);
        assert_eq!(collection.len(), 1);
        assert!(collection.find(&RecordId::from("f3b1")).is_some());
    }
}
