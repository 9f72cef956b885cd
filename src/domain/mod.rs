//! Domain layer: record schema, identifiers, and the collection wrapper.
//!
//! Everything here is pure data and validation. The three categories share
//! one generic [`Record`] / [`Collection`] shape and differ only in their
//! [`SymbolFields`] implementation.

pub mod category;
pub mod cex;
pub mod collection;
pub mod dex;
pub mod futures;
pub mod record;
pub mod record_id;
pub mod timestamp;

pub use category::Category;
pub use cex::{CexFields, CexSymbolRequest};
pub use collection::Collection;
pub use dex::{DexFields, DexSymbolRequest, DexType, PoolAddress};
pub use futures::{FuturesFields, FuturesSymbolRequest};
pub use record::{Record, SymbolFields, ensure_single_line};
pub use record_id::RecordId;
