//! Service layer: mutation orchestration.
//!
//! [`CollectionService`] implements add/update/delete/regenerate for one
//! category on top of the persistence layer. [`SymbolService`] bundles the
//! three categories and answers cross-category queries.

pub mod collection_service;
pub mod symbol_service;

pub use collection_service::CollectionService;
pub use symbol_service::{FileStatus, SymbolService};
