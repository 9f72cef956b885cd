//! Persistence layer: JSON collection documents, backups, and text files.
//!
//! [`CollectionStore`] owns one category's JSON document and snapshots it
//! through [`BackupRotator`] before each overwrite. [`TextProjector`]
//! renders a collection into the plain-text file consumed by the external
//! trading process. All file replacement goes through
//! [`atomic_file::write_atomic`].

pub mod atomic_file;
pub mod backup;
pub mod collection_store;
pub mod text_projection;

pub use backup::BackupRotator;
pub use collection_store::CollectionStore;
pub use text_projection::TextProjector;
