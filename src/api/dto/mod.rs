//! Data Transfer Objects for REST responses.
//!
//! Symbol records are serialized directly from the domain types; only the
//! file and acknowledgement endpoints need dedicated shapes.

pub mod common_dto;
pub mod file_dto;

pub use common_dto::*;
pub use file_dto::*;
