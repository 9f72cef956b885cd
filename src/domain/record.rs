//! Generic symbol record and the per-category field contract.
//!
//! Every category stores [`Record<F>`]: an identifier and two timestamps
//! wrapped around category-specific fields `F`. The fields type implements
//! [`SymbolFields`], which is the single place where a category defines its
//! validation, uniqueness rule, legacy upgrade, and text projection.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Category, RecordId, timestamp};
use crate::error::SymbolError;

/// Category-specific record fields.
pub trait SymbolFields:
    Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
    /// Raw request body accepted by add and update.
    type Request: DeserializeOwned + fmt::Debug + Send + 'static;

    /// Category these fields belong to.
    const CATEGORY: Category;

    /// Validates and normalizes a request into stored fields.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::InvalidInput`] when a field violates the
    /// category's schema.
    fn from_request(request: Self::Request) -> Result<Self, SymbolError>;

    /// Checks the category's uniqueness rule against an existing record.
    ///
    /// Returns a human-readable conflict message when `self` would duplicate
    /// `existing`. Categories without a uniqueness rule keep the default.
    fn conflict_with(&self, _existing: &Self) -> Option<String> {
        None
    }

    /// Fills in fields that older documents did not carry.
    fn upgrade_legacy(&mut self) {}

    /// Fixed comment lines written before the records in the text file.
    #[must_use]
    fn projection_header() -> &'static [&'static str] {
        &[]
    }

    /// Renders this record as one line of the text file.
    fn projection_line(&self) -> String;
}

/// A stored symbol record of any category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Record<F> {
    /// Server-generated identifier, immutable after creation.
    pub id: RecordId,

    /// Category-specific fields, flattened into the record object.
    #[serde(flatten)]
    pub fields: F,

    /// Creation time, preserved across updates.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,

    /// Time of the last field-level update.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

/// Rejects a field value that would split a record across lines of the
/// generated text file.
///
/// # Errors
///
/// Returns [`SymbolError::InvalidInput`] if `value` contains `\r` or `\n`.
pub fn ensure_single_line(field: &str, value: &str) -> Result<(), SymbolError> {
    if value.contains(['\r', '\n']) {
        return Err(SymbolError::InvalidInput(format!(
            "{field} must not contain line breaks"
        )));
    }
    Ok(())
}

impl<F: SymbolFields> Record<F> {
    /// Creates a new record with a fresh identifier, stamped now.
    #[must_use]
    pub fn create(fields: F) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy carrying `fields`, keeping the identifier and creation
    /// time and stamping `updated_at` now.
    #[must_use]
    pub fn revise(&self, fields: F) -> Self {
        Self {
            id: self.id.clone(),
            fields,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }
}
