//! Plain-text rendering of a collection for the downstream trading process.
//!
//! The file is a pure function of the collection: optional fixed header
//! lines followed by one line per record in collection order, joined with
//! `\n` and without a trailing newline. It is fully rewritten every time.

use std::path::{Path, PathBuf};

use super::atomic_file::write_atomic;
use crate::domain::{Category, Collection, SymbolFields};
use crate::error::SymbolError;

/// Renders the text file contents for `collection`.
#[must_use]
pub fn render<F: SymbolFields>(collection: &Collection<F>) -> String {
    F::projection_header()
        .iter()
        .map(|line| (*line).to_string())
        .chain(
            collection
                .symbols
                .iter()
                .map(|record| record.fields.projection_line()),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the generated text file of one category.
#[derive(Debug, Clone)]
pub struct TextProjector {
    path: PathBuf,
}

impl TextProjector {
    /// Creates a projector writing `category`'s file inside `output_dir`.
    #[must_use]
    pub fn new(output_dir: &Path, category: Category) -> Self {
        Self {
            path: output_dir.join(category.projection_file()),
        }
    }

    /// Path of the generated file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the generated file with the rendering of `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Storage`] if the file cannot be written.
    pub async fn project<F: SymbolFields>(
        &self,
        collection: &Collection<F>,
    ) -> Result<(), SymbolError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        write_atomic(&self.path, render(collection).as_bytes()).await?;
        tracing::info!(
            category = %F::CATEGORY,
            path = %self.path.display(),
            records = collection.len(),
            "projection regenerated"
        );
        Ok(())
    }

    /// Reads the generated file back, if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::FileNotFound`] when the file has not been
    /// written, or [`SymbolError::Storage`] on other read failures.
    pub async fn read(&self) -> Result<String, SymbolError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SymbolError::FileNotFound(
                self.path.display().to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Size of the generated file in bytes, or 0 when it does not exist.
    pub async fn size(&self) -> u64 {
        tokio::fs::metadata(&self.path)
            .await
            .map(|m| m.len())
            .unwrap_or(0)
    }

    /// Whether the generated file exists.
    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }
}
