//! Symbol categories and the files each one owns.

use std::fmt;

use crate::error::SymbolError;

/// One of the three managed symbol collections.
///
/// Each category owns exactly one JSON document under the data directory
/// and one generated text file under the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Decentralized-exchange liquidity pools.
    Dex,
    /// Centralized-exchange ticker mappings.
    Cex,
    /// Futures-contract symbols.
    Futures,
}

impl Category {
    /// All categories in a stable order.
    pub const ALL: [Self; 3] = [Self::Dex, Self::Cex, Self::Futures];

    /// File name of the persisted JSON document.
    #[must_use]
    pub const fn document_file(self) -> &'static str {
        match self {
            Self::Dex => "dex_symbols.json",
            Self::Cex => "cex_symbols.json",
            Self::Futures => "futures_symbols.json",
        }
    }

    /// File name of the generated plain-text projection.
    #[must_use]
    pub const fn projection_file(self) -> &'static str {
        match self {
            Self::Dex => "pooladdress.txt",
            Self::Cex => "cex_symbols.txt",
            Self::Futures => "futures_symbols.txt",
        }
    }

    /// Name used by the download and preview endpoints for the generated file.
    #[must_use]
    pub const fn file_kind(self) -> &'static str {
        match self {
            Self::Dex => "pooladdress",
            Self::Cex => "cex_symbols",
            Self::Futures => "futures_symbols",
        }
    }

    /// Resolves a generated-file kind (`"pooladdress"`, `"cex_symbols"`,
    /// `"futures_symbols"`) back to its category.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::FileNotFound`] for unknown kinds.
    pub fn from_file_kind(kind: &str) -> Result<Self, SymbolError> {
        Self::ALL
            .into_iter()
            .find(|c| c.file_kind() == kind)
            .ok_or_else(|| SymbolError::FileNotFound(kind.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dex => "DEX",
            Self::Cex => "CEX",
            Self::Futures => "Futures",
        })
    }
}
