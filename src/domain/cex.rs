//! CEX ticker mappings: ticker, exchange, and optional raw symbol.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Category, SymbolFields, ensure_single_line};
use crate::error::SymbolError;

/// Request body for adding or updating a CEX mapping.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CexSymbolRequest {
    /// Ticker name; uppercased and checked to be 2-10 letters.
    pub ticker_name: String,
    /// Exchange name, free-form but non-empty.
    pub exchange_name: String,
    /// Exchange-specific raw symbol; defaults to the ticker when absent.
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Stored CEX mapping fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CexFields {
    /// Uppercased ticker name.
    pub ticker_name: String,
    /// Exchange name as submitted.
    pub exchange_name: String,
    /// Raw exchange symbol. Absent in documents written before the field
    /// existed; filled from the ticker on load.
    #[serde(default)]
    pub symbol: Option<String>,
}

impl CexFields {
    /// The symbol written to the text file: the raw symbol, or the ticker.
    #[must_use]
    pub fn effective_symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or(&self.ticker_name)
    }
}

impl SymbolFields for CexFields {
    type Request = CexSymbolRequest;

    const CATEGORY: Category = Category::Cex;

    fn from_request(request: Self::Request) -> Result<Self, SymbolError> {
        let ticker_name = request.ticker_name.to_uppercase();
        if !(2..=10).contains(&ticker_name.len())
            || !ticker_name.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(SymbolError::InvalidInput(format!(
                "ticker_name must be 2-10 letters, got {:?}",
                request.ticker_name
            )));
        }

        if request.exchange_name.trim().is_empty() {
            return Err(SymbolError::InvalidInput(
                "exchange_name must not be empty".to_string(),
            ));
        }

        ensure_single_line("exchange_name", &request.exchange_name)?;

        if let Some(symbol) = request.symbol.as_deref() {
            ensure_single_line("symbol", symbol)?;
        }
        if request.symbol.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(SymbolError::InvalidInput(
                "symbol must not be empty when provided".to_string(),
            ));
        }

        Ok(Self {
            ticker_name,
            exchange_name: request.exchange_name,
            symbol: request.symbol,
        })
    }

    fn conflict_with(&self, existing: &Self) -> Option<String> {
        (self.ticker_name == existing.ticker_name
            && self.exchange_name.eq_ignore_ascii_case(&existing.exchange_name))
        .then(|| {
            format!(
                "symbol {} on {} already exists",
                self.ticker_name, self.exchange_name
            )
        })
    }

    fn upgrade_legacy(&mut self) {
        if self.symbol.is_none() {
            self.symbol = Some(self.ticker_name.clone());
        }
    }

    fn projection_line(&self) -> String {
        format!(
            "{}:{}:{}",
            self.ticker_name,
            self.exchange_name,
            self.effective_symbol()
        )
    }
}
