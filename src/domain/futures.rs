//! Futures-contract symbols.
//!
//! Fields are accepted as submitted, apart from line breaks, and no
//! uniqueness rule applies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Category, SymbolFields, ensure_single_line};
use crate::error::SymbolError;

/// Request body for adding or updating a futures symbol.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FuturesSymbolRequest {
    /// Contract symbol (e.g. `"BTCUSDT"`).
    pub symbol: String,
    /// Underlying ticker.
    pub ticker: String,
    /// Exchange listing the contract.
    pub exchange: String,
}

/// Stored futures symbol fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FuturesFields {
    /// Contract symbol.
    pub symbol: String,
    /// Underlying ticker.
    pub ticker: String,
    /// Exchange listing the contract.
    pub exchange: String,
}

impl SymbolFields for FuturesFields {
    type Request = FuturesSymbolRequest;

    const CATEGORY: Category = Category::Futures;

    fn from_request(request: Self::Request) -> Result<Self, SymbolError> {
        ensure_single_line("symbol", &request.symbol)?;
        ensure_single_line("ticker", &request.ticker)?;
        ensure_single_line("exchange", &request.exchange)?;

        Ok(Self {
            symbol: request.symbol,
            ticker: request.ticker,
            exchange: request.exchange,
        })
    }

    fn projection_line(&self) -> String {
        format!("{}:{}:{}", self.symbol, self.ticker, self.exchange)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn passes_fields_through() {
        let request = FuturesSymbolRequest {
            symbol: "ethusdt".to_string(),
            ticker: "eth".to_string(),
            exchange: "Bybit".to_string(),
        };
        let Ok(fields) = FuturesFields::from_request(request) else {
            panic!("futures request rejected");
        };
        assert_eq!(fields.symbol, "ethusdt");
        assert_eq!(fields.projection_line(), "ethusdt:eth:Bybit");
    }

    #[test]
    fn rejects_line_breaks() {
        for (symbol, ticker, exchange) in [
            ("BTCUSDT\nX:Y:Z", "BTC", "binance"),
            ("BTCUSDT", "BTC\r", "binance"),
            ("BTCUSDT", "BTC", "binance\n"),
        ] {
            let result = FuturesFields::from_request(FuturesSymbolRequest {
                symbol: symbol.to_string(),
                ticker: ticker.to_string(),
                exchange: exchange.to_string(),
            });
            assert!(matches!(result, Err(SymbolError::InvalidInput(_))));
        }
    }

    #[test]
    fn duplicates_do_not_conflict() {
        let fields = FuturesFields {
            symbol: "BTCUSDT".to_string(),
            ticker: "BTC".to_string(),
            exchange: "binance".to_string(),
        };
        assert!(fields.conflict_with(&fields.clone()).is_none());
    }
}
