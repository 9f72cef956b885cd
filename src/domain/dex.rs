//! DEX pool records: protocol type, pool address, name, and quantity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;

use super::{Category, SymbolFields, ensure_single_line};
use crate::error::SymbolError;

/// Supported AMM protocol variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DexType {
    /// Uniswap V2 constant-product pool.
    UniswapV2,
    /// Uniswap V3 concentrated-liquidity pool.
    UniswapV3,
    /// SushiSwap V2 constant-product pool.
    SushiswapV2,
    /// SushiSwap V3 concentrated-liquidity pool.
    SushiswapV3,
}

impl DexType {
    /// All supported protocol types, in the order the text header lists them.
    pub const ALL: [Self; 4] = [
        Self::UniswapV2,
        Self::UniswapV3,
        Self::SushiswapV2,
        Self::SushiswapV3,
    ];

    /// Wire name of the protocol type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UniswapV2 => "uniswap_v2",
            Self::UniswapV3 => "uniswap_v3",
            Self::SushiswapV2 => "sushiswap_v2",
            Self::SushiswapV3 => "sushiswap_v3",
        }
    }

    /// Human-readable description for the type catalog endpoint.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::UniswapV2 => "Uniswap V2 constant-product pool (x * y = k)",
            Self::UniswapV3 => "Uniswap V3 concentrated-liquidity pool",
            Self::SushiswapV2 => "SushiSwap V2 constant-product pool",
            Self::SushiswapV3 => "SushiSwap V3 concentrated-liquidity pool",
        }
    }
}

impl fmt::Display for DexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DexType {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                SymbolError::InvalidInput(format!(
                    "dex_type must be one of [{}], got {s:?}",
                    allowed.join(", ")
                ))
            })
    }
}

/// Pool contract address: `0x` followed by 40 hex digits.
///
/// Stored verbatim (original casing) but compared case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PoolAddress(String);

impl PoolAddress {
    /// Validates an address string.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::InvalidInput`] unless the input is `0x`
    /// followed by exactly 40 hexadecimal digits.
    pub fn parse(raw: &str) -> Result<Self, SymbolError> {
        let valid = raw
            .strip_prefix("0x")
            .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()));
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(SymbolError::InvalidInput(format!(
                "pool_address must be a valid Ethereum address, got {raw:?}"
            )))
        }
    }

    /// Returns the address exactly as submitted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive address comparison.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for PoolAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request body for adding or updating a DEX pool.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DexSymbolRequest {
    /// Protocol type name (e.g. `"uniswap_v2"`).
    pub dex_type: String,
    /// Pool contract address.
    pub pool_address: String,
    /// Display name; stored uppercased.
    pub pool_name: String,
    /// Altcoin quantity; must be a positive whole number.
    ///
    /// Kept as a raw JSON number so that negative, fractional, and
    /// out-of-range values are reported as validation errors.
    #[schema(value_type = u64, minimum = 1)]
    pub altcoin_quantity: Number,
}

/// Stored DEX pool fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DexFields {
    /// Protocol type.
    pub dex_type: DexType,
    /// Pool contract address.
    pub pool_address: PoolAddress,
    /// Uppercased pool display name.
    pub pool_name: String,
    /// How many altcoins to exchange for WETH.
    pub altcoin_quantity: u64,
}

impl SymbolFields for DexFields {
    type Request = DexSymbolRequest;

    const CATEGORY: Category = Category::Dex;

    fn from_request(request: Self::Request) -> Result<Self, SymbolError> {
        let dex_type = request.dex_type.parse()?;
        let pool_address = PoolAddress::parse(&request.pool_address)?;
        let altcoin_quantity = parse_quantity(&request.altcoin_quantity)?;
        ensure_single_line("pool_name", &request.pool_name)?;

        Ok(Self {
            dex_type,
            pool_address,
            pool_name: request.pool_name.to_uppercase(),
            altcoin_quantity,
        })
    }

    fn conflict_with(&self, existing: &Self) -> Option<String> {
        self.pool_address
            .same_as(&existing.pool_address)
            .then(|| format!("pool address {} already exists", self.pool_address))
    }

    fn projection_header() -> &'static [&'static str] {
        &[
            "# Pool addresses for different DEXes",
            "# Format: dex_type:pool_address:pool_name:altcoin_quantity",
            "# Supported dex_types: uniswap_v2, uniswap_v3, sushiswap_v2, sushiswap_v3",
            "# altcoin_quantity: How many altcoins you want to exchange for WETH",
            "",
            "# Working pools (add your desired altcoin quantities)",
        ]
    }

    fn projection_line(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.dex_type, self.pool_address, self.pool_name, self.altcoin_quantity
        )
    }
}

/// Accepts positive integers, including whole floats such as `5.0`.
fn parse_quantity(raw: &Number) -> Result<u64, SymbolError> {
    raw.as_u64()
        .or_else(|| {
            raw.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        })
        .filter(|q| *q > 0)
        .ok_or_else(|| {
            SymbolError::InvalidInput(format!(
                "altcoin_quantity must be a positive integer, got {raw}"
            ))
        })
}
