//! # symbol-manager
//!
//! File-backed REST service for three symbol lists: DEX liquidity pools,
//! CEX tickers, and futures contracts.
//!
//! Each list lives in a versioned JSON document under the data directory.
//! Every successful mutation backs up the previous document, rewrites it
//! atomically, and regenerates a colon-separated text file that other
//! trading components consume.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── SymbolService (service/)
//!     ├── CollectionService<F> per category (service/)
//!     │
//!     ├── Records, validation (domain/)
//!     │
//!     └── JSON documents, backups, text files (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
